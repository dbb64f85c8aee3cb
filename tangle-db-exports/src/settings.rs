// Copyright (c) 2022 MASSA LABS <info@massa.net>

/// Tangle storage configuration
#[derive(Debug, Clone)]
pub struct TangleDbConfig {
    /// transactions with a lower weight magnitude are refused
    pub min_weight_magnitude: u8,
}
