// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::{TipSelError, TipSelResult};
use serde::{Deserialize, Serialize};
use tangle_models::config::{
    CONFIDENCE_WALK_COUNT, CUMULATIVE_WEIGHT_THRESHOLD, DEFAULT_ALPHA, MAX_FUTURE_SET_SIZE,
    MAX_REFERENCE_WALK_ATTEMPTS, MAX_SUBTANGLE_SIZE, RECYCLER_INTERVAL_MS,
    STARTING_TIP_SAMPLE_SIZE,
};

/// Which entry point selector the engine is built with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryPointKind {
    /// always walk from genesis
    Genesis,
    /// backtrack from a starting tip until the cumulative weight threshold is met
    #[default]
    CumulativeWeightThreshold,
}

/// Parent followed at each backtracking hop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BacktrackStrategy {
    /// always the trunk
    #[default]
    Trunk,
    /// trunk or branch, uniformly
    Random,
}

/// Tip selection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TipSelConfig {
    /// walk bias: 0 is uniform, large values follow the heaviest approver
    pub alpha: f64,
    /// entry point selector
    pub entry_point: EntryPointKind,
    /// cumulative weight an entry point must reach
    pub cw_threshold: usize,
    /// largest future set counted in a single rating
    pub max_future_set_size: usize,
    /// largest future set accepted for an entry point, and number of
    /// transactions rated above it
    pub max_subtangle_size: usize,
    /// number of recent transactions sampled to find connected components
    pub starting_tip_sample_size: usize,
    /// parent followed when backtracking
    pub backtrack: BacktrackStrategy,
    /// walks per confidence estimation
    pub confidence_walk_count: usize,
    /// walks per side when a reference is requested
    pub max_reference_walk_attempts: usize,
}

impl Default for TipSelConfig {
    fn default() -> Self {
        TipSelConfig {
            alpha: DEFAULT_ALPHA,
            entry_point: EntryPointKind::default(),
            cw_threshold: CUMULATIVE_WEIGHT_THRESHOLD,
            max_future_set_size: MAX_FUTURE_SET_SIZE,
            max_subtangle_size: MAX_SUBTANGLE_SIZE,
            starting_tip_sample_size: STARTING_TIP_SAMPLE_SIZE,
            backtrack: BacktrackStrategy::default(),
            confidence_walk_count: CONFIDENCE_WALK_COUNT,
            max_reference_walk_attempts: MAX_REFERENCE_WALK_ATTEMPTS,
        }
    }
}

impl TipSelConfig {
    /// Rejects configurations the engine cannot run with
    pub fn check(&self) -> TipSelResult<()> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(TipSelError::InvalidConfig(format!(
                "alpha must be a finite non-negative number, got {}",
                self.alpha
            )));
        }
        if self.cw_threshold == 0 || self.cw_threshold > self.max_subtangle_size {
            return Err(TipSelError::InvalidConfig(format!(
                "cw_threshold must be in 1..={}, got {}",
                self.max_subtangle_size, self.cw_threshold
            )));
        }
        if self.max_future_set_size == 0 {
            return Err(TipSelError::InvalidConfig(
                "max_future_set_size must not be zero".into(),
            ));
        }
        if self.starting_tip_sample_size < 4 {
            return Err(TipSelError::InvalidConfig(format!(
                "starting_tip_sample_size must be at least 4, got {}",
                self.starting_tip_sample_size
            )));
        }
        if self.confidence_walk_count == 0 || self.max_reference_walk_attempts == 0 {
            return Err(TipSelError::InvalidConfig(
                "walk counts must not be zero".into(),
            ));
        }
        Ok(())
    }
}

/// Database recycler configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RecyclerConfig {
    /// time between two recyclings, in milliseconds
    pub interval_ms: u64,
    /// first recycling happens on the next Sunday at 00:00 UTC
    pub align_to_sunday: bool,
}

impl Default for RecyclerConfig {
    fn default() -> Self {
        RecyclerConfig {
            interval_ms: RECYCLER_INTERVAL_MS,
            align_to_sunday: true,
        }
    }
}
