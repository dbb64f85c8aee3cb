// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! DEFAULT VALUES USED TO INITIALIZE THE CONFIGURATION STRUCTURES
//!
//! Each crate may contain a `settings.rs` or a `config.rs`: the `Default`
//! implementation of each object takes its values from this file.

/// Maximum number of ids kept in each of the solid and non-solid tip sets
pub const MAX_TIPS: usize = 5000;
/// Exponential bias applied to ratings during the random walk
pub const DEFAULT_ALPHA: f64 = 0.001;
/// Maximum number of transactions explored when rating the future set of an entry point
pub const MAX_FUTURE_SET_SIZE: usize = 5000;
/// Largest future set an entry point may have
pub const MAX_SUBTANGLE_SIZE: usize = 15 * MAX_FUTURE_SET_SIZE;
/// Cumulative weight an entry point must reach
pub const CUMULATIVE_WEIGHT_THRESHOLD: usize = 5000;
/// Size of the recent sample used to find connected components
pub const STARTING_TIP_SAMPLE_SIZE: usize = 5000;
/// Number of walks used to estimate confidences
pub const CONFIDENCE_WALK_COUNT: usize = 100;
/// Walks attempted per side when a reference transaction is requested
pub const MAX_REFERENCE_WALK_ATTEMPTS: usize = 10;
/// Default minimum weight magnitude accepted by the storage
pub const MIN_WEIGHT_MAGNITUDE: u8 = 14;
/// Period of the database recycling, in milliseconds (one week)
pub const RECYCLER_INTERVAL_MS: u64 = 7 * 24 * 60 * 60 * 1000;
/// Number of recent transactions used by the lag calculator
pub const LAG_SAMPLE_SIZE: usize = 100;
