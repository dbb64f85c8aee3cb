// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Mocks of the tip selection traits, and a small configuration fit for
//! test tangles.

use crate::{EntryPointKind, TipSelConfig};

pub use crate::component_traits::{
    MockEntryPointSelector, MockLedgerValidator, MockRatingCalculator, MockReferenceChecker,
    MockStartingTipSelector, MockTailFinder, MockWalkValidator,
};
pub use crate::controller_traits::MockTipSelector;

impl TipSelConfig {
    /// Configuration sized for tangles of a few hundred transactions
    pub fn test_default() -> Self {
        TipSelConfig {
            alpha: 0.001,
            entry_point: EntryPointKind::CumulativeWeightThreshold,
            cw_threshold: 5,
            max_future_set_size: 100,
            max_subtangle_size: 1_000,
            starting_tip_sample_size: 100,
            confidence_walk_count: 100,
            max_reference_walk_attempts: 10,
            ..Default::default()
        }
    }
}
