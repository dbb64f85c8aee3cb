// Copyright (c) 2022 MASSA LABS <info@massa.net>

use rand::Rng;
use std::sync::Arc;
use tangle_db_exports::TangleDb;
use tangle_models::TransactionId;
use tangle_tipselection_exports::{
    BacktrackStrategy, EntryPointSelector, RatingCalculator, StartingTipSelector, TailFinder,
    TipSelError, TipSelResult,
};
use tracing::debug;

/// Every walk starts from genesis
#[derive(Debug, Default, Clone)]
pub struct GenesisEntryPointSelector;

impl EntryPointSelector for GenesisEntryPointSelector {
    fn get_entry_point(&self) -> TipSelResult<TransactionId> {
        Ok(TransactionId::genesis())
    }
}

/// Backtracks from a starting tip until the cumulative weight threshold is
/// crossed, then keeps the crossing point closest to the tip.
pub struct CumulativeWeightEntryPointSelector {
    db: Arc<dyn TangleDb>,
    starting_tip_selector: Arc<dyn StartingTipSelector>,
    rating_calculator: Arc<dyn RatingCalculator>,
    tail_finder: Arc<dyn TailFinder>,
    threshold: usize,
    max_subtangle_size: usize,
    backtrack: BacktrackStrategy,
}

impl CumulativeWeightEntryPointSelector {
    /// new selector
    pub fn new(
        db: Arc<dyn TangleDb>,
        starting_tip_selector: Arc<dyn StartingTipSelector>,
        rating_calculator: Arc<dyn RatingCalculator>,
        tail_finder: Arc<dyn TailFinder>,
        threshold: usize,
        max_subtangle_size: usize,
        backtrack: BacktrackStrategy,
    ) -> Self {
        CumulativeWeightEntryPointSelector {
            db,
            starting_tip_selector,
            rating_calculator,
            tail_finder,
            threshold,
            max_subtangle_size,
            backtrack,
        }
    }

    /// Exponential search: hops `1, 2, 4, ...` parents back until the
    /// weight reaches the threshold or genesis is reached, then binary
    /// search over the last stretch.
    fn backtrack(&self, tip: TransactionId) -> TipSelResult<TransactionId> {
        let mut current = tip;
        let mut weight = 1;
        let mut step_size = 1usize;
        let mut path = vec![tip];
        while weight < self.threshold && !current.is_genesis() {
            path = self.n_steps_back(current, step_size)?;
            current = *path.last().unwrap_or(&current);
            weight = self.rating_calculator.calculate_single(&current)?;
            step_size = step_size.saturating_mul(2);
        }
        self.binary_search(&path)
    }

    /// Earliest element of `path` (ordered from the tip side) reaching the threshold
    fn binary_search(&self, path: &[TransactionId]) -> TipSelResult<TransactionId> {
        let mut left = 0;
        let mut right = path.len().saturating_sub(1);
        while left < right {
            let middle = (left + right) / 2;
            if self.rating_calculator.calculate_single(&path[middle])? < self.threshold {
                left = middle + 1;
            } else {
                right = middle;
            }
        }
        path.get(right).copied().ok_or_else(|| {
            TipSelError::ContainerInconsistency("empty backtracking path".into())
        })
    }

    fn n_steps_back(&self, from: TransactionId, steps: usize) -> TipSelResult<Vec<TransactionId>> {
        let mut current = from;
        let mut path = vec![current];
        let mut rng = rand::thread_rng();
        for _ in 0..steps {
            if current.is_genesis() {
                break;
            }
            let tx = self.db.load_transaction(&current)?;
            current = match self.backtrack {
                BacktrackStrategy::Trunk => tx.trunk,
                BacktrackStrategy::Random if rng.gen_bool(0.5) => tx.trunk,
                BacktrackStrategy::Random => tx.branch,
            };
            path.push(current);
        }
        Ok(path)
    }
}

impl EntryPointSelector for CumulativeWeightEntryPointSelector {
    fn get_entry_point(&self) -> TipSelResult<TransactionId> {
        let tip = self.starting_tip_selector.get_starting_tip()?;
        let entry_bundle = self.backtrack(tip)?;
        let entry_point = self
            .tail_finder
            .find_tail(&entry_bundle)?
            .ok_or(TipSelError::MissingData(entry_bundle))?;

        let size = self.rating_calculator.calculate_single(&entry_point)?;
        if size > self.max_subtangle_size {
            return Err(TipSelError::SubtangleTooLarge { entry_point, size });
        }
        debug!(
            "entry point {} (weight {}) from starting tip {}",
            entry_point, size, tip
        );
        tangle_trace!("tipselection.entry_point", {
            "tip": tip.to_string(),
            "entry_point": entry_point.to_string(),
            "weight": size
        });
        Ok(entry_point)
    }
}
