// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! This module implements the tip selector controller.
//! See `tangle-tipselection-exports/controller_traits.rs` for functional details.

use crate::walk_validator::WalkValidatorImpl;
use parking_lot::Mutex;
use std::sync::Arc;
use tangle_db_exports::TangleDb;
use tangle_models::TransactionId;
use tangle_tipselection_exports::{
    EntryPointSelector, LedgerValidator, RatingCalculator, RatingMap, ReferenceChecker,
    TipSelConfig, TipSelError, TipSelResult, TipSelector, TransactionsToApprove, Walker,
};
use tracing::{debug, info};

/// Implementation of the tip selector
#[derive(Clone)]
pub struct TipSelectorImpl {
    pub(crate) cfg: TipSelConfig,
    pub(crate) db: Arc<dyn TangleDb>,
    pub(crate) entry_point_selector: Arc<dyn EntryPointSelector>,
    pub(crate) rating_calculator: Arc<dyn RatingCalculator>,
    pub(crate) walker: Arc<dyn Walker>,
    pub(crate) reference_checker: Arc<dyn ReferenceChecker>,
    pub(crate) ledger: Arc<dyn LedgerValidator>,
    /// held for the whole duration of `get_transactions_to_approve`
    pub(crate) selection_lock: Arc<Mutex<()>>,
}

impl TipSelectorImpl {
    /// One walk with its own walk state
    fn walk_once(&self, entry_point: &TransactionId, ratings: &RatingMap) -> TipSelResult<TransactionId> {
        let mut validator = WalkValidatorImpl::new(self.db.clone(), self.ledger.clone());
        self.walker.walk(entry_point, ratings, &mut validator)
    }

    /// One walk, retried until its result references `reference`
    fn walk_referencing(
        &self,
        entry_point: &TransactionId,
        ratings: &RatingMap,
        reference: Option<&TransactionId>,
    ) -> TipSelResult<TransactionId> {
        let Some(reference) = reference else {
            return self.walk_once(entry_point, ratings);
        };
        for attempt in 1..=self.cfg.max_reference_walk_attempts {
            let tip = self.walk_once(entry_point, ratings)?;
            if self.reference_checker.does_reference(&tip, reference)? {
                return Ok(tip);
            }
            debug!(
                "walk {} ended on {} which does not reference {}",
                attempt, tip, reference
            );
        }
        Err(TipSelError::SelectionExhausted(*reference))
    }

    fn ensure_exists(&self, id: &TransactionId) -> TipSelResult<()> {
        if self.db.transaction_exists(id)? {
            Ok(())
        } else {
            Err(TipSelError::MissingData(*id))
        }
    }
}

impl TipSelector for TipSelectorImpl {
    fn get_transactions_to_approve(
        &self,
        reference: Option<TransactionId>,
    ) -> TipSelResult<TransactionsToApprove> {
        let _selection_guard = self.selection_lock.lock();
        if let Some(reference) = &reference {
            self.ensure_exists(reference)?;
        }

        let entry_point = self.entry_point_selector.get_entry_point()?;
        let ratings = self.rating_calculator.calculate(&entry_point)?;
        let trunk = self.walk_referencing(&entry_point, &ratings, reference.as_ref())?;
        let branch = self.walk_referencing(&entry_point, &ratings, reference.as_ref())?;

        if !self.ledger.check_consistency(&[trunk, branch])? {
            return Err(TipSelError::TipsNotConsistent);
        }
        info!(
            "selected trunk {} and branch {} from entry point {}",
            trunk, branch, entry_point
        );
        Ok(TransactionsToApprove { trunk, branch })
    }

    fn get_confidences(&self, candidates: &[TransactionId]) -> TipSelResult<Vec<f64>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        for candidate in candidates {
            self.ensure_exists(candidate)?;
        }
        let entry_point = self.entry_point_selector.get_entry_point()?;
        let ratings = self.rating_calculator.calculate(&entry_point)?;
        let walks = self.cfg.confidence_walk_count;
        let mut hits = vec![0usize; candidates.len()];
        for _ in 0..walks {
            let tip = self.walk_once(&entry_point, &ratings)?;
            for (candidate, count) in candidates.iter().zip(hits.iter_mut()) {
                if self.reference_checker.does_reference(&tip, candidate)? {
                    *count += 1;
                }
            }
        }
        Ok(hits
            .into_iter()
            .map(|count| count as f64 / walks as f64)
            .collect())
    }

    fn clone_box(&self) -> Box<dyn TipSelector> {
        Box::new(self.clone())
    }
}
