// Copyright (c) 2022 MASSA LABS <info@massa.net>

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tangle_db_exports::TangleDb;
use tangle_models::TransactionId;
use tangle_tipselection_exports::{
    RatingMap, TailFinder, TipSelError, TipSelResult, WalkValidator, Walker,
};

/// Selection weight of an approver rated `rating` among approvers whose
/// best rating is `max_rating`. Always in `(0, 1]`.
pub fn transition_weight(alpha: f64, rating: usize, max_rating: usize) -> f64 {
    (alpha * (rating as f64 - max_rating as f64)).exp()
}

/// Random walk moving to approver `a` with probability proportional to
/// `exp(alpha * rating(a))`.
pub struct WalkerAlpha {
    db: Arc<dyn TangleDb>,
    tail_finder: Arc<dyn TailFinder>,
    alpha: f64,
}

impl WalkerAlpha {
    /// new walker
    pub fn new(db: Arc<dyn TangleDb>, tail_finder: Arc<dyn TailFinder>, alpha: f64) -> Self {
        WalkerAlpha {
            db,
            tail_finder,
            alpha,
        }
    }

    /// Draws approvers of `current` until one resolves to a valid tail.
    /// Drawn approvers are removed from the pool whatever the outcome.
    fn step(
        &self,
        current: &TransactionId,
        ratings: &RatingMap,
        validator: &mut dyn WalkValidator,
        rng: &mut StdRng,
    ) -> TipSelResult<Option<TransactionId>> {
        let mut candidates: Vec<(TransactionId, usize)> = self
            .db
            .load_approvers(current)?
            .into_iter()
            .filter_map(|approver| ratings.get(&approver).map(|rating| (approver, *rating)))
            .collect();
        // approver sets have no meaningful order
        candidates.sort_unstable();
        while !candidates.is_empty() {
            let max_rating = candidates
                .iter()
                .map(|(_, rating)| *rating)
                .max()
                .unwrap_or_default();
            let weights = candidates
                .iter()
                .map(|(_, rating)| transition_weight(self.alpha, *rating, max_rating));
            let distribution = WeightedIndex::new(weights)
                .map_err(|err| TipSelError::ContainerInconsistency(err.to_string()))?;
            let (approver, _) = candidates.swap_remove(distribution.sample(rng));
            if let Some(tail) = self.tail_finder.find_tail(&approver)? {
                if validator.is_valid(&tail)? {
                    return Ok(Some(tail));
                }
            }
        }
        Ok(None)
    }
}

impl Walker for WalkerAlpha {
    fn walk(
        &self,
        entry_point: &TransactionId,
        ratings: &RatingMap,
        validator: &mut dyn WalkValidator,
    ) -> TipSelResult<TransactionId> {
        if !validator.is_valid(entry_point)? {
            return Err(TipSelError::EntryPointInconsistent(*entry_point));
        }
        let mut rng = StdRng::from_entropy();
        let mut current = *entry_point;
        let mut steps = 0usize;
        while let Some(next) = self.step(&current, ratings, validator, &mut rng)? {
            current = next;
            steps += 1;
        }
        tangle_trace!("tipselection.walk", {
            "entry_point": entry_point.to_string(),
            "tip": current.to_string(),
            "steps": steps
        });
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::PermissiveLedgerValidator;
    use crate::rating::CumulativeWeightCalculator;
    use crate::tail_finder::TailFinderImpl;
    use crate::walk_validator::WalkValidatorImpl;
    use assert_matches::assert_matches;
    use tangle_db_worker::MemoryTangle;
    use tangle_test_framework::{
        create_transaction, make_bundle, make_chain, make_star, new_tangle, store_transaction,
    };
    use tangle_tipselection_exports::test_exports::MockWalkValidator;
    use tangle_tipselection_exports::RatingCalculator;

    fn walker(db: &Arc<MemoryTangle>, alpha: f64) -> WalkerAlpha {
        WalkerAlpha::new(db.clone(), Arc::new(TailFinderImpl::new(db.clone())), alpha)
    }

    fn validator(db: &Arc<MemoryTangle>) -> WalkValidatorImpl {
        WalkValidatorImpl::new(db.clone(), Arc::new(PermissiveLedgerValidator))
    }

    fn ratings(db: &Arc<MemoryTangle>, entry_point: &TransactionId) -> RatingMap {
        CumulativeWeightCalculator::new(db.clone(), 1_000, 1_000)
            .calculate(entry_point)
            .unwrap()
    }

    #[test]
    fn test_transition_weight() {
        assert_eq!(transition_weight(0.5, 10, 10), 1.0);
        assert!(transition_weight(0.5, 1, 10) < transition_weight(0.5, 5, 10));
        assert!((transition_weight(0.0, 1, 1_000) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_walk_reaches_chain_tip() {
        let db = new_tangle();
        let chain = make_chain(&db, TransactionId::genesis(), 10);
        let ratings = ratings(&db, &chain[0]);
        let tip = walker(&db, 0.001)
            .walk(&chain[0], &ratings, &mut validator(&db))
            .unwrap();
        assert_eq!(tip, chain[9]);
    }

    #[test]
    fn test_walk_ends_on_a_tip() {
        let db = new_tangle();
        let genesis = TransactionId::genesis();
        let root = store_transaction(&db, genesis, genesis);
        let leaves = make_star(&db, root, 10);
        let ratings = ratings(&db, &genesis);
        for _ in 0..20 {
            let tip = walker(&db, 0.001)
                .walk(&genesis, &ratings, &mut validator(&db))
                .unwrap();
            assert!(leaves.contains(&tip));
        }
    }

    #[test]
    fn test_high_alpha_follows_heaviest_branch() {
        let db = new_tangle();
        let genesis = TransactionId::genesis();
        let root = store_transaction(&db, genesis, genesis);
        let heavy = make_chain(&db, root, 30);
        let light = make_chain(&db, root, 1);
        let ratings = ratings(&db, &root);
        for _ in 0..20 {
            let tip = walker(&db, 10.0)
                .walk(&root, &ratings, &mut validator(&db))
                .unwrap();
            assert_eq!(tip, heavy[29]);
            assert_ne!(tip, light[0]);
        }
    }

    #[test]
    fn test_invalid_approvers_are_skipped() {
        let db = new_tangle();
        let genesis = TransactionId::genesis();
        let root = store_transaction(&db, genesis, genesis);
        let mut unsolid = create_transaction(root, root);
        unsolid.solid = false;
        db.store(unsolid).unwrap();
        let bundle = make_bundle(&db, root, root, 3);
        let ratings = ratings(&db, &root);
        for _ in 0..10 {
            let tip = walker(&db, 0.001)
                .walk(&root, &ratings, &mut validator(&db))
                .unwrap();
            assert_eq!(tip, bundle[0]);
        }
    }

    #[test]
    fn test_all_approvers_rejected_stops_walk() {
        let db = new_tangle();
        let genesis = TransactionId::genesis();
        let root = store_transaction(&db, genesis, genesis);
        make_star(&db, root, 4);
        let ratings = ratings(&db, &root);
        let mut validator = MockWalkValidator::new();
        validator
            .expect_is_valid()
            .withf(move |id| *id == root)
            .times(1)
            .returning(|_| Ok(true));
        validator
            .expect_is_valid()
            .withf(move |id| *id != root)
            .times(4)
            .returning(|_| Ok(false));
        let tip = walker(&db, 0.001)
            .walk(&root, &ratings, &mut validator)
            .unwrap();
        assert_eq!(tip, root);
    }

    #[test]
    fn test_inconsistent_entry_point() {
        let db = new_tangle();
        let chain = make_chain(&db, TransactionId::genesis(), 2);
        let ratings = ratings(&db, &chain[0]);
        let mut validator = MockWalkValidator::new();
        validator.expect_is_valid().returning(|_| Ok(false));
        assert_matches!(
            walker(&db, 0.001).walk(&chain[0], &ratings, &mut validator),
            Err(TipSelError::EntryPointInconsistent(id)) if id == chain[0]
        );
    }
}
