// Copyright (c) 2022 MASSA LABS <info@massa.net>

use std::collections::VecDeque;
use std::sync::Arc;
use tangle_db_exports::TangleDb;
use tangle_models::prehash::{CapacityAllocator, PreHashMap, PreHashSet};
use tangle_models::TransactionId;
use tangle_tipselection_exports::{RatingCalculator, RatingMap, TipSelError, TipSelResult};
use tracing::{debug, warn};

/// Cumulative weight: a transaction rates 1 plus the number of transactions
/// directly or indirectly approving it.
///
/// `calculate` rates the whole subtangle above the entry point, up to
/// `max_subtangle_size` transactions. Each future set is capped at
/// `max_future_set_size`, so ratings saturate at `max_future_set_size + 1`.
pub struct CumulativeWeightCalculator {
    db: Arc<dyn TangleDb>,
    max_future_set_size: usize,
    max_subtangle_size: usize,
}

impl CumulativeWeightCalculator {
    /// `max_future_set_size` caps each future set, `max_subtangle_size` bounds the explored subtangle
    pub fn new(db: Arc<dyn TangleDb>, max_future_set_size: usize, max_subtangle_size: usize) -> Self {
        CumulativeWeightCalculator {
            db,
            max_future_set_size,
            max_subtangle_size,
        }
    }

    /// Explores the approvers of `root` breadth first, keeping at most
    /// `max_subtangle_size` transactions besides `root`.
    fn explore_subtangle(&self, root: &TransactionId) -> TipSelResult<Vec<TransactionId>> {
        let mut visited = PreHashSet::with_capacity(1);
        visited.insert(*root);
        let mut order = vec![*root];
        let mut queue = VecDeque::from([*root]);
        'explore: while let Some(current) = queue.pop_front() {
            for approver in self.db.load_approvers(&current)? {
                if visited.len() > self.max_subtangle_size {
                    warn!(
                        "subtangle above {} truncated at {} transactions",
                        root, self.max_subtangle_size
                    );
                    break 'explore;
                }
                if visited.insert(approver) {
                    order.push(approver);
                    queue.push_back(approver);
                }
            }
        }
        Ok(order)
    }
}

/// Adds `ids` to `future` until it holds `cap` transactions
fn extend_capped(
    future: &mut PreHashSet<TransactionId>,
    ids: impl IntoIterator<Item = TransactionId>,
    cap: usize,
) {
    for id in ids {
        if future.len() >= cap {
            break;
        }
        future.insert(id);
    }
}

impl RatingCalculator for CumulativeWeightCalculator {
    fn calculate(&self, entry_point: &TransactionId) -> TipSelResult<RatingMap> {
        let subtangle = self.explore_subtangle(entry_point)?;
        let members: PreHashSet<TransactionId> = subtangle.iter().copied().collect();

        // in-subtangle edges, taken from the approving side
        let mut parents: PreHashMap<TransactionId, Vec<TransactionId>> =
            PreHashMap::with_capacity(subtangle.len());
        let mut approvers: PreHashMap<TransactionId, Vec<TransactionId>> =
            PreHashMap::with_capacity(subtangle.len());
        for id in &subtangle {
            let tx = self.db.load_transaction(id)?;
            let in_set: Vec<TransactionId> = tx
                .parents()
                .into_iter()
                .filter(|parent| parent != id && members.contains(parent))
                .collect();
            for parent in &in_set {
                approvers.entry(*parent).or_default().push(*id);
            }
            parents.insert(*id, in_set);
        }

        // reverse topological order: a transaction is rated once all of its
        // approvers are, and an approver's set is dropped once all of the
        // transactions it approves have consumed it
        let mut pending_approvers: PreHashMap<TransactionId, usize> = subtangle
            .iter()
            .map(|id| (*id, approvers.get(id).map_or(0, Vec::len)))
            .collect();
        let mut pending_consumers: PreHashMap<TransactionId, usize> = parents
            .iter()
            .map(|(id, in_set)| (*id, in_set.len()))
            .collect();
        let mut ready: Vec<TransactionId> = subtangle
            .iter()
            .filter(|id| pending_approvers.get(*id) == Some(&0))
            .copied()
            .collect();
        let mut future_sets: PreHashMap<TransactionId, PreHashSet<TransactionId>> =
            PreHashMap::with_capacity(ready.len());
        let mut ratings = RatingMap::with_capacity(subtangle.len());
        let cap = self.max_future_set_size;

        while let Some(id) = ready.pop() {
            let mut future = PreHashSet::with_capacity(0);
            for approver in approvers.get(&id).map(Vec::as_slice).unwrap_or_default() {
                extend_capped(&mut future, [*approver], cap);
                let remaining = pending_consumers.entry(*approver).or_insert(1);
                *remaining -= 1;
                if *remaining == 0 {
                    if let Some(approver_future) = future_sets.remove(approver) {
                        extend_capped(&mut future, approver_future, cap);
                    }
                } else if let Some(approver_future) = future_sets.get(approver) {
                    extend_capped(&mut future, approver_future.iter().copied(), cap);
                }
            }
            ratings.insert(id, future.len() + 1);
            for parent in parents.get(&id).map(Vec::as_slice).unwrap_or_default() {
                if let Some(count) = pending_approvers.get_mut(parent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push(*parent);
                    }
                }
            }
            if pending_consumers.get(&id).copied().unwrap_or(0) > 0 {
                future_sets.insert(id, future);
            }
        }

        if ratings.len() != subtangle.len() {
            return Err(TipSelError::ContainerInconsistency(format!(
                "rated {} of the {} transactions above {}",
                ratings.len(),
                subtangle.len(),
                entry_point
            )));
        }
        debug!(
            "rated {} transactions above {}",
            ratings.len(),
            entry_point
        );
        Ok(ratings)
    }

    fn calculate_single(&self, id: &TransactionId) -> TipSelResult<usize> {
        let mut future = PreHashSet::with_capacity(16);
        let mut queue = VecDeque::from([*id]);
        while let Some(current) = queue.pop_front() {
            for approver in self.db.load_approvers(&current)? {
                if approver != *id && future.insert(approver) {
                    if future.len() + 1 > self.max_subtangle_size {
                        return Ok(future.len() + 1);
                    }
                    queue.push_back(approver);
                }
            }
        }
        Ok(future.len() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tangle_test_framework::{make_chain, make_star, new_tangle, store_transaction};

    fn calculator(db: &Arc<tangle_db_worker::MemoryTangle>) -> CumulativeWeightCalculator {
        CumulativeWeightCalculator::new(db.clone(), 1_000, 1_000)
    }

    #[test]
    fn test_chain_ratings() {
        let db = new_tangle();
        let chain = make_chain(&db, TransactionId::genesis(), 10);
        let ratings = calculator(&db).calculate(&chain[0]).unwrap();
        assert_eq!(ratings.len(), 10);
        for (depth, id) in chain.iter().enumerate() {
            assert_eq!(ratings[id], 10 - depth);
        }
    }

    #[test]
    fn test_diamond_counts_shared_approvers_once() {
        // a <- b, a <- c, (b, c) <- d, d <- e
        let db = new_tangle();
        let genesis = TransactionId::genesis();
        let a = store_transaction(&db, genesis, genesis);
        let b = store_transaction(&db, a, a);
        let c = store_transaction(&db, a, genesis);
        let d = store_transaction(&db, b, c);
        let e = store_transaction(&db, d, d);
        let calc = calculator(&db);
        let ratings = calc.calculate(&a).unwrap();
        assert_eq!(ratings[&a], 5);
        assert_eq!(ratings[&b], 3);
        assert_eq!(ratings[&c], 3);
        assert_eq!(ratings[&d], 2);
        assert_eq!(ratings[&e], 1);
        assert_eq!(calc.calculate_single(&a).unwrap(), 5);
        assert_eq!(calc.calculate_single(&e).unwrap(), 1);

        let from_genesis = calc.calculate(&genesis).unwrap();
        assert_eq!(from_genesis[&genesis], 6);
        assert_eq!(from_genesis[&c], 3);
    }

    #[test]
    fn test_subtangle_bound() {
        let db = new_tangle();
        let root = store_transaction(&db, TransactionId::genesis(), TransactionId::genesis());
        make_star(&db, root, 50);
        let calc = CumulativeWeightCalculator::new(db.clone(), 10, 20);
        let ratings = calc.calculate(&root).unwrap();
        assert_eq!(ratings.len(), 21);
        // future set capped
        assert_eq!(ratings[&root], 11);
        // counting stops right after the subtangle bound is crossed
        assert_eq!(calc.calculate_single(&root).unwrap(), 21);
    }

    #[test]
    fn test_whole_subtangle_rated_with_capped_future_sets() {
        let db = new_tangle();
        let chain = make_chain(&db, TransactionId::genesis(), 30);
        let calc = CumulativeWeightCalculator::new(db.clone(), 5, 100);
        let ratings = calc.calculate(&chain[0]).unwrap();
        assert_eq!(ratings.len(), 30);
        assert_eq!(ratings[&chain[29]], 1);
        assert_eq!(ratings[&chain[27]], 3);
        assert_eq!(ratings[&chain[24]], 6);
        assert_eq!(ratings[&chain[0]], 6);
        // ratings never decrease towards the entry point
        for pair in chain.windows(2) {
            assert!(ratings[&pair[0]] >= ratings[&pair[1]]);
        }
    }
}
