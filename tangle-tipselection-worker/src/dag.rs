// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Traversals of the recent part of the tangle.

use std::collections::BinaryHeap;
use tangle_db_exports::TangleDb;
use tangle_models::prehash::{CapacityAllocator, PreHashSet};
use tangle_models::TransactionId;
use tangle_tipselection_exports::TipSelResult;

/// Collects up to `count` transactions reachable from `seeds` through trunk
/// and branch, always expanding the most recently arrived one first.
/// Returned in the order they were taken.
///
/// Placeholders are collected but not expanded. Genesis is only collected
/// when it is one of the seeds.
pub(crate) fn find_recent_transactions(
    db: &dyn TangleDb,
    seeds: &[TransactionId],
    count: usize,
) -> TipSelResult<Vec<TransactionId>> {
    let mut result = Vec::with_capacity(count);
    let mut queued = PreHashSet::with_capacity(count);
    let mut heap = BinaryHeap::with_capacity(seeds.len());
    for seed in seeds {
        if queued.insert(*seed) {
            heap.push((db.load_transaction(seed)?.arrival_time, *seed));
        }
    }
    while result.len() < count {
        let Some((_, id)) = heap.pop() else {
            break;
        };
        result.push(id);
        let tx = db.load_transaction(&id)?;
        if tx.placeholder {
            continue;
        }
        for parent in tx.parents() {
            if parent.is_genesis() || !queued.insert(parent) {
                continue;
            }
            heap.push((db.load_transaction(&parent)?.arrival_time, parent));
        }
    }
    Ok(result)
}

/// Partitions `sample` into sets of transactions connected through trunk,
/// branch or approver edges that stay inside the sample.
pub(crate) fn connected_components(
    db: &dyn TangleDb,
    sample: &[TransactionId],
) -> TipSelResult<Vec<PreHashSet<TransactionId>>> {
    let mut unvisited: PreHashSet<TransactionId> = sample.iter().copied().collect();
    let mut components = Vec::new();
    while let Some(start) = unvisited.iter().next().copied() {
        let mut component = PreHashSet::with_capacity(1);
        let mut stack = vec![start];
        unvisited.remove(&start);
        while let Some(current) = stack.pop() {
            component.insert(current);
            let tx = db.load_transaction(&current)?;
            let approvers = db.load_approvers(&current)?;
            for neighbor in approvers.into_iter().chain(tx.parents()) {
                if unvisited.remove(&neighbor) {
                    stack.push(neighbor);
                }
            }
        }
        components.push(component);
    }
    Ok(components)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tangle_test_framework::{make_chain, make_star, new_tangle, store_transaction};

    #[test]
    fn test_recent_transactions_prefers_latest_arrivals() {
        let db = new_tangle();
        let genesis = TransactionId::genesis();
        let old = make_chain(&db, genesis, 5);
        let young = make_chain(&db, genesis, 5);
        let recent = find_recent_transactions(&*db, &[old[4], young[4]], 6).unwrap();
        assert_eq!(recent.len(), 6);
        // the young chain arrived last: it is fully taken before the old one
        assert!(young.iter().all(|id| recent.contains(id)));
        assert_eq!(recent[0], young[4]);
        assert!(recent.contains(&old[4]));
        assert!(!recent.contains(&genesis));
    }

    #[test]
    fn test_recent_transactions_stops_at_genesis() {
        let db = new_tangle();
        let chain = make_chain(&db, TransactionId::genesis(), 3);
        let recent = find_recent_transactions(&*db, &[chain[2]], 100).unwrap();
        assert_eq!(recent, vec![chain[2], chain[1], chain[0]]);

        let only_genesis =
            find_recent_transactions(&*db, &[TransactionId::genesis()], 10).unwrap();
        assert_eq!(only_genesis, vec![TransactionId::genesis()]);
    }

    #[test]
    fn test_components_ignore_genesis_links() {
        let db = new_tangle();
        let genesis = TransactionId::genesis();
        let chain = make_chain(&db, genesis, 6);
        let lonely = make_star(&db, genesis, 3);
        let merged = store_transaction(&db, chain[5], chain[2]);

        let mut sample = chain.clone();
        sample.extend(&lonely);
        sample.push(merged);
        let mut components = connected_components(&*db, &sample).unwrap();
        components.sort_by_key(|c| std::cmp::Reverse(c.len()));
        assert_eq!(components.len(), 4);
        assert_eq!(components[0].len(), 7);
        assert!(components[0].contains(&merged));
        assert!(components[1..].iter().all(|c| c.len() == 1));
    }
}
