// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::fifo::FifoCache;
use parking_lot::Mutex;
use rand::Rng;
use std::collections::VecDeque;
use std::sync::Arc;
use tangle_db_exports::{TangleDb, TangleDbResult};
use tangle_models::prehash::{CapacityAllocator, PreHashSet};
use tangle_models::TransactionId;
use tracing::{debug, info};

#[derive(Debug)]
struct TipSets {
    non_solid: FifoCache,
    solid: FifoCache,
}

/// Thread-safe tip bookkeeping.
///
/// Every operation holds one mutex for its whole duration, except the
/// solid-set repair of `latest_solid_tips` which reads storage unlocked.
pub struct TipsCache {
    db: Arc<dyn TangleDb>,
    sets: Mutex<TipSets>,
}

impl TipsCache {
    /// Creates an empty cache holding at most `capacity` ids per set
    pub fn new(capacity: usize, db: Arc<dyn TangleDb>) -> Self {
        TipsCache {
            db,
            sets: Mutex::new(TipSets {
                non_solid: FifoCache::new(capacity),
                solid: FifoCache::new(capacity),
            }),
        }
    }

    /// Records a new non-solid tip
    pub fn add_tip(&self, id: TransactionId) {
        let mut sets = self.sets.lock();
        if !sets.solid.contains(&id) {
            sets.non_solid.add(id);
        }
    }

    /// Forgets a tip that just got approved
    pub fn remove_tip(&self, id: &TransactionId) {
        let mut sets = self.sets.lock();
        if !sets.non_solid.remove(id) {
            sets.solid.remove(id);
        }
    }

    /// Moves a non-solid tip to the solid set. Ids that are not non-solid tips are ignored.
    pub fn set_solid(&self, id: &TransactionId) {
        let mut sets = self.sets.lock();
        if sets.non_solid.remove(id) {
            sets.solid.add(*id);
        }
    }

    /// Union of both sets
    pub fn all_tips(&self) -> PreHashSet<TransactionId> {
        let sets = self.sets.lock();
        let mut tips = PreHashSet::with_capacity(sets.non_solid.len() + sets.solid.len());
        tips.extend(sets.non_solid.iter().copied());
        tips.extend(sets.solid.iter().copied());
        tips
    }

    /// Uniformly drawn solid tip
    pub fn random_solid_tip(&self) -> Option<TransactionId> {
        let sets = self.sets.lock();
        random_entry(&sets.solid)
    }

    /// Uniformly drawn non-solid tip
    pub fn random_non_solid_tip(&self) -> Option<TransactionId> {
        let sets = self.sets.lock();
        random_entry(&sets.non_solid)
    }

    /// Up to `count` solid tips, most recently added first.
    ///
    /// An empty solid set is first rebuilt from storage: the approver graph
    /// is explored from genesis through solid transactions, and every solid
    /// transaction without solid approvers becomes a solid tip.
    pub fn latest_solid_tips(&self, count: usize) -> TangleDbResult<Vec<TransactionId>> {
        if self.sets.lock().solid.is_empty() {
            let found = self.scan_solid_tips()?;
            let mut sets = self.sets.lock();
            if sets.solid.is_empty() {
                info!("rebuilt solid tip set with {} tips", found.len());
                for id in found {
                    sets.non_solid.remove(&id);
                    sets.solid.add(id);
                }
            }
        }
        let sets = self.sets.lock();
        Ok(sets.solid.iter().rev().take(count).copied().collect())
    }

    /// Number of non-solid tips
    pub fn non_solid_size(&self) -> usize {
        self.sets.lock().non_solid.len()
    }

    /// Number of solid tips
    pub fn solid_size(&self) -> usize {
        self.sets.lock().solid.len()
    }

    /// Number of tips
    pub fn size(&self) -> usize {
        let sets = self.sets.lock();
        sets.non_solid.len() + sets.solid.len()
    }

    /// Forgets every tip
    pub fn clear(&self) {
        let mut sets = self.sets.lock();
        sets.non_solid.clear();
        sets.solid.clear();
    }

    fn scan_solid_tips(&self) -> TangleDbResult<Vec<TransactionId>> {
        let genesis = TransactionId::genesis();
        let mut visited = PreHashSet::with_capacity(1);
        visited.insert(genesis);
        let mut queue = VecDeque::from([genesis]);
        let mut tips = Vec::new();
        while let Some(current) = queue.pop_front() {
            let mut has_solid_approver = false;
            for approver in self.db.load_approvers(&current)? {
                if !self.db.load_transaction(&approver)?.solid {
                    continue;
                }
                has_solid_approver = true;
                if visited.insert(approver) {
                    queue.push_back(approver);
                }
            }
            if !has_solid_approver {
                tips.push(current);
            }
        }
        debug!(
            "solid tip scan visited {} transactions, found {} tips",
            visited.len(),
            tips.len()
        );
        Ok(tips)
    }
}

fn random_entry(cache: &FifoCache) -> Option<TransactionId> {
    if cache.is_empty() {
        return None;
    }
    let index = rand::thread_rng().gen_range(0..cache.len());
    cache.nth(index)
}
