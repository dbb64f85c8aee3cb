// Copyright (c) 2022 MASSA LABS <info@massa.net>

use std::collections::VecDeque;
use std::sync::Arc;
use tangle_db_exports::TangleDb;
use tangle_models::prehash::{CapacityAllocator, PreHashSet};
use tangle_models::TransactionId;
use tangle_tipselection_exports::{ReferenceChecker, TipSelError, TipSelResult};

/// Breadth first search through trunks and branches
pub struct ReferenceCheckerImpl {
    db: Arc<dyn TangleDb>,
}

impl ReferenceCheckerImpl {
    /// new checker reading from `db`
    pub fn new(db: Arc<dyn TangleDb>) -> Self {
        ReferenceCheckerImpl { db }
    }
}

impl ReferenceChecker for ReferenceCheckerImpl {
    fn does_reference(&self, from: &TransactionId, to: &TransactionId) -> TipSelResult<bool> {
        for id in [from, to] {
            if !self.db.transaction_exists(id)? {
                return Err(TipSelError::MissingData(*id));
            }
        }
        let mut visited = PreHashSet::with_capacity(64);
        visited.insert(*from);
        let mut queue = VecDeque::from([*from]);
        while let Some(current) = queue.pop_front() {
            if current == *to {
                return Ok(true);
            }
            for parent in self.db.load_transaction(&current)?.parents() {
                if visited.insert(parent) {
                    queue.push_back(parent);
                }
            }
        }
        Ok(false)
    }
}
