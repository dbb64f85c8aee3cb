// Copyright (c) 2022 MASSA LABS <info@massa.net>

use std::collections::BTreeMap;
use tangle_models::prehash::{CapacityAllocator, PreHashMap};
use tangle_models::TransactionId;

/// Set of ids bounded by `capacity`, remembering insertion order.
#[derive(Debug)]
pub(crate) struct FifoCache {
    capacity: usize,
    next_seq: u64,
    order: BTreeMap<u64, TransactionId>,
    index: PreHashMap<TransactionId, u64>,
}

impl FifoCache {
    pub fn new(capacity: usize) -> Self {
        FifoCache {
            capacity,
            next_seq: 0,
            order: BTreeMap::new(),
            index: PreHashMap::with_capacity(capacity),
        }
    }

    /// Inserts `id` as the newest entry, evicting the oldest ones if full.
    /// Returns false if `id` was already present (its position is kept).
    pub fn add(&mut self, id: TransactionId) -> bool {
        if self.capacity == 0 || self.index.contains_key(&id) {
            return false;
        }
        while self.order.len() >= self.capacity {
            match self.order.pop_first() {
                Some((_, evicted)) => {
                    self.index.remove(&evicted);
                }
                None => break,
            }
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, id);
        self.index.insert(id, seq);
        true
    }

    pub fn remove(&mut self, id: &TransactionId) -> bool {
        match self.index.remove(id) {
            Some(seq) => {
                self.order.remove(&seq);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: &TransactionId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &TransactionId> {
        self.order.values()
    }

    pub fn nth(&self, n: usize) -> Option<TransactionId> {
        self.order.values().nth(n).copied()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.index.clear();
    }
}
