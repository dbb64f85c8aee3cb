// Copyright (c) 2022 MASSA LABS <info@massa.net>

use parking_lot::RwLock;
use tangle_db_exports::{TangleDb, TangleDbConfig, TangleDbError, TangleDbResult};
use tangle_models::prehash::{CapacityAllocator, PreHashMap, PreHashSet};
use tangle_models::{Transaction, TransactionId};
use tracing::debug;

#[derive(Debug, Default)]
struct TangleStore {
    transactions: PreHashMap<TransactionId, Transaction>,
    approvers: PreHashMap<TransactionId, PreHashSet<TransactionId>>,
}

/// In-memory implementation of `TangleDb`
#[derive(Debug)]
pub struct MemoryTangle {
    config: TangleDbConfig,
    store: RwLock<TangleStore>,
}

impl MemoryTangle {
    /// Creates an empty tangle (only genesis exists)
    pub fn new(config: TangleDbConfig) -> Self {
        MemoryTangle {
            config,
            store: RwLock::new(TangleStore::default()),
        }
    }

    /// Stores a transaction and indexes it as an approver of its trunk and branch.
    /// Storing an already known id replaces its record and its approver edges.
    pub fn store(&self, transaction: Transaction) -> TangleDbResult<()> {
        if transaction.id.is_genesis() {
            return Err(TangleDbError::GenesisOverwrite);
        }
        if transaction.weight_magnitude < self.config.min_weight_magnitude {
            return Err(TangleDbError::WeightMagnitudeTooLow {
                id: transaction.id,
                got: transaction.weight_magnitude,
                min: self.config.min_weight_magnitude,
            });
        }
        let mut store = self.store.write();
        let previous_parents = store
            .transactions
            .get(&transaction.id)
            .map(Transaction::parents)
            .unwrap_or_default();
        for parent in previous_parents {
            if let Some(approvers) = store.approvers.get_mut(&parent) {
                approvers.remove(&transaction.id);
                if approvers.is_empty() {
                    store.approvers.remove(&parent);
                }
            }
        }
        for parent in transaction.parents() {
            store
                .approvers
                .entry(parent)
                .or_insert_with(|| PreHashSet::with_capacity(2))
                .insert(transaction.id);
        }
        debug!("storing transaction {}", transaction.id);
        store.transactions.insert(transaction.id, transaction);
        Ok(())
    }

    /// Sets the solid flag of a stored transaction
    pub fn update_solid(&self, id: &TransactionId, solid: bool) -> TangleDbResult<()> {
        self.modify(id, |tx| tx.solid = solid)
    }

    /// Sets the local arrival time of a stored transaction
    pub fn set_arrival_time(&self, id: &TransactionId, arrival_time: u64) -> TangleDbResult<()> {
        self.modify(id, |tx| tx.arrival_time = arrival_time)
    }

    /// Number of stored transactions, genesis excluded
    pub fn len(&self) -> usize {
        self.store.read().transactions.len()
    }

    /// true if nothing but genesis is known
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn modify<F: FnOnce(&mut Transaction)>(&self, id: &TransactionId, f: F) -> TangleDbResult<()> {
        if id.is_genesis() {
            return Err(TangleDbError::GenesisOverwrite);
        }
        let mut store = self.store.write();
        let tx = store
            .transactions
            .get_mut(id)
            .ok_or(TangleDbError::NotFound(*id))?;
        f(tx);
        Ok(())
    }
}

impl TangleDb for MemoryTangle {
    fn transaction_exists(&self, id: &TransactionId) -> TangleDbResult<bool> {
        Ok(id.is_genesis() || self.store.read().transactions.contains_key(id))
    }

    fn load_transaction(&self, id: &TransactionId) -> TangleDbResult<Transaction> {
        if id.is_genesis() {
            return Ok(Transaction::genesis());
        }
        Ok(self
            .store
            .read()
            .transactions
            .get(id)
            .cloned()
            .unwrap_or_else(|| Transaction::placeholder(*id)))
    }

    fn load_approvers(&self, id: &TransactionId) -> TangleDbResult<PreHashSet<TransactionId>> {
        Ok(self
            .store
            .read()
            .approvers
            .get(id)
            .cloned()
            .unwrap_or_default())
    }

    fn clear(&self) -> TangleDbResult<()> {
        let mut store = self.store.write();
        store.transactions.clear();
        store.approvers.clear();
        Ok(())
    }
}
