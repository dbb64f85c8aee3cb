// Copyright (c) 2022 MASSA LABS <info@massa.net>

use std::sync::Arc;
use tangle_db_exports::TangleDb;
use tangle_models::TransactionId;
use tangle_tipselection_exports::{TailFinder, TipSelResult};

/// Walks down a bundle: from index `i`, the transaction at index `i - 1` is
/// the approver carrying the same bundle hash.
pub struct TailFinderImpl {
    db: Arc<dyn TangleDb>,
}

impl TailFinderImpl {
    /// new tail finder reading from `db`
    pub fn new(db: Arc<dyn TangleDb>) -> Self {
        TailFinderImpl { db }
    }
}

impl TailFinder for TailFinderImpl {
    fn find_tail(&self, id: &TransactionId) -> TipSelResult<Option<TransactionId>> {
        if id.is_genesis() {
            return Ok(Some(*id));
        }
        let mut current = self.db.load_transaction(id)?;
        if current.placeholder {
            return Ok(None);
        }
        while current.current_index > 0 {
            let mut previous = None;
            for approver in self.db.load_approvers(&current.id)? {
                let candidate = self.db.load_transaction(&approver)?;
                if candidate.bundle == current.bundle
                    && candidate.current_index + 1 == current.current_index
                {
                    previous = Some(candidate);
                    break;
                }
            }
            match previous {
                Some(tx) => current = tx,
                None => return Ok(None),
            }
        }
        Ok(Some(current.id))
    }
}
