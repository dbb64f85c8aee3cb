// Copyright (c) 2022 MASSA LABS <info@massa.net>

use std::sync::Arc;
use tangle_db_exports::TangleDb;
use tangle_models::TransactionId;
use tangle_tipselection_exports::{
    LedgerValidator, TipSelResult, WalkRejection, WalkState, WalkValidator,
};
use tracing::debug;

/// Accepts a step if the transaction is present, is a bundle tail, is solid
/// and keeps the balance changes of the walk consistent. Checks run in that
/// order and stop at the first failure.
pub struct WalkValidatorImpl {
    db: Arc<dyn TangleDb>,
    ledger: Arc<dyn LedgerValidator>,
    state: WalkState,
}

impl WalkValidatorImpl {
    /// validator with an empty walk state
    pub fn new(db: Arc<dyn TangleDb>, ledger: Arc<dyn LedgerValidator>) -> Self {
        WalkValidatorImpl {
            db,
            ledger,
            state: WalkState::new(),
        }
    }

    fn check(&mut self, id: &TransactionId) -> TipSelResult<Option<WalkRejection>> {
        let tx = self.db.load_transaction(id)?;
        if tx.placeholder {
            return Ok(Some(WalkRejection::Placeholder));
        }
        if !tx.is_tail() {
            return Ok(Some(WalkRejection::NotTail));
        }
        if !tx.solid {
            return Ok(Some(WalkRejection::NotSolid));
        }
        let WalkState { approved, diff } = &mut self.state;
        if !self.ledger.update_diff(approved, diff, id)? {
            return Ok(Some(WalkRejection::InconsistentDiff));
        }
        Ok(None)
    }
}

impl WalkValidator for WalkValidatorImpl {
    fn is_valid(&mut self, id: &TransactionId) -> TipSelResult<bool> {
        if id.is_genesis() {
            return Ok(true);
        }
        match self.check(id)? {
            Some(rejection) => {
                debug!("walk validation failed for {}: {}", id, rejection);
                Ok(false)
            }
            None => Ok(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::PermissiveLedgerValidator;
    use tangle_test_framework::{create_transaction, make_bundle, new_tangle, random_transaction_id};
    use tangle_tipselection_exports::test_exports::MockLedgerValidator;

    #[test]
    fn test_rejections() {
        let db = new_tangle();
        let genesis = TransactionId::genesis();
        let mut validator = WalkValidatorImpl::new(db.clone(), Arc::new(PermissiveLedgerValidator));

        assert!(validator.is_valid(&genesis).unwrap());
        assert!(!validator.is_valid(&random_transaction_id()).unwrap());

        let bundle = make_bundle(&db, genesis, genesis, 2);
        assert!(validator.is_valid(&bundle[0]).unwrap());
        assert!(!validator.is_valid(&bundle[1]).unwrap());

        let mut unsolid = create_transaction(genesis, genesis);
        unsolid.solid = false;
        let unsolid_id = unsolid.id;
        db.store(unsolid).unwrap();
        assert!(!validator.is_valid(&unsolid_id).unwrap());
    }

    #[test]
    fn test_ledger_is_consulted_last() {
        let db = new_tangle();
        let genesis = TransactionId::genesis();
        let good = create_transaction(genesis, genesis);
        let conflicting = create_transaction(genesis, genesis);
        let (good_id, conflicting_id) = (good.id, conflicting.id);
        db.store(good).unwrap();
        db.store(conflicting).unwrap();
        let mut not_tail = create_transaction(genesis, genesis);
        not_tail.current_index = 1;
        not_tail.last_index = 1;
        let not_tail_id = not_tail.id;
        db.store(not_tail).unwrap();

        let mut ledger = MockLedgerValidator::new();
        ledger
            .expect_update_diff()
            .withf(move |_, _, tip| *tip == good_id)
            .times(1)
            .returning(|approved, diff, tip| {
                approved.insert(*tip);
                diff.insert(tangle_models::Address::null(), 10);
                Ok(true)
            });
        ledger
            .expect_update_diff()
            .withf(move |_, _, tip| *tip == conflicting_id)
            .times(1)
            .returning(|_, _, _| Ok(false));

        let mut validator = WalkValidatorImpl::new(db.clone(), Arc::new(ledger));
        assert!(validator.is_valid(&good_id).unwrap());
        assert!(!validator.is_valid(&conflicting_id).unwrap());
        // rejected before reaching the ledger
        assert!(!validator.is_valid(&not_tail_id).unwrap());
        assert!(validator.state.approved.contains(&good_id));
        assert_eq!(validator.state.diff.len(), 1);
    }
}
