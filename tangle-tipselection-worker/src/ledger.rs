// Copyright (c) 2022 MASSA LABS <info@massa.net>

use tangle_models::prehash::PreHashSet;
use tangle_models::TransactionId;
use tangle_tipselection_exports::{BalanceDiff, LedgerValidator, TipSelResult};

/// Ledger service of nodes that do not track balances: every diff is
/// consistent. Accepted tips are still recorded as approved.
#[derive(Debug, Default, Clone)]
pub struct PermissiveLedgerValidator;

impl LedgerValidator for PermissiveLedgerValidator {
    fn update_diff(
        &self,
        approved: &mut PreHashSet<TransactionId>,
        _diff: &mut BalanceDiff,
        tip: &TransactionId,
    ) -> TipSelResult<bool> {
        approved.insert(*tip);
        Ok(true)
    }

    fn check_consistency(&self, _tips: &[TransactionId]) -> TipSelResult<bool> {
        Ok(true)
    }
}
