// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::TangleDbResult;
use tangle_models::prehash::PreHashSet;
use tangle_models::{Transaction, TransactionId};

/// Read access to the tangle, plus the wholesale reset used by recycling.
///
/// The genesis transaction always exists and approves nothing.
#[cfg_attr(any(test, feature = "test-exports"), mockall::automock)]
pub trait TangleDb: Send + Sync {
    /// true if the content of `id` is locally stored
    fn transaction_exists(&self, id: &TransactionId) -> TangleDbResult<bool>;

    /// Load a transaction. When only the id is known, a placeholder record
    /// is returned (see `Transaction::placeholder`).
    fn load_transaction(&self, id: &TransactionId) -> TangleDbResult<Transaction>;

    /// Ids of the transactions whose trunk or branch is `id`
    fn load_approvers(&self, id: &TransactionId) -> TangleDbResult<PreHashSet<TransactionId>>;

    /// Drop every stored transaction except genesis
    fn clear(&self) -> TangleDbResult<()>;
}
