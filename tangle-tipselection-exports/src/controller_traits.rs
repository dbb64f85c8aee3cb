// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Interfaces of the running tip selection engine and of the recycler thread.

use crate::{TipSelResult, TransactionsToApprove};
use tangle_models::TransactionId;

/// Entry point of tip selection, consumed by the API layer
#[cfg_attr(any(test, feature = "test-exports"), mockall::automock)]
pub trait TipSelector: Send + Sync {
    /// Selects the trunk and branch a new transaction should approve.
    ///
    /// # Arguments
    /// * `reference`: if set, both returned transactions must (transitively) approve it
    ///
    /// Calls are serialized: at most one selection runs at a time.
    fn get_transactions_to_approve(
        &self,
        reference: Option<TransactionId>,
    ) -> TipSelResult<TransactionsToApprove>;

    /// For each candidate, the fraction of random walks ending on a tip
    /// that references it. Values are in `[0, 1]`.
    fn get_confidences(&self, candidates: &[TransactionId]) -> TipSelResult<Vec<f64>>;

    /// Returns a boxed clone of self.
    /// Useful to allow cloning `Box<dyn TipSelector>`.
    fn clone_box(&self) -> Box<dyn TipSelector>;
}

/// Allow cloning `Box<dyn TipSelector>`
/// Uses `TipSelector::clone_box` internally
impl Clone for Box<dyn TipSelector> {
    fn clone(&self) -> Box<dyn TipSelector> {
        self.clone_box()
    }
}

/// Recycler manager used to stop the recycler thread
pub trait RecyclerManager {
    /// Stop the recycler thread
    /// Note that we do not take self by value to consume it
    /// because it is not allowed to move out of Box<dyn RecyclerManager>
    fn stop(&mut self);
}
