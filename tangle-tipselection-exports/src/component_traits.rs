// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Stages of a tip selection.
//!
//! A selection picks a starting tip, backtracks from it to an entry point,
//! rates the subtangle above the entry point and walks it twice. Each stage
//! is a trait so that the engine can be assembled from any implementation.

use crate::{BalanceDiff, RatingMap, TipSelResult};
use tangle_models::prehash::PreHashSet;
use tangle_models::TransactionId;

/// Picks the tip the entry point search starts from
#[cfg_attr(any(test, feature = "test-exports"), mockall::automock)]
pub trait StartingTipSelector: Send + Sync {
    /// a tip of the main part of the tangle
    fn get_starting_tip(&self) -> TipSelResult<TransactionId>;
}

/// Picks the transaction random walks start from
#[cfg_attr(any(test, feature = "test-exports"), mockall::automock)]
pub trait EntryPointSelector: Send + Sync {
    /// entry point of the next walks
    fn get_entry_point(&self) -> TipSelResult<TransactionId>;
}

/// Cumulative weights
#[cfg_attr(any(test, feature = "test-exports"), mockall::automock)]
pub trait RatingCalculator: Send + Sync {
    /// Rates `entry_point` and every transaction approving it, up to the
    /// configured maximum subtangle size. A rating counts the transaction
    /// itself and saturates at the configured maximum future set size.
    fn calculate(&self, entry_point: &TransactionId) -> TipSelResult<RatingMap>;

    /// Rating of `id` alone: 1 plus the size of its future set. Counting
    /// stops once the rating exceeds the configured maximum subtangle size.
    fn calculate_single(&self, id: &TransactionId) -> TipSelResult<usize>;
}

/// Bundle tail resolution
#[cfg_attr(any(test, feature = "test-exports"), mockall::automock)]
pub trait TailFinder: Send + Sync {
    /// The index 0 transaction of the bundle `id` belongs to,
    /// `None` if it cannot be resolved locally.
    fn find_tail(&self, id: &TransactionId) -> TipSelResult<Option<TransactionId>>;
}

/// Gate of every step of one walk. Keeps the walk state.
#[cfg_attr(any(test, feature = "test-exports"), mockall::automock)]
pub trait WalkValidator {
    /// true if the walk may move to `id`; the walk state is updated on success
    fn is_valid(&mut self, id: &TransactionId) -> TipSelResult<bool>;
}

/// Random walk towards the tips
pub trait Walker: Send + Sync {
    /// Walks from `entry_point` through the rated approvers until no valid
    /// approver is left and returns the last position.
    fn walk(
        &self,
        entry_point: &TransactionId,
        ratings: &RatingMap,
        validator: &mut dyn WalkValidator,
    ) -> TipSelResult<TransactionId>;
}

/// Transitive approval
#[cfg_attr(any(test, feature = "test-exports"), mockall::automock)]
pub trait ReferenceChecker: Send + Sync {
    /// true if `from` directly or indirectly approves `to`
    fn does_reference(&self, from: &TransactionId, to: &TransactionId) -> TipSelResult<bool>;
}

/// Ledger consistency service
#[cfg_attr(any(test, feature = "test-exports"), mockall::automock)]
pub trait LedgerValidator: Send + Sync {
    /// Tries to merge the balance effect of `tip` and its unapproved past
    /// into `diff`. On success `approved` and `diff` are updated and true is
    /// returned; on a double spend nothing is modified and false is returned.
    fn update_diff(
        &self,
        approved: &mut PreHashSet<TransactionId>,
        diff: &mut BalanceDiff,
        tip: &TransactionId,
    ) -> TipSelResult<bool>;

    /// true if the combined past of `tips` is consistent
    fn check_consistency(&self, tips: &[TransactionId]) -> TipSelResult<bool>;
}
