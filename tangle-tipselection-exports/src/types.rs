// Copyright (c) 2022 MASSA LABS <info@massa.net>

use serde::{Deserialize, Serialize};
use tangle_models::prehash::{CapacityAllocator, PreHashMap, PreHashSet};
use tangle_models::{Address, TransactionId};

/// Cumulative weight of every transaction of the subtangle above an entry point
pub type RatingMap = PreHashMap<TransactionId, usize>;

/// Balance changes accumulated along a walk
pub type BalanceDiff = PreHashMap<Address, i64>;

/// State of one walk: the transactions already accepted and their
/// combined balance effect. Owned by a single walk, dropped at its end.
#[derive(Debug, Default, Clone)]
pub struct WalkState {
    /// transactions whose effect is already in `diff`
    pub approved: PreHashSet<TransactionId>,
    /// accumulated balance changes
    pub diff: BalanceDiff,
}

impl WalkState {
    /// empty state
    pub fn new() -> Self {
        WalkState {
            approved: PreHashSet::with_capacity(16),
            diff: BalanceDiff::with_capacity(16),
        }
    }
}

/// Reason a walk step was refused. Only reported in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, displaydoc::Display)]
pub enum WalkRejection {
    /// content not available locally
    Placeholder,
    /// not the tail of its bundle
    NotTail,
    /// not solid
    NotSolid,
    /// inconsistent with the balance changes of the walk
    InconsistentDiff,
}

/// The pair of transactions a new transaction should approve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionsToApprove {
    /// trunk
    pub trunk: TransactionId,
    /// branch
    pub branch: TransactionId,
}
