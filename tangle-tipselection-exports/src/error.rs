// Copyright (c) 2022 MASSA LABS <info@massa.net>

use displaydoc::Display;
use tangle_db_exports::TangleDbError;
use tangle_models::TransactionId;
use thiserror::Error;

/// tip selection result
pub type TipSelResult<T, E = TipSelError> = core::result::Result<T, E>;

/// Failures of a tip selection call. None of them leaves shared state modified.
#[non_exhaustive]
#[derive(Display, Error, Debug)]
pub enum TipSelError {
    /// storage error: {0}
    DbError(#[from] TangleDbError),
    /// transaction {0} is not available locally
    MissingData(TransactionId),
    /// no tip belongs to the largest connected component
    NoTipInLargestComponent,
    /// subtangle of entry point {entry_point} is too large: {size} transactions
    SubtangleTooLarge {
        /// rejected entry point
        entry_point: TransactionId,
        /// size of its future set
        size: usize,
    },
    /// no tips referencing {0} were found within the walk budget
    SelectionExhausted(TransactionId),
    /// entry point {0} does not pass walk validation
    EntryPointInconsistent(TransactionId),
    /// the selected tips are not consistent with each other
    TipsNotConsistent,
    /// invalid configuration: {0}
    InvalidConfig(String),
    /// container inconsistency: {0}
    ContainerInconsistency(String),
}
