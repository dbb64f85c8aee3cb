// Copyright (c) 2022 MASSA LABS <info@massa.net>

use displaydoc::Display;
use tangle_models::TransactionId;
use thiserror::Error;

/// tangle db result
pub type TangleDbResult<T, E = TangleDbError> = core::result::Result<T, E>;

/// tangle db error
#[non_exhaustive]
#[derive(Display, Error, Debug, Clone)]
pub enum TangleDbError {
    /// transaction {id} has weight magnitude {got}, below the minimum {min}
    WeightMagnitudeTooLow {
        /// rejected transaction
        id: TransactionId,
        /// its weight magnitude
        got: u8,
        /// configured minimum
        min: u8,
    },
    /// the genesis transaction cannot be stored or modified
    GenesisOverwrite,
    /// transaction {0} is not stored
    NotFound(TransactionId),
    /// storage error: {0}
    StorageError(String),
}
