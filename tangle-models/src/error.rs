// Copyright (c) 2022 MASSA LABS <info@massa.net>

use displaydoc::Display;
use thiserror::Error;

/// models result
pub type ModelsResult<T, E = ModelsError> = core::result::Result<T, E>;

/// models error
#[non_exhaustive]
#[derive(Display, Error, Debug)]
pub enum ModelsError {
    /// hash error: {0}
    HashError(#[from] tangle_hash::HashError),
    /// transaction id parsing error
    TransactionIdParseError,
    /// address parsing error
    AddressParseError,
}
