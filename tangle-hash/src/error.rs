// Copyright (c) 2022 MASSA LABS <info@massa.net>

use displaydoc::Display;
use thiserror::Error;

/// hash error
#[non_exhaustive]
#[derive(Display, Error, Debug, Clone)]
pub enum HashError {
    /// parsing error : {0}
    ParsingError(String),
    /// wrong size: expected {expected} bytes, got {got}
    WrongSize {
        /// expected byte count
        expected: usize,
        /// received byte count
        got: usize,
    },
}
