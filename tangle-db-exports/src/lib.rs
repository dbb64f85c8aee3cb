// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Storage interface consumed by tip selection.
//!
//! The tangle store owns the transaction records and the reverse
//! (approver) index. Tip selection only reads from it; the database
//! recycler is the single caller of `clear`.

#![warn(missing_docs)]

mod controller;
mod error;
mod settings;

pub use controller::*;
pub use error::*;
pub use settings::*;
