// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! # Overview
//!
//! This crate provides everything needed to talk to the tip selection
//! engine implemented in `tangle-tipselection-worker`.
//!
//! # Usage
//!
//! `start_tip_selection` (worker crate) returns a clonable `TipSelector`
//! answering `get_transactions_to_approve` and `get_confidences`.
//! `start_recycler` returns a non-clonable `RecyclerManager` stopping the
//! database recycling thread.
//!
//! # Architecture
//!
//! ## config.rs
//! Configuration of the engine and of the recycler.
//!
//! ## controller_traits.rs
//! The `TipSelector` and `RecyclerManager` traits.
//!
//! ## component_traits.rs
//! One trait per stage of the selection, so that each stage can be replaced
//! or mocked: starting tip, rating, tail, entry point, walk validation,
//! walk, reference check, and the ledger consistency service.
//!
//! ## error.rs
//! Error types of the crate.
//!
//! ## types.rs
//! Rating maps, walk state and the selection result.
//!
//! ## Test exports
//!
//! When the crate feature `test-exports` is enabled, mocks of the traits are
//! exported. See test_exports/mod.rs for details.

#![warn(missing_docs)]

mod component_traits;
mod config;
mod controller_traits;
mod error;
mod types;

pub use component_traits::{
    EntryPointSelector, LedgerValidator, RatingCalculator, ReferenceChecker,
    StartingTipSelector, TailFinder, WalkValidator, Walker,
};
pub use config::{BacktrackStrategy, EntryPointKind, RecyclerConfig, TipSelConfig};
pub use controller_traits::{RecyclerManager, TipSelector};
pub use error::{TipSelError, TipSelResult};
pub use types::{BalanceDiff, RatingMap, TransactionsToApprove, WalkRejection, WalkState};

#[cfg(any(test, feature = "test-exports"))]
pub mod test_exports;
