// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! # General description
//!
//! Tip selection over a tangle of transactions. A request for two
//! transactions to approve goes through the following steps:
//!
//! 1. an entry point is chosen, either genesis or a transaction found by
//!    backtracking from a recent tip until its cumulative weight reaches a
//!    threshold (`entry_point.rs`, `starting_tip.rs`)
//! 2. every transaction in the future set of the entry point is rated by
//!    cumulative weight (`rating.rs`)
//! 3. two weighted random walks descend from the entry point towards the tips,
//!    each approver drawn with probability `exp(alpha * (rating - max))`
//!    (`walker.rs`), skipping approvers rejected by `walk_validator.rs`
//! 4. the two tips are checked for ledger consistency (`ledger.rs`)
//!
//! The same walks estimate the confidence of a transaction as the share of
//! walks ending on a tip that references it (`reference_checker.rs`).
//!
//! `recycler.rs` runs a background thread that periodically wipes the tangle,
//! and `stats.rs` holds the read-only helpers used for node statistics.

#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

#[macro_use]
extern crate tangle_logging;

mod dag;
mod entry_point;
mod ledger;
mod rating;
mod recycler;
mod reference_checker;
mod run;
mod starting_tip;
mod stats;
mod tail_finder;
mod tip_selector;
mod walk_validator;
mod walker;

pub use entry_point::{CumulativeWeightEntryPointSelector, GenesisEntryPointSelector};
pub use ledger::PermissiveLedgerValidator;
pub use rating::CumulativeWeightCalculator;
pub use recycler::{millis_until_next_sunday, start_recycler, RecyclerManagerImpl};
pub use reference_checker::ReferenceCheckerImpl;
pub use run::start_tip_selection;
pub use starting_tip::ConnectedComponentsStartingTipSelector;
pub use stats::{LagCalculator, RecentTransactionsGetter, TimeWindowedApproveeCounter};
pub use tail_finder::TailFinderImpl;
pub use tip_selector::TipSelectorImpl;
pub use walk_validator::WalkValidatorImpl;
pub use walker::{transition_weight, WalkerAlpha};

#[cfg(test)]
mod tests;
