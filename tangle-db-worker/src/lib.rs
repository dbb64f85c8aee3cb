// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! # General description
//!
//! `MemoryTangle` keeps the whole tangle in RAM:
//! * the transaction records, keyed by id
//! * the approver index: for each id, the ids whose trunk or branch is that id
//!
//! Both maps live behind one `RwLock` so that a record and its approver
//! edges are always observed together.
//!
//! Ids that are referenced as trunk or branch but were never stored are
//! answered with placeholder records. The genesis record is synthesized
//! and can never be stored or modified.

#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

mod memory_tangle;

pub use memory_tangle::MemoryTangle;
