// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Bookkeeping of the transactions nobody approves yet.
//!
//! Tips are kept in two bounded, insertion-ordered sets: the non-solid ones
//! and the solid ones. A tip enters as non-solid, moves to the solid set when
//! solidification completes, and leaves both sets once it gets approved.
//! Inserting into a full set evicts its oldest entry.

#![warn(missing_docs)]

mod fifo;
mod tips_cache;

pub use tips_cache::TipsCache;
