// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Types shared by every crate of the node: identifiers, the transaction
//! record and hash-keyed collections.

#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

/// addresses
pub mod address;
/// node-wide constants
pub mod config;
/// models error
pub mod error;
/// prehashed trait, for hash less hashmap/set
pub mod prehash;
/// transaction record
pub mod transaction;
/// transaction identifier
pub mod transaction_id;

pub use address::Address;
pub use error::ModelsError;
pub use transaction::Transaction;
pub use transaction_id::TransactionId;
