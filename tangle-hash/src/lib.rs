// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Fixed-width content hash used to identify transactions, bundles and addresses.

#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]
pub use error::HashError;
pub use hash::Hash;
pub use settings::HASH_SIZE_BYTES;

mod error;
mod hash;
mod settings;
