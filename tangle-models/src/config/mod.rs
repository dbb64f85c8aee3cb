// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Node configuration defaults.
//!
//! The values in `constants` are only meant to be read from the `config.rs`
//! or `settings.rs` files of each crate, which then pass them down to the
//! workers through their `cfg` parameter.

/// default values
pub mod constants;

pub use constants::*;
