// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::error::ModelsError;
use crate::prehash::PreHashed;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::str::FromStr;
use tangle_hash::Hash;

const ADDRESS_PREFIX: char = 'A';

/// Ledger address, key of the balance diffs accumulated during a walk
#[derive(
    Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct Address(pub Hash);

impl PreHashed for Address {}

impl Address {
    /// address with no owner, used by zero-value transactions
    pub const fn null() -> Self {
        Address(Hash::ZERO)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", ADDRESS_PREFIX, self.0.to_bs58_check())
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for Address {
    type Err = ModelsError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match chars.next() {
            Some(prefix) if prefix == ADDRESS_PREFIX => {
                let data = chars.collect::<String>();
                Ok(Address(
                    Hash::from_bs58_check(&data).map_err(|_| ModelsError::AddressParseError)?,
                ))
            }
            _ => Err(ModelsError::AddressParseError),
        }
    }
}
