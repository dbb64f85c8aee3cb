// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::error::ModelsError;
use crate::prehash::PreHashed;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::str::FromStr;
use tangle_hash::Hash;

const TRANSACTIONID_PREFIX: char = 'T';

/// Transaction identifier: the hash of the transaction content.
///
/// `TransactionId::genesis()` is the reserved root of the tangle. It is never
/// the hash of stored data; every chain of trunk/branch references ends there.
#[derive(
    Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct TransactionId(Hash);

impl PreHashed for TransactionId {}

impl TransactionId {
    /// Wrap a hash
    pub fn new(hash: Hash) -> Self {
        TransactionId(hash)
    }

    /// The root sentinel
    pub const fn genesis() -> Self {
        TransactionId(Hash::ZERO)
    }

    /// true if this is the root sentinel
    pub fn is_genesis(&self) -> bool {
        self.0.is_zero()
    }

    /// underlying hash
    pub fn get_hash(&self) -> &Hash {
        &self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            TRANSACTIONID_PREFIX,
            bs58::encode(self.0.to_bytes()).with_check().into_string()
        )
    }
}

impl std::fmt::Debug for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for TransactionId {
    type Err = ModelsError;
    /// ## Example
    /// ```rust
    /// # use tangle_hash::Hash;
    /// # use std::str::FromStr;
    /// # use tangle_models::transaction_id::TransactionId;
    /// let id = TransactionId::new(Hash::compute_from(b"test"));
    /// let ser = id.to_string();
    /// assert_eq!(TransactionId::from_str(&ser).unwrap(), id);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match chars.next() {
            Some(prefix) if prefix == TRANSACTIONID_PREFIX => {
                let data = chars.collect::<String>();
                let decoded_bs58_check = bs58::decode(data)
                    .with_check(None)
                    .into_vec()
                    .map_err(|_| ModelsError::TransactionIdParseError)?;
                Ok(TransactionId(Hash::from_slice(&decoded_bs58_check)?))
            }
            _ => Err(ModelsError::TransactionIdParseError),
        }
    }
}

impl From<Hash> for TransactionId {
    fn from(hash: Hash) -> Self {
        TransactionId(hash)
    }
}
