// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::address::Address;
use crate::transaction_id::TransactionId;
use serde::{Deserialize, Serialize};
use tangle_hash::Hash;

/// A transaction as seen by tip selection.
///
/// `trunk` and `branch` are the two approved transactions. Inside a bundle,
/// `trunk` of index `i` points to index `i + 1`; the transaction at index `0`
/// is the bundle tail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// identifier
    pub id: TransactionId,
    /// first approved transaction
    pub trunk: TransactionId,
    /// second approved transaction
    pub branch: TransactionId,
    /// bundle hash shared by all transactions of a bundle
    pub bundle: Hash,
    /// position in the bundle, `0` for the tail
    pub current_index: u32,
    /// position of the last transaction of the bundle
    pub last_index: u32,
    /// value moved by this transaction
    pub value: i64,
    /// address credited or debited by `value`
    pub address: Address,
    /// true if all ancestors are locally available
    pub solid: bool,
    /// local arrival time, in seconds
    pub arrival_time: u64,
    /// attachment time announced by the issuer, in seconds
    pub attachment_timestamp: u64,
    /// proof of work difficulty marker
    pub weight_magnitude: u8,
    /// true if only the id is known locally
    pub placeholder: bool,
}

impl Transaction {
    /// Record standing for a referenced transaction whose content is missing
    pub fn placeholder(id: TransactionId) -> Self {
        Transaction {
            id,
            trunk: TransactionId::genesis(),
            branch: TransactionId::genesis(),
            bundle: Hash::ZERO,
            current_index: 0,
            last_index: 0,
            value: 0,
            address: Address::null(),
            solid: false,
            arrival_time: 0,
            attachment_timestamp: 0,
            weight_magnitude: 0,
            placeholder: true,
        }
    }

    /// The genesis record: solid, its own parent, bundle tail
    pub fn genesis() -> Self {
        Transaction {
            solid: true,
            placeholder: false,
            ..Transaction::placeholder(TransactionId::genesis())
        }
    }

    /// true for the first transaction of a bundle
    pub fn is_tail(&self) -> bool {
        self.current_index == 0
    }

    /// trunk and branch, deduplicated
    pub fn parents(&self) -> Vec<TransactionId> {
        if self.trunk == self.branch {
            vec![self.trunk]
        } else {
            vec![self.trunk, self.branch]
        }
    }
}
