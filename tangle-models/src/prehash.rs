// Copyright (c) 2022 MASSA LABS <info@massa.net>

use std::collections::{HashMap, HashSet};
use std::convert::TryInto;
use std::hash::{BuildHasherDefault, Hasher};
use std::marker::PhantomData;

/// Marker for types whose `Hash` implementation feeds already uniformly
/// distributed bytes to the hasher (their last write is a hash digest).
pub trait PreHashed {}

/// Hasher that keeps the last 8 bytes written to it.
/// Only sound for `PreHashed` keys.
pub struct HashMapper<T: PreHashed> {
    source: PhantomData<T>,
    hash: u64,
}

impl<T: PreHashed> Default for HashMapper<T> {
    #[inline]
    fn default() -> Self {
        HashMapper {
            source: PhantomData,
            hash: 0,
        }
    }
}

impl<T: PreHashed> Hasher for HashMapper<T> {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        // digests are at least 8 bytes long, shorter writes are length prefixes
        if let Some(start) = bytes.len().checked_sub(8) {
            if let Ok(tail) = bytes[start..].try_into() {
                self.hash = u64::from_ne_bytes(tail);
            }
        }
    }
}

/// `BuildHasher` for `HashMapper`
pub type BuildHashMapper<T> = BuildHasherDefault<HashMapper<T>>;

/// `HashMap` using the key's own digest as hash
pub type PreHashMap<K, V> = HashMap<K, V, BuildHashMapper<K>>;

/// `HashSet` using the element's own digest as hash
pub type PreHashSet<T> = HashSet<T, BuildHashMapper<T>>;

/// Allocate a prehashed container with a given capacity
pub trait CapacityAllocator {
    /// allocate with capacity
    fn with_capacity(capacity: usize) -> Self;
}

impl<K: PreHashed, V> CapacityAllocator for PreHashMap<K, V> {
    fn with_capacity(capacity: usize) -> Self {
        HashMap::with_capacity_and_hasher(capacity, BuildHashMapper::default())
    }
}

impl<T: PreHashed> CapacityAllocator for PreHashSet<T> {
    fn with_capacity(capacity: usize) -> Self {
        HashSet::with_capacity_and_hasher(capacity, BuildHashMapper::default())
    }
}
