// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::error::HashError;
use crate::settings::HASH_SIZE_BYTES;
use std::{convert::TryInto, str::FromStr};

/// Hash wrapper, the underlying hash function is blake3.
///
/// The all-zero value never results from hashing data in practice and is
/// reserved by the node for the root of the tangle.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash)]
pub struct Hash([u8; HASH_SIZE_BYTES]);

impl std::fmt::Display for Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_bs58_check())
    }
}

impl std::fmt::Debug for Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_bs58_check())
    }
}

impl Hash {
    /// The all-zero hash.
    pub const ZERO: Hash = Hash([0u8; HASH_SIZE_BYTES]);

    /// Compute a hash from data.
    ///
    /// # Example
    ///  ```
    /// # use tangle_hash::Hash;
    /// let hash = Hash::compute_from(&"hello world".as_bytes());
    /// ```
    pub fn compute_from(data: &[u8]) -> Self {
        Hash(*blake3::hash(data).as_bytes())
    }

    /// Returns true for the all-zero hash.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; HASH_SIZE_BYTES]
    }

    /// Serialize a Hash using bs58 encoding with checksum.
    pub fn to_bs58_check(&self) -> String {
        bs58::encode(self.to_bytes()).with_check().into_string()
    }

    /// Serialize a Hash as bytes.
    pub fn to_bytes(&self) -> &[u8; HASH_SIZE_BYTES] {
        &self.0
    }

    /// Convert into bytes.
    pub fn into_bytes(self) -> [u8; HASH_SIZE_BYTES] {
        self.0
    }

    /// Deserialize using bs58 encoding with checksum.
    ///
    /// # Example
    ///  ```
    /// # use tangle_hash::Hash;
    /// let hash = Hash::compute_from(&"hello world".as_bytes());
    /// let serialized: String = hash.to_bs58_check();
    /// let deserialized: Hash = Hash::from_bs58_check(&serialized).unwrap();
    /// assert_eq!(hash, deserialized);
    /// ```
    pub fn from_bs58_check(data: &str) -> Result<Hash, HashError> {
        let decoded_bs58_check = bs58::decode(data)
            .with_check(None)
            .into_vec()
            .map_err(|err| HashError::ParsingError(format!("{}", err)))?;
        Hash::from_slice(&decoded_bs58_check)
    }

    /// Deserialize a Hash from a byte array.
    pub fn from_bytes(data: &[u8; HASH_SIZE_BYTES]) -> Hash {
        Hash(*data)
    }

    /// Deserialize a Hash from a slice, failing if the size is wrong.
    pub fn from_slice(data: &[u8]) -> Result<Hash, HashError> {
        let bytes: [u8; HASH_SIZE_BYTES] =
            data.try_into().map_err(|_| HashError::WrongSize {
                expected: HASH_SIZE_BYTES,
                got: data.len(),
            })?;
        Ok(Hash(bytes))
    }
}

impl ::serde::Serialize for Hash {
    /// Human readable serializers get the bs58check string,
    /// binary ones get the raw bytes.
    fn serialize<S: ::serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if s.is_human_readable() {
            s.collect_str(&self.to_bs58_check())
        } else {
            s.serialize_bytes(self.to_bytes())
        }
    }
}

impl<'de> ::serde::Deserialize<'de> for Hash {
    fn deserialize<D: ::serde::Deserializer<'de>>(d: D) -> Result<Hash, D::Error> {
        if d.is_human_readable() {
            struct Base58CheckVisitor;

            impl<'de> ::serde::de::Visitor<'de> for Base58CheckVisitor {
                type Value = Hash;

                fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    formatter.write_str("an ASCII base58check string")
                }

                fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                where
                    E: ::serde::de::Error,
                {
                    Hash::from_bs58_check(v).map_err(E::custom)
                }
            }
            d.deserialize_str(Base58CheckVisitor)
        } else {
            struct BytesVisitor;

            impl<'de> ::serde::de::Visitor<'de> for BytesVisitor {
                type Value = Hash;

                fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    formatter.write_str("a bytestring")
                }

                fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
                where
                    E: ::serde::de::Error,
                {
                    Hash::from_slice(v).map_err(E::custom)
                }
            }

            d.deserialize_bytes(BytesVisitor)
        }
    }
}

impl FromStr for Hash {
    type Err = HashError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_bs58_check(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_json() {
        let hash = Hash::compute_from("hello world".as_bytes());
        let serialized = serde_json::to_string(&hash).unwrap();
        let deserialized: Hash = serde_json::from_str(&serialized).unwrap();
        assert_eq!(hash, deserialized)
    }

    #[test]
    fn test_zero_hash() {
        assert!(Hash::ZERO.is_zero());
        assert!(!Hash::compute_from(b"tx").is_zero());
        assert_eq!(Hash::from_bytes(&[0u8; HASH_SIZE_BYTES]), Hash::ZERO);
    }

    #[test]
    fn test_from_slice_wrong_size() {
        match Hash::from_slice(&[1, 2, 3]) {
            Err(HashError::WrongSize { expected, got }) => {
                assert_eq!(expected, HASH_SIZE_BYTES);
                assert_eq!(got, 3);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_bs58_rejects_garbage() {
        assert!(Hash::from_str("not-a-hash").is_err());
    }
}
