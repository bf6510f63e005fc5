//! Key-to-index hashing.
//!
//! A [`KeyHasher`] turns a key into `hash_count` bit indices in
//! `[0, vector_size)`. The hash function is picked once from a [`HashType`]
//! and stored as a plain function pointer.

pub mod fnv;
pub mod jenkins;

use crate::config::FilterConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

/// A seeded 32-bit hash function.
pub type HashFn = fn(&[u8], u32) -> u32;

/// Hash algorithms available to a filter. The discriminant is the id stored
/// in the serialized header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum HashType {
    /// Bob Jenkins' lookup3.
    Jenkins = 0,

    /// MurmurHash3, x86 32-bit variant.
    #[default]
    Murmur = 1,

    /// Seeded FNV-1a.
    Fnv = 2,
}

impl HashType {
    /// Convert from the header id.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(HashType::Jenkins),
            1 => Some(HashType::Murmur),
            2 => Some(HashType::Fnv),
            _ => None,
        }
    }

    /// The header id.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// The function implementing this algorithm.
    pub fn function(self) -> HashFn {
        match self {
            HashType::Jenkins => jenkins::hash,
            HashType::Murmur => murmur_hash,
            HashType::Fnv => fnv::hash,
        }
    }
}

impl fmt::Display for HashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HashType::Jenkins => "jenkins",
            HashType::Murmur => "murmur",
            HashType::Fnv => "fnv",
        };
        f.write_str(name)
    }
}

impl FromStr for HashType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "jenkins" => Ok(HashType::Jenkins),
            "murmur" => Ok(HashType::Murmur),
            "fnv" => Ok(HashType::Fnv),
            other => Err(Error::invalid_argument(format!("unknown hash type: {}", other))),
        }
    }
}

/// MurmurHash3 x86_32 over an in-memory key.
fn murmur_hash(key: &[u8], seed: u32) -> u32 {
    match murmur3::murmur3_32(&mut Cursor::new(key), seed) {
        Ok(hash) => hash,
        // The only error source is the reader, and a Cursor over a slice never fails
        Err(e) => unreachable!("reading an in-memory key failed: {}", e),
    }
}

/// Produces the bit indices for a key.
#[derive(Clone, Copy)]
pub struct KeyHasher {
    hash_type: HashType,
    hash_fn: HashFn,
    num_hashes: u32,
    max_value: u32,
}

impl KeyHasher {
    /// Create a hasher for the given configuration.
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            hash_type: config.hash_type(),
            hash_fn: config.hash_type().function(),
            num_hashes: config.hash_count(),
            max_value: config.vector_size(),
        }
    }

    /// Compute `num_hashes` indices for `key`, lazily.
    ///
    /// Each hash is seeded with the previous one:
    /// h_0 = H(key, 0), h_i = H(key, h_{i-1}), index_i = h_i mod m
    ///
    /// Indices may repeat.
    pub fn hash<'a>(&self, key: &'a [u8]) -> Indices<'a> {
        Indices {
            key,
            hash_fn: self.hash_fn,
            max_value: self.max_value,
            seed: 0,
            remaining: self.num_hashes,
        }
    }

    /// The algorithm in use.
    pub fn hash_type(&self) -> HashType {
        self.hash_type
    }

    /// Number of indices produced per key.
    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }
}

/// Iterator over the bit indices of one key, returned by [`KeyHasher::hash`].
pub struct Indices<'a> {
    key: &'a [u8],
    hash_fn: HashFn,
    max_value: u32,
    seed: u32,
    remaining: u32,
}

impl Iterator for Indices<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.seed = (self.hash_fn)(self.key, self.seed);
        Some((self.seed % self.max_value) as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Indices<'_> {}

impl fmt::Debug for KeyHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyHasher")
            .field("hash_type", &self.hash_type)
            .field("num_hashes", &self.num_hashes)
            .field("max_value", &self.max_value)
            .finish()
    }
}
