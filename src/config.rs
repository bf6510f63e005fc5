//! Filter configuration shared by every filter of the same family.
//!
//! A [`FilterConfig`] fixes the vector size, the number of hash functions and
//! the hash algorithm. It is immutable and meant to be shared behind an
//! `Arc`. It also owns the header that prefixes every serialized filter.

use crate::codec;
use crate::error::{Error, Result};
use crate::hash::HashType;
use bytes::BufMut;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Version tag written at the start of every header.
pub const HEADER_VERSION: i32 = -1;

/// Size of a versioned header in bytes.
///
/// Format (big-endian):
/// ```text
/// [version: i32][hash_count: i32][hash_type: u8][vector_size: i32]
/// ```
pub const HEADER_SIZE: usize = 13;

/// Default bits per key when sizing by key count.
pub const DEFAULT_BITS_PER_KEY: usize = 10;

/// Minimum vector size chosen by the sizing helpers.
const MIN_VECTOR_SIZE: usize = 64;

/// Largest hash count a configuration or header may carry.
pub const MAX_HASH_COUNT: u32 = 255;

/// Upper bound on hash count chosen by the sizing helpers.
const MAX_PLANNED_HASH_COUNT: u32 = 30;

/// Immutable configuration of a Bloom filter family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFilterConfig")]
pub struct FilterConfig {
    /// Number of bits in the vector (m).
    vector_size: u32,
    /// Number of hash indices per key (k).
    hash_count: u32,
    /// Hash algorithm.
    hash_type: HashType,
}

/// Unvalidated form read by serde before range checks.
#[derive(Deserialize)]
struct RawFilterConfig {
    vector_size: u32,
    hash_count: u32,
    #[serde(default)]
    hash_type: HashType,
}

impl TryFrom<RawFilterConfig> for FilterConfig {
    type Error = Error;

    fn try_from(raw: RawFilterConfig) -> Result<Self> {
        Self::new(raw.vector_size, raw.hash_count, raw.hash_type)
    }
}

impl FilterConfig {
    /// Creates a configuration.
    ///
    /// `vector_size` must be in `1..=i32::MAX` so it fits the header, and
    /// `hash_count` in `1..=`[`MAX_HASH_COUNT`].
    pub fn new(vector_size: u32, hash_count: u32, hash_type: HashType) -> Result<Self> {
        Self::check_range("vector size", vector_size, i32::MAX as u32)?;
        Self::check_range("hash count", hash_count, MAX_HASH_COUNT)?;
        Ok(Self {
            vector_size,
            hash_count,
            hash_type,
        })
    }

    /// Configuration sized for `expected_keys` at a target false positive rate.
    ///
    /// m = -n * ln(p) / (ln 2)^2, k = (m / n) * ln 2
    pub fn for_capacity(expected_keys: usize, false_positive_rate: f64) -> Self {
        if expected_keys == 0 {
            return Self::sized(MIN_VECTOR_SIZE, 1);
        }

        let n = expected_keys as f64;
        // Clamp to reasonable range
        let p = false_positive_rate.clamp(0.0001, 0.9999);
        let ln2 = 2.0_f64.ln();

        let num_bits = ((-n * p.ln() / (ln2 * ln2)).ceil() as usize).max(MIN_VECTOR_SIZE);
        let num_hashes = ((num_bits as f64 / n) * ln2).round() as u32;

        Self::sized(num_bits, num_hashes)
    }

    /// Configuration with a fixed number of bits per key.
    pub fn with_bits_per_key(num_keys: usize, bits_per_key: usize) -> Self {
        let num_bits = num_keys.saturating_mul(bits_per_key).max(MIN_VECTOR_SIZE);
        // 0.69 ~ ln(2)
        let num_hashes = ((bits_per_key as f64) * 0.69).round() as u32;

        Self::sized(num_bits, num_hashes)
    }

    /// Configuration with [`DEFAULT_BITS_PER_KEY`].
    pub fn default_with_keys(num_keys: usize) -> Self {
        Self::with_bits_per_key(num_keys, DEFAULT_BITS_PER_KEY)
    }

    fn sized(num_bits: usize, num_hashes: u32) -> Self {
        Self {
            vector_size: num_bits.min(i32::MAX as usize) as u32,
            hash_count: num_hashes.clamp(1, MAX_PLANNED_HASH_COUNT),
            hash_type: HashType::default(),
        }
    }

    fn check_range(what: &str, value: u32, max: u32) -> Result<()> {
        if value == 0 || value > max {
            return Err(Error::invalid_argument(format!(
                "{} must be in 1..={}, got {}",
                what, max, value
            )));
        }
        Ok(())
    }

    /// Returns a copy using `hash_type`.
    pub fn with_hash_type(mut self, hash_type: HashType) -> Self {
        self.hash_type = hash_type;
        self
    }

    /// Number of bits in the vector.
    pub fn vector_size(&self) -> u32 {
        self.vector_size
    }

    /// Number of hash indices per key.
    pub fn hash_count(&self) -> u32 {
        self.hash_count
    }

    /// Hash algorithm.
    pub fn hash_type(&self) -> HashType {
        self.hash_type
    }

    /// Bytes needed for the packed bit vector.
    pub fn num_bytes(&self) -> usize {
        (self.vector_size as usize + 7) / 8
    }

    /// Append the header to `buf`.
    pub fn put_header<B: BufMut>(&self, buf: &mut B) {
        buf.put_i32(HEADER_VERSION);
        buf.put_i32(self.hash_count as i32);
        buf.put_u8(self.hash_type.id());
        buf.put_i32(self.vector_size as i32);
    }

    /// Encode the header ([`HEADER_SIZE`] bytes).
    pub fn encode_header(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_SIZE);
        self.put_header(&mut buf);
        buf
    }

    /// Decode a header from the front of `data`.
    pub fn decode_header(mut data: &[u8]) -> Result<Self> {
        Self::read_header(&mut data)
    }

    /// Read a header from `reader`.
    ///
    /// A positive first word is a legacy unversioned header: it holds the hash
    /// count, the hash type is Jenkins and the vector size follows directly.
    pub fn read_header<R: Read>(reader: &mut R) -> Result<Self> {
        let version = codec::read_i32(reader, "header version")?;

        let (hash_count, hash_type) = if version > 0 {
            log::warn!("Reading legacy unversioned filter header (hash count {})", version);
            (version, HashType::Jenkins)
        } else if version == HEADER_VERSION {
            let hash_count = codec::read_i32(reader, "hash count")?;
            let id = codec::read_u8(reader, "hash type")?;
            let hash_type = HashType::from_u8(id)
                .ok_or_else(|| Error::invalid_header(format!("unknown hash type id: {}", id)))?;
            (hash_count, hash_type)
        } else {
            return Err(Error::invalid_header(format!("unsupported version: {}", version)));
        };

        let vector_size = codec::read_i32(reader, "vector size")?;

        if hash_count <= 0 || hash_count as u32 > MAX_HASH_COUNT {
            return Err(Error::invalid_header(format!("invalid hash count: {}", hash_count)));
        }
        if vector_size <= 0 {
            return Err(Error::invalid_header(format!("invalid vector size: {}", vector_size)));
        }

        Ok(Self {
            vector_size: vector_size as u32,
            hash_count: hash_count as u32,
            hash_type,
        })
    }
}
