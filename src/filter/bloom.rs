//! Bloom Filter implementation.
//!
//! A space-efficient probabilistic data structure used to test whether an element
//! is a member of a set. False positive matches are possible, but false negatives are not.
//!
//! Serialized layout:
//! ```text
//! [header: FilterConfig][num_elements: u64 BE][bits: ceil(vector_size / 8) bytes]
//! ```
//! The bit region carries no length prefix; its size comes from the header.

use crate::bitvec::BitVector;
use crate::codec;
use crate::config::{FilterConfig, HEADER_SIZE};
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::hash::{HashType, KeyHasher};
use bytes::BufMut;
use std::io::{Read, Write};
use std::sync::Arc;

/// Estimated false positive rate for `num_elements` keys in a filter with
/// `vector_size` bits and `num_hashes` hash functions.
///
/// p = (1 - e^(-k*n/m))^k
///
/// This is the textbook approximation assuming independent, uniform hashes.
/// It drifts from the observed rate as the vector saturates and is meant for
/// sizing, not as a guarantee.
pub fn false_positive_rate(num_hashes: u32, vector_size: u32, num_elements: u64) -> f64 {
    let k = num_hashes as f64;
    let m = vector_size as f64;
    let n = num_elements as f64;

    (1.0 - (-k * n / m).exp()).powf(k)
}

/// BloomFilter provides probabilistic set membership testing.
///
/// # Example
/// ```
/// use bitsieve::filter::{BloomFilter, Filter};
///
/// # fn main() -> bitsieve::Result<()> {
/// let mut filter = BloomFilter::for_capacity(1000, 0.01); // 1000 keys, 1% false positive rate
/// filter.add(b"key1")?;
/// filter.add(b"key2")?;
///
/// assert!(filter.may_contain(b"key1")?);
/// assert!(filter.may_contain(b"key2")?);
/// // key3 might return true (false positive) or false
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BloomFilter {
    /// Shared configuration of this filter family
    config: Arc<FilterConfig>,
    /// Index generator derived from the configuration
    hasher: KeyHasher,
    /// Bit array for the bloom filter
    bits: BitVector,
    /// Number of successful inserts, duplicates included
    num_elements: u64,
}

impl BloomFilter {
    /// Create an empty filter for a shared configuration.
    pub fn new(config: Arc<FilterConfig>) -> Self {
        let bits = BitVector::new(config.vector_size() as usize);
        Self::from_parts(config, bits, 0)
    }

    /// Create an empty filter from explicit parameters.
    pub fn with_params(vector_size: u32, num_hashes: u32, hash_type: HashType) -> Result<Self> {
        let config = FilterConfig::new(vector_size, num_hashes, hash_type)?;
        Ok(Self::new(Arc::new(config)))
    }

    /// Create a filter sized for `expected_keys` at the given false positive rate.
    pub fn for_capacity(expected_keys: usize, false_positive_rate: f64) -> Self {
        Self::new(Arc::new(FilterConfig::for_capacity(expected_keys, false_positive_rate)))
    }

    fn from_parts(config: Arc<FilterConfig>, bits: BitVector, num_elements: u64) -> Self {
        let hasher = KeyHasher::new(&config);
        Self {
            config,
            hasher,
            bits,
            num_elements,
        }
    }

    fn check_key(key: &[u8]) -> Result<()> {
        if key.is_empty() {
            return Err(Error::invalid_argument("key cannot be empty"));
        }
        Ok(())
    }

    /// Add every key in `keys`.
    ///
    /// All keys are validated first; if any is empty nothing is inserted.
    pub fn add_all<I, K>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<[u8]>,
    {
        let keys: Vec<K> = keys.into_iter().collect();
        for key in &keys {
            Self::check_key(key.as_ref())?;
        }
        for key in &keys {
            self.insert_unchecked(key.as_ref());
        }
        Ok(())
    }

    fn insert_unchecked(&mut self, key: &[u8]) {
        for index in self.hasher.hash(key) {
            self.bits.set(index);
        }
        self.num_elements += 1;
    }

    /// Set every bit so that every key tests as present.
    ///
    /// The element count is left unchanged.
    pub fn accept_all(&mut self) {
        log::debug!("Filling all {} bits of bloom filter", self.bits.len());
        self.bits.fill();
    }

    /// Estimated false positive rate for the current element count.
    ///
    /// See [`false_positive_rate`]; this is an approximation and is not
    /// derived from the actual bit population.
    pub fn false_positive_rate(&self) -> f64 {
        false_positive_rate(self.num_hashes(), self.vector_size(), self.num_elements)
    }

    /// The shared configuration.
    pub fn config(&self) -> &Arc<FilterConfig> {
        &self.config
    }

    /// Get the number of bits in the filter.
    pub fn vector_size(&self) -> u32 {
        self.config.vector_size()
    }

    /// Get the number of hash functions used.
    pub fn num_hashes(&self) -> u32 {
        self.config.hash_count()
    }

    /// Get the hash algorithm.
    pub fn hash_type(&self) -> HashType {
        self.config.hash_type()
    }

    /// Number of inserts since creation or the last decode.
    pub fn num_elements(&self) -> u64 {
        self.num_elements
    }

    /// Get the size of the bit storage in bytes.
    pub fn size(&self) -> usize {
        self.bits.as_raw().len()
    }

    /// Number of bits currently set.
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Length of [`Filter::encode`] output for this filter.
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + 8 + self.size()
    }

    /// Write the serialized filter to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.encode())?;
        Ok(())
    }

    /// Read a filter from `reader`, consuming exactly its serialized length.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let config = FilterConfig::read_header(reader)?;
        let num_elements = codec::read_u64(reader, "element count")?;

        let mut raw = vec![0u8; config.num_bytes()];
        codec::read_exact(reader, &mut raw, "bit vector")?;
        let bits = BitVector::from_raw(config.vector_size() as usize, raw)?;

        log::debug!(
            "Decoded bloom filter: {} bits, {} hashes ({}), {} elements",
            config.vector_size(),
            config.hash_count(),
            config.hash_type(),
            num_elements
        );

        Ok(Self::from_parts(Arc::new(config), bits, num_elements))
    }
}

impl Filter for BloomFilter {
    /// Check if a key may exist in the set.
    ///
    /// Returns `true` if the key might exist (with possible false positives).
    /// Returns `false` if the key definitely does not exist (no false negatives).
    fn may_contain(&self, key: &[u8]) -> Result<bool> {
        Self::check_key(key)?;

        for index in self.hasher.hash(key) {
            if !self.bits.get(index) {
                return Ok(false); // Definitely not present
            }
        }

        Ok(true) // Possibly present (or false positive)
    }

    /// Add a key to the filter.
    fn add(&mut self, key: &[u8]) -> Result<()> {
        Self::check_key(key)?;
        self.insert_unchecked(key);
        Ok(())
    }

    /// Encode the filter to bytes for storage.
    fn encode(&self) -> Vec<u8> {
        let mut encoded = Vec::with_capacity(self.encoded_len());

        self.config.put_header(&mut encoded);
        encoded.put_u64(self.num_elements);
        encoded.put_slice(self.bits.as_raw());

        encoded
    }

    /// Decode a filter from bytes.
    ///
    /// Bytes past the end of the bit vector are ignored.
    fn decode(mut data: &[u8]) -> Result<Self> {
        Self::read_from(&mut data)
    }
}
