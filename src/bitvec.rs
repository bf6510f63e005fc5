//! Packed, fixed-length bit vector backing the Bloom filter.
//!
//! Bit `i` lives in byte `i / 8` at position `i % 8`, least significant bit
//! first. The raw byte backing is the serialized form.

use crate::error::{Error, Result};

/// A fixed-length array of bits packed into bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitVector {
    /// Packed storage, `ceil(len / 8)` bytes
    bytes: Vec<u8>,
    /// Logical number of bits
    len: usize,
}

impl BitVector {
    /// Create an all-zero vector of `len` bits.
    pub fn new(len: usize) -> Self {
        Self {
            bytes: vec![0u8; Self::bytes_for(len)],
            len,
        }
    }

    /// Rebuild a vector of `len` bits from its raw backing.
    ///
    /// `raw` must hold exactly `ceil(len / 8)` bytes. The bit pattern itself
    /// is taken as-is.
    pub fn from_raw(len: usize, raw: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = raw.into();
        let expected = Self::bytes_for(len);
        if bytes.len() != expected {
            return Err(Error::invalid_argument(format!(
                "bit vector of {} bits needs {} bytes, got {}",
                len,
                expected,
                bytes.len()
            )));
        }

        Ok(Self { bytes, len })
    }

    /// Number of bytes needed to hold `len` bits.
    pub fn bytes_for(len: usize) -> usize {
        (len + 7) / 8
    }

    /// Set the bit at `index`. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize) {
        if index < self.len {
            self.bytes[index / 8] |= 1 << (index % 8);
        }
    }

    /// Check the bit at `index`. Out-of-range indices read as unset.
    pub fn get(&self, index: usize) -> bool {
        if index < self.len {
            (self.bytes[index / 8] & (1 << (index % 8))) != 0
        } else {
            false
        }
    }

    /// Set every logical bit.
    pub fn fill(&mut self) {
        self.bytes.fill(0xff);
        let tail = self.len % 8;
        if tail != 0 {
            if let Some(last) = self.bytes.last_mut() {
                *last = (1u8 << tail) - 1;
            }
        }
    }

    /// Number of set bits within the logical length.
    pub fn count_ones(&self) -> usize {
        let tail = self.len % 8;
        let mut count: usize = self.bytes.iter().map(|b| b.count_ones() as usize).sum();
        if tail != 0 {
            if let Some(last) = self.bytes.last() {
                count -= (last >> tail).count_ones() as usize;
            }
        }
        count
    }

    /// Raw packed backing, serialization-ready.
    pub fn as_raw(&self) -> &[u8] {
        &self.bytes
    }

    /// Logical number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the vector holds no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
