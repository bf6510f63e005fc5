//! Filter implementations for fast, approximate membership checks.
//!
//! A filter answers "might this key be in the set?" so callers can skip an
//! expensive exact lookup when the answer is a definite no.

pub mod bloom;

pub use bloom::{false_positive_rate, BloomFilter};

/// Filter trait for key membership checking
pub trait Filter {
    /// Check if a key may exist (can have false positives).
    ///
    /// Fails with `InvalidArgument` for an empty key.
    fn may_contain(&self, key: &[u8]) -> crate::Result<bool>;

    /// Add a key to the filter.
    ///
    /// Fails with `InvalidArgument` for an empty key, leaving the filter untouched.
    fn add(&mut self, key: &[u8]) -> crate::Result<()>;

    /// Get the serialized representation of the filter
    fn encode(&self) -> Vec<u8>;

    /// Create a filter from serialized data
    fn decode(data: &[u8]) -> crate::Result<Self>
    where
        Self: Sized;
}
