//! # bitsieve - A Compact Bloom Filter
//!
//! bitsieve answers "is this key possibly in the set?" with no false negatives
//! and a tunable false positive rate. Storage engines and network services use
//! it to skip exact lookups that would certainly miss.
//!
//! ## Architecture
//!
//! - **FilterConfig**: immutable vector size, hash count and hash algorithm,
//!   shared by every filter of a family; owns the serialized header
//! - **KeyHasher**: turns a key into bit indices with the selected algorithm
//! - **BitVector**: packed fixed-length bit storage
//! - **BloomFilter**: insert, query, false positive estimate and the binary format
//!
//! ## Example Usage
//!
//! ```rust
//! use bitsieve::{BloomFilter, Filter, HashType};
//!
//! # fn main() -> Result<(), bitsieve::Error> {
//! let mut filter = BloomFilter::with_params(1024, 3, HashType::Murmur)?;
//! filter.add(b"user:1001")?;
//!
//! assert!(filter.may_contain(b"user:1001")?);
//!
//! let bytes = filter.encode();
//! let restored = BloomFilter::decode(&bytes)?;
//! assert!(restored.may_contain(b"user:1001")?);
//! assert_eq!(restored.num_elements(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! A filter is a plain synchronous value. Wrap it in a lock to share it
//! between threads that insert.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Module declarations
pub mod bitvec;
mod codec;
pub mod config;
pub mod error;
pub mod filter;
pub mod hash;

// Re-exports
pub use bitvec::BitVector;
pub use config::FilterConfig;
pub use error::{Error, Result};
pub use filter::{false_positive_rate, BloomFilter, Filter};
pub use hash::{HashType, KeyHasher};
