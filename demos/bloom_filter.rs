//! Example demonstrating bitsieve usage
//!
//! Shows capacity planning, membership tests, and persisting a filter to a
//! file and reading it back.

use bitsieve::{false_positive_rate, BloomFilter, Filter, FilterConfig, HashType, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::sync::Arc;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== bitsieve Bloom Filter Example ===\n");

    // Example 1: Plan the filter before building it
    let config = example_capacity_planning();

    // Example 2: Insert and query
    let filter = example_membership(config)?;

    // Example 3: Persist and restore
    example_persistence(&filter)?;

    Ok(())
}

/// Example 1: Sizing a filter without an instance
fn example_capacity_planning() -> Arc<FilterConfig> {
    println!("--- Example 1: Capacity Planning ---");

    let config = FilterConfig::for_capacity(1000, 0.01).with_hash_type(HashType::Murmur);
    println!(
        "1000 keys at 1%: {} bits ({} bytes), {} hash functions",
        config.vector_size(),
        config.num_bytes(),
        config.hash_count()
    );

    for n in [500u64, 1000, 2000, 5000] {
        let rate = false_positive_rate(config.hash_count(), config.vector_size(), n);
        println!("  expected false positive rate with {:>5} keys: {:.5}", n, rate);
    }

    println!();
    Arc::new(config)
}

/// Example 2: Using the filter
fn example_membership(config: Arc<FilterConfig>) -> Result<BloomFilter> {
    println!("--- Example 2: Membership ---");

    let mut filter = BloomFilter::new(config);

    let keys = vec!["user:1001", "user:1002", "user:1003", "user:1004", "user:1005"];
    filter.add_all(&keys)?;

    println!("Added {} keys to bloom filter", filter.num_elements());
    println!("Bits set: {}/{}", filter.bits_set(), filter.vector_size());

    println!("\nTesting membership:");
    for key in &keys {
        println!("  {} exists? {}", key, filter.may_contain(key.as_bytes())?);
    }

    println!("\nTesting non-existent keys:");
    for key in ["user:9001", "user:9002", "user:9003"] {
        println!("  {} exists? {} (should usually be false)", key, filter.may_contain(key.as_bytes())?);
    }

    println!("\nEstimated false positive rate: {:.6}", filter.false_positive_rate());
    println!();
    Ok(filter)
}

/// Example 3: Writing the filter to disk
fn example_persistence(filter: &BloomFilter) -> Result<()> {
    println!("--- Example 3: Persistence ---");

    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("users.bloom");

    {
        let mut writer = BufWriter::new(File::create(&path)?);
        filter.write_to(&mut writer)?;
        writer.flush()?;
    }
    println!("Wrote {} bytes to {:?}", std::fs::metadata(&path)?.len(), path);

    let mut reader = BufReader::new(File::open(&path)?);
    let restored = BloomFilter::read_from(&mut reader)?;

    println!(
        "Restored filter: {} elements, user:1003 exists? {}",
        restored.num_elements(),
        restored.may_contain(b"user:1003")?
    );

    println!();
    Ok(())
}
