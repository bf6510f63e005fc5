//! Integration tests for BloomFilter membership behavior

use bitsieve::{false_positive_rate, BloomFilter, Error, Filter, FilterConfig, HashType};
use rand::Rng;
use std::sync::Arc;

const ALL_HASH_TYPES: [HashType; 3] = [HashType::Jenkins, HashType::Murmur, HashType::Fnv];

fn random_key<R: Rng>(rng: &mut R) -> Vec<u8> {
    let len = rng.random_range(1..32);
    (0..len).map(|_| rng.random::<u8>()).collect()
}

#[test]
fn test_small_filter_scenario() {
    for hash_type in ALL_HASH_TYPES {
        let mut filter = BloomFilter::with_params(64, 2, hash_type).unwrap();

        filter.add(b"a").unwrap();
        filter.add(b"b").unwrap();
        filter.add(b"c").unwrap();

        assert!(filter.may_contain(b"a").unwrap());
        assert!(filter.may_contain(b"b").unwrap());
        assert!(filter.may_contain(b"c").unwrap());

        // "d" may be a false positive, but the answer must not change
        let first = filter.may_contain(b"d").unwrap();
        for _ in 0..10 {
            assert_eq!(filter.may_contain(b"d").unwrap(), first);
        }

        assert_eq!(filter.num_elements(), 3);
    }
}

#[test]
fn test_no_false_negatives_random_keys() {
    let mut rng = rand::rng();

    for hash_type in ALL_HASH_TYPES {
        let config = FilterConfig::for_capacity(2000, 0.01).with_hash_type(hash_type);
        let mut filter = BloomFilter::new(Arc::new(config));

        let keys: Vec<Vec<u8>> = (0..2000).map(|_| random_key(&mut rng)).collect();
        for key in &keys {
            filter.add(key).unwrap();
        }

        // All added keys should be found (no false negatives)
        for key in &keys {
            assert!(filter.may_contain(key).unwrap(), "False negative for {:?} ({})", key, hash_type);
        }
        assert_eq!(filter.num_elements(), 2000);
    }
}

#[test]
fn test_observed_false_positive_rate() {
    let num_keys = 10000;
    let target_fp_rate = 0.01; // 1%

    for hash_type in ALL_HASH_TYPES {
        let config = FilterConfig::for_capacity(num_keys, target_fp_rate).with_hash_type(hash_type);
        let mut filter = BloomFilter::new(Arc::new(config));

        for i in 0..num_keys {
            filter.add(format!("key{}", i).as_bytes()).unwrap();
        }

        let test_keys = 10000;
        let mut false_positives = 0;
        for i in num_keys..(num_keys + test_keys) {
            if filter.may_contain(format!("key{}", i).as_bytes()).unwrap() {
                false_positives += 1;
            }
        }

        let actual_fp_rate = false_positives as f64 / test_keys as f64;
        println!("{}: estimated {:.4}, actual {:.4}", hash_type, filter.false_positive_rate(), actual_fp_rate);

        // Allow some margin due to randomness
        assert!(
            actual_fp_rate < target_fp_rate * 3.0,
            "False positive rate too high for {}: {:.4}",
            hash_type,
            actual_fp_rate
        );
    }
}

#[test]
fn test_population_is_monotonic() {
    let mut filter = BloomFilter::with_params(512, 4, HashType::Murmur).unwrap();
    let mut previous = filter.bits_set();

    for i in 0..200 {
        filter.add(format!("item-{}", i).as_bytes()).unwrap();
        let now = filter.bits_set();
        assert!(now >= previous);
        previous = now;
    }
}

#[test]
fn test_inserted_keys_survive_later_inserts() {
    let mut filter = BloomFilter::with_params(256, 3, HashType::Jenkins).unwrap();
    filter.add(b"first").unwrap();

    for i in 0..500 {
        filter.add(format!("later{}", i).as_bytes()).unwrap();
        assert!(filter.may_contain(b"first").unwrap());
    }
}

#[test]
fn test_accept_all_matches_everything() {
    let mut filter = BloomFilter::with_params(1000, 5, HashType::Fnv).unwrap();
    filter.accept_all();

    let mut rng = rand::rng();
    for _ in 0..1000 {
        assert!(filter.may_contain(&random_key(&mut rng)).unwrap());
    }
    assert_eq!(filter.num_elements(), 0);
    assert_eq!(filter.false_positive_rate(), 0.0);
}

#[test]
fn test_empty_key_rejected_without_mutation() {
    let mut filter = BloomFilter::with_params(64, 2, HashType::Murmur).unwrap();
    filter.add(b"present").unwrap();
    let snapshot = filter.encode();

    assert!(matches!(filter.add(b""), Err(Error::InvalidArgument(_))));
    assert!(matches!(filter.may_contain(b""), Err(Error::InvalidArgument(_))));

    assert_eq!(filter.encode(), snapshot);
}

#[test]
fn test_capacity_planning_without_instance() {
    let config = FilterConfig::for_capacity(1000, 0.01);
    let planned = false_positive_rate(config.hash_count(), config.vector_size(), 1000);
    assert!(planned < 0.011, "planned rate {:.5}", planned);

    // Rate grows with the number of elements
    let over = false_positive_rate(config.hash_count(), config.vector_size(), 5000);
    assert!(over > planned);
    assert!(over <= 1.0);
}

#[test]
fn test_filters_of_same_family_agree() {
    let config = Arc::new(FilterConfig::new(4096, 5, HashType::Jenkins).unwrap());
    let mut writer = BloomFilter::new(Arc::clone(&config));
    let mut other = BloomFilter::new(config);

    writer.add_all((0..100).map(|i| format!("k{}", i))).unwrap();
    other.add_all((0..100).map(|i| format!("k{}", i))).unwrap();

    assert_eq!(writer.encode(), other.encode());
}
