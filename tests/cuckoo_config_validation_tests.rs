use cuckoo_filter_rs::{
    CuckooError, CuckooFilter, CuckooFilterConfigBuilder, CuckooFilterOps,
    CuckooFilterStats, FilterParams, derive_params,
};

#[cfg(test)]
mod capacity_validation_tests {
    use super::*;

    #[test]
    fn test_zero_capacity_fails() {
        let config = CuckooFilterConfigBuilder::default()
            .capacity(0)
            .false_positive_rate(0.01)
            .build()
            .unwrap();

        match config.validate().unwrap_err() {
            CuckooError::InvalidConfig(msg) => {
                assert!(msg.contains("Capacity must be > 0"));
            }
            other => panic!("Expected InvalidConfig, got {other:?}"),
        }
        assert!(CuckooFilter::with_config(config).is_err());
    }

    #[test]
    fn test_minimum_valid_capacity() {
        let config = CuckooFilterConfigBuilder::default()
            .capacity(1)
            .false_positive_rate(0.01)
            .build()
            .unwrap();
        let filter = CuckooFilter::with_config(config).unwrap();
        assert_eq!(filter.capacity(), 1);
        assert!(filter.params().buckets >= 1);
        assert!(filter.params().buckets.is_power_of_two());
    }

    #[test]
    fn test_huge_capacity_is_rejected() {
        let result = derive_params(usize::MAX / 2, 0.01, 4, 8);
        assert!(matches!(result, Err(CuckooError::InvalidConfig(_))));
    }
}

#[cfg(test)]
mod false_positive_rate_validation_tests {
    use super::*;

    #[test]
    fn test_out_of_range_rates() {
        for fpr in [0.0, 1.0, -0.1, 2.0, f64::NAN, f64::INFINITY] {
            let result = CuckooFilter::new(100, fpr);
            assert!(
                matches!(result, Err(CuckooError::InvalidConfig(_))),
                "FPR {fpr} should be rejected"
            );
        }
    }

    #[test]
    fn test_derive_params_rejects_out_of_range_rates() {
        for fpr in [0.0, 5.0] {
            match derive_params(10, fpr, 4, 8) {
                Err(CuckooError::InvalidConfig(msg)) => {
                    assert!(msg.contains("FPR must be between 0 and 1"));
                }
                other => panic!("Expected InvalidConfig for {fpr}, got {other:?}"),
            }
        }
        assert!(matches!(
            derive_params(10, 0.1, 0, 8),
            Err(CuckooError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_tighter_rate_gives_longer_fingerprint() {
        let loose = CuckooFilter::new(1000, 0.1).unwrap();
        let tight = CuckooFilter::new(1000, 0.00001).unwrap();
        assert!(tight.fingerprint_bits() > loose.fingerprint_bits());
        assert!(
            tight.estimated_false_positive_rate()
                < loose.estimated_false_positive_rate()
        );
    }
}

#[cfg(test)]
mod sizing_tests {
    use super::*;

    #[test]
    fn test_small_filter_params() {
        let params = derive_params(10, 0.1, 4, 8).unwrap();
        assert_eq!(params.buckets, 128);
        assert_eq!(params.fingerprint_units, 1);
        assert_eq!(params.bucket_size, 4);
        assert_eq!(params.capacity, 10);
    }

    #[test]
    fn test_large_filter_params() {
        let params = derive_params(1_000_000, 0.001, 4, 8).unwrap();
        assert_eq!(params.buckets, 4_194_304);
        assert_eq!(params.fingerprint_units, 2);
        assert!(params.buckets.is_power_of_two());
    }

    #[test]
    fn test_params_are_reproducible() {
        for (n, e) in [(10, 0.1), (1_000_000, 0.001), (777, 0.03)] {
            assert_eq!(
                derive_params(n, e, 4, 8).unwrap(),
                derive_params(n, e, 4, 8).unwrap()
            );
        }
    }

    #[test]
    fn test_custom_bucket_size() {
        let config = CuckooFilterConfigBuilder::default()
            .capacity(100)
            .false_positive_rate(0.01)
            .bucket_size(8)
            .build()
            .unwrap();
        let filter = CuckooFilter::with_config(config).unwrap();
        assert_eq!(filter.params().bucket_size, 8);
        assert!(filter.buckets().iter().all(|b| b.capacity() == 8));
    }

    #[test]
    fn test_zero_bucket_size_fails() {
        let config = CuckooFilterConfigBuilder::default()
            .bucket_size(0)
            .build()
            .unwrap();
        assert!(CuckooFilter::with_config(config).is_err());
    }

    #[test]
    fn test_unit_bits_must_be_byte_aligned() {
        for unit_bits in [0, 4, 12] {
            let config = CuckooFilterConfigBuilder::default()
                .capacity(100)
                .unit_bits(unit_bits)
                .build()
                .unwrap();
            assert!(
                CuckooFilter::with_config(config).is_err(),
                "unit_bits {unit_bits} should be rejected"
            );
        }
    }

    #[test]
    fn test_encoded_len_matches_params() {
        let params = FilterParams::new(128, 4, 1, 10);
        assert_eq!(params.encoded_len(), 1 + 64 + 512);
    }
}

#[cfg(test)]
mod serialization_tests {
    use super::*;
    use cuckoo_filter_rs::CuckooFilterConfig;

    #[test]
    fn test_config_serialization_round_trip() {
        let original = CuckooFilterConfigBuilder::default()
            .capacity(20_000)
            .false_positive_rate(0.002)
            .bucket_size(8)
            .max_relocations(64)
            .build()
            .unwrap();

        let bytes = original.to_bytes().unwrap();
        assert!(!bytes.is_empty());

        let deserialized = CuckooFilterConfig::from_bytes(&bytes).unwrap();
        assert_eq!(deserialized.capacity, original.capacity);
        assert_eq!(
            deserialized.false_positive_rate,
            original.false_positive_rate
        );
        assert_eq!(deserialized.bucket_size, 8);
        assert_eq!(deserialized.max_relocations, 64);
        assert_eq!(deserialized.seed, None);
        assert!(deserialized.validate().is_ok());
    }

    #[test]
    fn test_invalid_serialization_data() {
        let inputs: [&[u8]; 2] = [&[0xFF, 0xFF, 0xFF, 0xFF], &[]];
        for bytes in inputs {
            match CuckooFilterConfig::from_bytes(bytes) {
                Err(CuckooError::SerializationError(_)) => {}
                other => panic!("Expected SerializationError, got {other:?}"),
            }
        }
    }
}

#[cfg(test)]
mod relocation_budget_tests {
    use super::*;

    #[test]
    fn test_custom_budget_is_reported() {
        let config = CuckooFilterConfigBuilder::default()
            .capacity(10)
            .false_positive_rate(0.1)
            .max_relocations(7)
            .seed(Some(1))
            .build()
            .unwrap();
        let mut filter = CuckooFilter::with_config(config).unwrap();
        assert_eq!(filter.max_relocations(), 7);

        let mut error = None;
        for i in 0..5000 {
            if let Err(e) = filter.insert(format!("item_{i}").as_bytes()) {
                error = Some(e);
                break;
            }
        }
        assert_eq!(error, Some(CuckooError::FilterFull { relocations: 7 }));
    }

    #[test]
    fn test_zero_budget_fails() {
        let config = CuckooFilterConfigBuilder::default()
            .max_relocations(0)
            .build()
            .unwrap();
        assert!(CuckooFilter::with_config(config).is_err());
    }
}
