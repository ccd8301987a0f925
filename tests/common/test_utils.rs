use cuckoo_filter_rs::{CuckooFilter, CuckooFilterConfigBuilder};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install a test subscriber once, filtered by `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Seeded filter so relocation choices repeat across runs
#[allow(dead_code)]
pub fn create_test_filter(capacity: usize, fpr: f64) -> CuckooFilter {
    init_tracing();
    let config = CuckooFilterConfigBuilder::default()
        .capacity(capacity)
        .false_positive_rate(fpr)
        .seed(Some(0x5eed))
        .build()
        .expect("Failed to build test config");

    CuckooFilter::with_config(config).expect("Failed to create test filter")
}

#[allow(dead_code)]
pub fn generate_test_items(count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| format!("test_item_{:06}", i).into_bytes())
        .collect()
}

/// Random 16 byte items
#[allow(dead_code)]
pub fn generate_random_items(count: usize) -> Vec<Vec<u8>> {
    use rand::Rng;
    let mut rng = rand::rng();
    (0..count)
        .map(|_| (0..16).map(|_| rng.random::<u8>()).collect())
        .collect()
}
