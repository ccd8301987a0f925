//! Cuckoo filter implementation
pub mod bucket;
pub mod codec;
pub mod config;
pub mod error;
pub mod filter;
pub mod fingerprint;
pub mod sync;
pub mod traits;

pub use bucket::{Bucket, BucketFull};
pub use config::{
    CuckooFilterConfig, CuckooFilterConfigBuilder, DEFAULT_BUCKET_SIZE,
    DEFAULT_MAX_RELOCATIONS, DEFAULT_UNIT_BITS, FilterParams, derive_params,
};
pub use error::{CuckooError, ParseError, Result};
pub use filter::CuckooFilter;
pub use fingerprint::{Fingerprint, Placement};
pub use sync::SyncCuckooFilter;
pub use traits::{BulkCuckooFilterOps, CuckooFilterOps, CuckooFilterStats};
