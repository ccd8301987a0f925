//! Cuckoo filter: an approximate set-membership structure with deletion.
//!
//! HowTo:
//!    * Fingerprints: every item is hashed once with SHA-256; a short prefix of
//!      the digest is stored instead of the item itself.
//!    * Two choices: the item may live in one of two buckets. The second index
//!      is derived from the first and the fingerprint only, so a resident entry
//!      can always find its alternate bucket without the original item.
//!    * Buckets: `m` buckets (power of two) of `b` slots each (4 by default).
//!
//! Insertion:
//!     * Place the fingerprint in the first candidate bucket with a free slot.
//!     * When both are full, kick a random resident to its alternate bucket and
//!       repeat, up to a fixed relocation budget (500 by default).
//!     * When the budget runs out the chain is rolled back and the insert fails
//!       with `CuckooError::FilterFull`; nothing already stored is lost.
//! Query:
//!     * Scan both candidate buckets for the fingerprint.
//! Deletion:
//!     * Remove one matching fingerprint from either candidate bucket.
//!
//! Known limitations:
//!     * False positives: different items can share a fingerprint and a bucket.
//!     * Deleting an item that was never inserted may remove a colliding entry
//!       of another item.
//!     * Indices are 32 bit, so the bucket count is capped at 2**32.

pub mod common;
pub mod cuckoo;
mod hash;

pub use cuckoo::{
    Bucket, BucketFull, BulkCuckooFilterOps, CuckooError, CuckooFilter,
    CuckooFilterConfig, CuckooFilterConfigBuilder, CuckooFilterOps,
    CuckooFilterStats, Fingerprint, FilterParams, ParseError, Placement,
    Result, SyncCuckooFilter, derive_params,
};
pub use hash::{
    DIGEST_LEN, digest, optimal_bucket_count, optimal_fingerprint_units,
};
