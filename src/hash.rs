use sha2::{Digest, Sha256};

/// Length in bytes of the digest every item and fingerprint is hashed with.
pub const DIGEST_LEN: usize = 32;

/// Stateless SHA-256 of `data`.
///
/// A fresh hasher is used on every call, so concurrent callers never share
/// digest state.
pub fn digest(data: &[u8]) -> [u8; DIGEST_LEN] {
    Sha256::digest(data).into()
}

/// First four bytes of a digest as a big-endian integer.
pub(crate) fn leading_u32(digest: &[u8; DIGEST_LEN]) -> u32 {
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Fingerprint length in units of `unit_bits` bits, following
/// `f >= log2(2b / e)` bits from the cuckoo filter paper.
///
/// Never returns less than one unit.
pub fn optimal_fingerprint_units(
    bucket_size: usize,
    fpr: f64,
    unit_bits: usize,
) -> usize {
    let bits = (2.0 * bucket_size as f64 / fpr).log2();
    ((bits / unit_bits as f64).ceil() as usize).max(1)
}

/// Number of buckets for `n` items: `ceil(n * unit_bits / f)` rounded up to
/// the next power of two, with a floor of one bucket.
///
/// Returns `None` if the result does not fit in `usize`.
pub fn optimal_bucket_count(
    n: usize,
    fingerprint_units: usize,
    unit_bits: usize,
) -> Option<usize> {
    n.checked_mul(unit_bits)?
        .div_ceil(fingerprint_units.max(1))
        .max(1)
        .checked_next_power_of_two()
}
