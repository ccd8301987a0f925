//! Wire forms of a filter.
//!
//! `to_bytes` writes a fixed-length region whose size depends only on the
//! filter params (`FilterParams::encoded_len`), so an enclosing payload can
//! slice it back out by length:
//!
//! ```text
//! [version: u8][occupancy bitmap: ceil(m*b / 8) bytes][m*b fingerprints]
//! ```
//!
//! The bitmap holds one bit per slot, bucket-major, most significant bit
//! first. Empty slots are zero filled.
//!
//! The region is therefore `1 + ceil(m*b / 8)` bytes longer than the bare
//! `m*b*f` fingerprint table. Slice by `encoded_len`, not by the table size.
//!
//! `to_snapshot` wraps that region in a bincode envelope together with the
//! params, for callers that do not track the params themselves.

use super::{
    Bucket, CuckooError, CuckooFilter, CuckooFilterStats,
    DEFAULT_MAX_RELOCATIONS, Fingerprint, FilterParams, ParseError, Result,
};
use bincode::{Decode, Encode};
use bitvec::prelude::*;
use tracing::info;

pub const FORMAT_VERSION: u8 = 1;

#[derive(Debug, Encode, Decode)]
struct FilterSnapshot {
    params: FilterParams,
    max_relocations: usize,
    data: Vec<u8>,
}

impl CuckooFilter {
    /// Encode every slot of the filter into `params().encoded_len()` bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let params = self.params();
        let fp_len = params.fingerprint_len();
        let slot_count = params.slot_count();

        let mut occupancy: BitVec<u8, Msb0> = BitVec::repeat(false, slot_count);
        let mut fingerprints = vec![0u8; slot_count * fp_len];

        let slots = self.buckets().iter().flat_map(|bucket| bucket.slots());
        for (i, slot) in slots.enumerate() {
            if let Some(fingerprint) = slot {
                occupancy.set(i, true);
                fingerprints[i * fp_len..(i + 1) * fp_len]
                    .copy_from_slice(fingerprint.as_bytes());
            }
        }

        let mut out = Vec::with_capacity(params.encoded_len());
        out.push(FORMAT_VERSION);
        out.extend_from_slice(occupancy.as_raw_slice());
        out.extend_from_slice(&fingerprints);
        out
    }

    /// Rebuild a filter from `to_bytes` output. Either the whole region
    /// parses or nothing is built.
    pub fn from_bytes(bytes: &[u8], params: FilterParams) -> Result<Self> {
        params.validate()?;
        let expected = params.encoded_len();

        let Some((&version, rest)) = bytes.split_first() else {
            return Err(ParseError::Truncated {
                expected,
                actual: 0,
            }
            .into());
        };
        if version != FORMAT_VERSION {
            return Err(ParseError::UnsupportedVersion(version).into());
        }
        if bytes.len() < expected {
            return Err(ParseError::Truncated {
                expected,
                actual: bytes.len(),
            }
            .into());
        }
        if bytes.len() > expected {
            return Err(ParseError::LengthMismatch {
                expected,
                actual: bytes.len(),
            }
            .into());
        }

        let slot_count = params.slot_count();
        let fp_len = params.fingerprint_len();
        let (bitmap, data) = rest.split_at(slot_count.div_ceil(8));
        let occupancy = BitSlice::<u8, Msb0>::from_slice(bitmap);

        let buckets = (0..params.buckets)
            .map(|bucket| -> std::result::Result<Bucket, ParseError> {
                let slots = (0..params.bucket_size)
                    .map(|slot| {
                        let i = bucket * params.bucket_size + slot;
                        let raw = &data[i * fp_len..(i + 1) * fp_len];
                        if occupancy[i] {
                            Ok(Some(Fingerprint::from_bytes(raw)))
                        } else if raw.iter().any(|&b| b != 0) {
                            Err(ParseError::DirtyEmptySlot { bucket, slot })
                        } else {
                            Ok(None)
                        }
                    })
                    .collect::<std::result::Result<Vec<_>, ParseError>>()?;
                Ok(Bucket::from_slots(slots))
            })
            .collect::<std::result::Result<Vec<_>, ParseError>>()?;

        let filter = Self::from_buckets(
            params,
            DEFAULT_MAX_RELOCATIONS,
            buckets,
            None,
        )?;
        info!(
            buckets = params.buckets,
            entries = filter.len(),
            "Restored cuckoo filter"
        );
        Ok(filter)
    }

    /// Self-describing encoding: params, relocation budget and the
    /// `to_bytes` region.
    pub fn to_snapshot(&self) -> Result<Vec<u8>> {
        let snapshot = FilterSnapshot {
            params: *self.params(),
            max_relocations: self.max_relocations(),
            data: self.to_bytes(),
        };
        Ok(bincode::encode_to_vec(snapshot, bincode::config::standard())?)
    }

    pub fn from_snapshot(bytes: &[u8]) -> Result<Self> {
        let (snapshot, read): (FilterSnapshot, usize) =
            bincode::decode_from_slice(bytes, bincode::config::standard())?;
        if read != bytes.len() {
            return Err(ParseError::LengthMismatch {
                expected: read,
                actual: bytes.len(),
            }
            .into());
        }
        if snapshot.max_relocations == 0 {
            return Err(CuckooError::InvalidConfig(
                "Relocation budget must be > 0".into(),
            ));
        }

        let mut filter = Self::from_bytes(&snapshot.data, snapshot.params)?;
        filter.set_max_relocations(snapshot.max_relocations);
        Ok(filter)
    }
}
