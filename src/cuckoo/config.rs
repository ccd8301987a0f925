use super::{CuckooError, Result};
use crate::hash::{DIGEST_LEN, optimal_bucket_count, optimal_fingerprint_units};
use bincode::{Decode, Encode};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Slots per bucket recommended by the cuckoo filter paper.
pub const DEFAULT_BUCKET_SIZE: usize = 4;
/// Fingerprints are byte aligned.
pub const DEFAULT_UNIT_BITS: usize = 8;
/// How many times an insert may kick residents around before giving up.
pub const DEFAULT_MAX_RELOCATIONS: usize = 500;

#[derive(Clone, Debug, Builder, Serialize, Deserialize)]
#[builder(pattern = "owned")]
pub struct CuckooFilterConfig {
    /// Number of items the filter is sized for
    #[builder(default = "1_000_000")]
    pub capacity: usize,

    /// Target false positive rate (0.0 to 1.0)
    #[builder(default = "0.01")]
    pub false_positive_rate: f64,

    /// Slots per bucket
    #[builder(default = "DEFAULT_BUCKET_SIZE")]
    pub bucket_size: usize,

    /// Fingerprint granularity in bits, must be a multiple of 8
    #[builder(default = "DEFAULT_UNIT_BITS")]
    pub unit_bits: usize,

    /// Relocation budget of a single insert
    #[builder(default = "DEFAULT_MAX_RELOCATIONS")]
    pub max_relocations: usize,

    /// Seed for the relocation slot picker, OS entropy when `None`
    #[builder(default = "None")]
    pub seed: Option<u64>,
}

impl CuckooFilterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CuckooError::InvalidConfig(
                "Capacity must be > 0".into(),
            ));
        }
        validate_false_positive_rate(self.false_positive_rate)?;
        validate_bucket_size(self.bucket_size)?;
        if self.max_relocations == 0 {
            return Err(CuckooError::InvalidConfig(
                "Relocation budget must be > 0".into(),
            ));
        }
        validate_unit_bits(self.unit_bits)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

fn validate_false_positive_rate(fpr: f64) -> Result<()> {
    if !(fpr > 0.0 && fpr < 1.0) {
        return Err(CuckooError::InvalidConfig(format!(
            "FPR must be between 0 and 1, got {fpr}"
        )));
    }
    Ok(())
}

fn validate_bucket_size(bucket_size: usize) -> Result<()> {
    if bucket_size == 0 {
        return Err(CuckooError::InvalidConfig(
            "Bucket size must be > 0".into(),
        ));
    }
    Ok(())
}

fn validate_unit_bits(unit_bits: usize) -> Result<()> {
    if unit_bits == 0 || unit_bits % 8 != 0 {
        return Err(CuckooError::InvalidConfig(format!(
            "Unit bits must be a non-zero multiple of 8, got {unit_bits}"
        )));
    }
    Ok(())
}

/// Derived parameters of a filter: everything needed to lay out its buckets
/// and to read its encoded form back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
pub struct FilterParams {
    /// Bucket count `m`, always a power of two
    pub buckets: usize,
    /// Slots per bucket `b`
    pub bucket_size: usize,
    /// Fingerprint length `f` in units of `unit_bits`
    pub fingerprint_units: usize,
    pub unit_bits: usize,
    /// Requested capacity `n`
    pub capacity: usize,
}

impl FilterParams {
    /// Params with the default byte-aligned units.
    pub fn new(
        buckets: usize,
        bucket_size: usize,
        fingerprint_units: usize,
        capacity: usize,
    ) -> Self {
        Self {
            buckets,
            bucket_size,
            fingerprint_units,
            unit_bits: DEFAULT_UNIT_BITS,
            capacity,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_unit_bits(self.unit_bits)?;
        if !self.buckets.is_power_of_two() {
            return Err(CuckooError::InvalidConfig(format!(
                "Bucket count must be a power of two, got {}",
                self.buckets
            )));
        }
        if self.buckets - 1 > u32::MAX as usize {
            return Err(CuckooError::InvalidConfig(format!(
                "Bucket count {} exceeds the 32-bit index space",
                self.buckets
            )));
        }
        if self.bucket_size == 0 || self.fingerprint_units == 0 {
            return Err(CuckooError::InvalidConfig(
                "Bucket size and fingerprint length must be > 0".into(),
            ));
        }
        if self.fingerprint_len() > DIGEST_LEN {
            return Err(CuckooError::InvalidConfig(format!(
                "Fingerprint of {} bytes exceeds the {DIGEST_LEN} byte digest",
                self.fingerprint_len()
            )));
        }
        if self.capacity == 0 {
            return Err(CuckooError::InvalidConfig(
                "Capacity must be > 0".into(),
            ));
        }
        match self.checked_encoded_len() {
            Some(len) if len <= isize::MAX as usize => Ok(()),
            _ => Err(CuckooError::InvalidConfig(format!(
                "Layout of {} buckets x {} slots does not fit in memory",
                self.buckets, self.bucket_size
            ))),
        }
    }

    /// Fingerprint length in bytes.
    pub fn fingerprint_len(&self) -> usize {
        self.fingerprint_bits() / 8
    }

    pub fn fingerprint_bits(&self) -> usize {
        self.fingerprint_units.saturating_mul(self.unit_bits)
    }

    /// Total number of slots, `m * b`.
    pub fn slot_count(&self) -> usize {
        self.buckets.saturating_mul(self.bucket_size)
    }

    /// Length of the `to_bytes` encoding: version byte, occupancy bitmap and
    /// `m * b` fingerprints. Saturates at `usize::MAX` for params that fail
    /// `validate`.
    pub fn encoded_len(&self) -> usize {
        self.checked_encoded_len().unwrap_or(usize::MAX)
    }

    fn checked_encoded_len(&self) -> Option<usize> {
        let slots = self.buckets.checked_mul(self.bucket_size)?;
        slots
            .checked_mul(self.fingerprint_len())?
            .checked_add(slots.div_ceil(8))?
            .checked_add(1)
    }

    pub(crate) fn bucket_mask(&self) -> usize {
        self.buckets - 1
    }
}

/// Derive `(m, f)` from capacity `n`, false positive rate `e`, bucket size
/// `b` and the fingerprint unit.
pub fn derive_params(
    capacity: usize,
    false_positive_rate: f64,
    bucket_size: usize,
    unit_bits: usize,
) -> Result<FilterParams> {
    validate_false_positive_rate(false_positive_rate)?;
    validate_bucket_size(bucket_size)?;
    validate_unit_bits(unit_bits)?;
    let fingerprint_units =
        optimal_fingerprint_units(bucket_size, false_positive_rate, unit_bits);
    let buckets = optimal_bucket_count(capacity, fingerprint_units, unit_bits)
        .ok_or_else(|| {
            CuckooError::InvalidConfig(format!(
                "Capacity {capacity} is too large"
            ))
        })?;

    let params = FilterParams {
        buckets,
        bucket_size,
        fingerprint_units,
        unit_bits,
        capacity,
    };
    params.validate()?;
    Ok(params)
}

impl TryFrom<&CuckooFilterConfig> for FilterParams {
    type Error = CuckooError;

    fn try_from(config: &CuckooFilterConfig) -> Result<Self> {
        config.validate()?;
        derive_params(
            config.capacity,
            config.false_positive_rate,
            config.bucket_size,
            config.unit_bits,
        )
    }
}
