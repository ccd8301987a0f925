use super::{
    Bucket, BulkCuckooFilterOps, CuckooError, CuckooFilterConfig,
    CuckooFilterConfigBuilder, CuckooFilterOps, CuckooFilterStats, Fingerprint,
    FilterParams, Placement, Result,
};
use crate::common::bytes2hr;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info, trace, warn};

/// Cuckoo filter over `m` buckets of `b` fingerprint slots.
#[derive(Clone)]
pub struct CuckooFilter {
    params: FilterParams,
    max_relocations: usize,
    buckets: Vec<Bucket>,
    len: usize,
    rng: StdRng,
}

impl CuckooFilter {
    /// Filter sized for `capacity` items at `false_positive_rate`, default
    /// bucket size and relocation budget.
    pub fn new(capacity: usize, false_positive_rate: f64) -> Result<Self> {
        let config = CuckooFilterConfigBuilder::default()
            .capacity(capacity)
            .false_positive_rate(false_positive_rate)
            .build()?;
        Self::with_config(config)
    }

    pub fn with_config(config: CuckooFilterConfig) -> Result<Self> {
        let params = FilterParams::try_from(&config)?;
        Self::with_params(params, config.max_relocations, config.seed)
    }

    /// Empty filter with explicit params.
    pub fn with_params(
        params: FilterParams,
        max_relocations: usize,
        seed: Option<u64>,
    ) -> Result<Self> {
        params.validate()?;
        let buckets = (0..params.buckets)
            .map(|_| Bucket::new(params.bucket_size))
            .collect();
        let filter = Self::from_buckets(params, max_relocations, buckets, seed)?;

        info!(
            buckets = params.buckets,
            bucket_size = params.bucket_size,
            fingerprint_bits = params.fingerprint_bits(),
            capacity = params.capacity,
            memory = %bytes2hr(filter.memory_usage()),
            "Created cuckoo filter"
        );
        Ok(filter)
    }

    pub(crate) fn from_buckets(
        params: FilterParams,
        max_relocations: usize,
        buckets: Vec<Bucket>,
        seed: Option<u64>,
    ) -> Result<Self> {
        params.validate()?;
        if max_relocations == 0 {
            return Err(CuckooError::InvalidConfig(
                "Relocation budget must be > 0".into(),
            ));
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let len = buckets.iter().map(Bucket::len).sum();

        Ok(Self {
            params,
            max_relocations,
            buckets,
            len,
            rng,
        })
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    pub fn max_relocations(&self) -> usize {
        self.max_relocations
    }

    pub(crate) fn set_max_relocations(&mut self, max_relocations: usize) {
        self.max_relocations = max_relocations;
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Candidate indices and fingerprint of `item` under this filter's params.
    pub fn placement(&self, item: &[u8]) -> Placement {
        Placement::for_item(item, self.params.fingerprint_len())
    }

    /// Occurrences of `item`'s fingerprint across its two candidate buckets.
    pub fn count(&self, item: &[u8]) -> usize {
        let placement = self.placement(item);
        let pos1 = self.bucket_index(placement.index1);
        let pos2 = self.bucket_index(placement.index2);
        let mut count = self.buckets[pos1].count(&placement.fingerprint);
        if pos2 != pos1 {
            count += self.buckets[pos2].count(&placement.fingerprint);
        }
        count
    }

    fn bucket_index(&self, index: u32) -> usize {
        index as usize & self.params.bucket_mask()
    }

    pub(crate) fn insert_placement(&mut self, placement: Placement) -> Result<()> {
        let Placement {
            index1,
            index2,
            fingerprint,
        } = placement;

        for index in [index1, index2] {
            let pos = self.bucket_index(index);
            if let Ok(slot) = self.buckets[pos].find_free_slot() {
                self.buckets[pos].place(slot, fingerprint);
                self.len += 1;
                return Ok(());
            }
        }

        self.relocate(index1, fingerprint)
    }

    /// Kick residents to their alternate buckets until `fingerprint` finds a
    /// home. On failure the chain is undone, leaving every bucket as it was.
    fn relocate(&mut self, index: u32, fingerprint: Fingerprint) -> Result<()> {
        let mut working = index;
        let mut carried = fingerprint;
        let mut path = Vec::with_capacity(self.max_relocations.min(64));

        for kick in 0..self.max_relocations {
            let pos = self.bucket_index(working);
            let slot = self.rng.random_range(0..self.params.bucket_size);
            path.push((pos, slot));

            carried = match self.buckets[pos].swap(slot, carried) {
                Some(evicted) => evicted,
                None => {
                    self.len += 1;
                    return Ok(());
                }
            };

            working = carried.alternate_index(working);
            let alt = self.bucket_index(working);
            if let Ok(free) = self.buckets[alt].find_free_slot() {
                self.buckets[alt].place(free, carried);
                self.len += 1;
                debug!(kicks = kick + 1, "Relocation chain found a free slot");
                return Ok(());
            }
        }

        trace!(steps = path.len(), "Rolling back relocation chain");
        for (pos, slot) in path.into_iter().rev() {
            match self.buckets[pos].swap(slot, carried) {
                Some(previous) => carried = previous,
                None => break,
            }
        }

        warn!(
            relocations = self.max_relocations,
            len = self.len,
            slots = self.params.slot_count(),
            "Cuckoo filter full, insert rejected"
        );
        Err(CuckooError::FilterFull {
            relocations: self.max_relocations,
        })
    }

    pub(crate) fn contains_placement(&self, placement: &Placement) -> bool {
        [placement.index1, placement.index2].into_iter().any(|index| {
            self.buckets[self.bucket_index(index)]
                .contains(&placement.fingerprint)
                .is_some()
        })
    }

    pub(crate) fn delete_placement(&mut self, placement: &Placement) -> bool {
        for index in [placement.index1, placement.index2] {
            let pos = self.bucket_index(index);
            if let Some(slot) = self.buckets[pos].contains(&placement.fingerprint)
            {
                self.buckets[pos].remove_at(slot);
                self.len -= 1;
                return true;
            }
        }
        false
    }
}

impl CuckooFilterOps for CuckooFilter {
    fn insert(&mut self, item: &[u8]) -> Result<()> {
        let placement = self.placement(item);
        self.insert_placement(placement)
    }

    fn lookup(&self, item: &[u8]) -> bool {
        self.contains_placement(&self.placement(item))
    }

    fn delete(&mut self, item: &[u8]) -> bool {
        let placement = self.placement(item);
        self.delete_placement(&placement)
    }

    fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Bucket::clear);
        self.len = 0;
    }
}

impl BulkCuckooFilterOps for CuckooFilter {
    fn insert_bulk(&mut self, items: &[&[u8]]) -> Result<()> {
        for item in items {
            self.insert(item)?;
        }
        Ok(())
    }

    fn lookup_bulk(&self, items: &[&[u8]]) -> Vec<bool> {
        items.iter().map(|item| self.lookup(item)).collect()
    }
}

impl CuckooFilterStats for CuckooFilter {
    fn capacity(&self) -> usize {
        self.params.capacity
    }

    fn len(&self) -> usize {
        self.len
    }

    fn slot_count(&self) -> usize {
        self.params.slot_count()
    }

    fn fingerprint_bits(&self) -> usize {
        self.params.fingerprint_bits()
    }

    fn estimated_false_positive_rate(&self) -> f64 {
        let bits = self.params.fingerprint_bits().min(i32::MAX as usize) as i32;
        (2.0 * self.params.bucket_size as f64 / 2f64.powi(bits)).min(1.0)
    }

    fn memory_usage(&self) -> usize {
        self.params.slot_count() * self.params.fingerprint_len()
    }
}

impl PartialEq for CuckooFilter {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params && self.buckets == other.buckets
    }
}

impl Eq for CuckooFilter {}

impl std::fmt::Debug for CuckooFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CuckooFilter {{ buckets: {}, bucket_size: {}, fingerprint_bits: {}, capacity: {}, len: {}, max_relocations: {}, memory: {} }}",
            self.params.buckets,
            self.params.bucket_size,
            self.params.fingerprint_bits(),
            self.params.capacity,
            self.len,
            self.max_relocations,
            bytes2hr(self.memory_usage())
        )
    }
}
