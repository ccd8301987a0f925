use super::Result;

/// Core operations of an approximate membership filter with deletion
pub trait CuckooFilterOps {
    /// Add one occurrence of `item`
    fn insert(&mut self, item: &[u8]) -> Result<()>;
    /// `true` if `item` may be present, `false` if it is definitely absent
    fn lookup(&self, item: &[u8]) -> bool;
    /// Remove one occurrence of `item`, `true` if an entry was removed
    fn delete(&mut self, item: &[u8]) -> bool;
    fn clear(&mut self);
}

pub trait BulkCuckooFilterOps {
    /// Insert items in order, stopping at the first failure
    fn insert_bulk(&mut self, items: &[&[u8]]) -> Result<()>;
    fn lookup_bulk(&self, items: &[&[u8]]) -> Vec<bool>;
}

pub trait CuckooFilterStats {
    /// Requested capacity `n`
    fn capacity(&self) -> usize;
    /// Number of occupied slots
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Total number of slots, `m * b`
    fn slot_count(&self) -> usize;
    fn load_factor(&self) -> f64 {
        self.len() as f64 / self.slot_count() as f64
    }
    fn fingerprint_bits(&self) -> usize;
    /// Upper bound `2b / 2^f` on the false positive rate
    fn estimated_false_positive_rate(&self) -> f64;
    /// Bytes held by fingerprints when every slot is occupied
    fn memory_usage(&self) -> usize;
}
