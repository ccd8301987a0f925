use super::Fingerprint;
use thiserror::Error;

/// Signals that a bucket has no empty slot left. The insert path reacts by
/// trying the alternate bucket or relocating; callers of the filter never see
/// it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("bucket full")]
pub struct BucketFull;

/// Fixed-capacity array of optional fingerprints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    slots: Box<[Option<Fingerprint>]>,
}

impl Bucket {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
        }
    }

    pub(crate) fn from_slots(slots: Vec<Option<Fingerprint>>) -> Self {
        Self {
            slots: slots.into_boxed_slice(),
        }
    }

    /// Index of the first empty slot.
    pub fn find_free_slot(&self) -> Result<usize, BucketFull> {
        self.slots
            .iter()
            .position(Option::is_none)
            .ok_or(BucketFull)
    }

    /// Index of the first slot holding exactly `fingerprint`.
    pub fn contains(&self, fingerprint: &Fingerprint) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref() == Some(fingerprint))
    }

    /// Number of slots holding exactly `fingerprint`.
    pub fn count(&self, fingerprint: &Fingerprint) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.as_ref() == Some(fingerprint))
            .count()
    }

    /// Clear the slot at `index`. Clearing an empty slot is a no-op.
    pub fn remove_at(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    pub(crate) fn place(&mut self, index: usize, fingerprint: Fingerprint) {
        self.slots[index] = Some(fingerprint);
    }

    /// Put `fingerprint` into slot `index` and hand back the previous
    /// resident.
    pub(crate) fn swap(
        &mut self,
        index: usize,
        fingerprint: Fingerprint,
    ) -> Option<Fingerprint> {
        self.slots[index].replace(fingerprint)
    }

    pub fn slots(&self) -> impl Iterator<Item = Option<&Fingerprint>> {
        self.slots.iter().map(Option::as_ref)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.find_free_slot().is_err()
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }
}
