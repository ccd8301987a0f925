use crate::hash::{digest, leading_u32};
use std::fmt;

/// Short digest prefix stored in place of an item.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(Box<[u8]>);

impl Fingerprint {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index offset that maps either candidate bucket onto the other one.
    pub fn alt_hash(&self) -> u32 {
        leading_u32(&digest(&self.0))
    }

    /// The other candidate index of an entry that currently sits at `index`.
    pub fn alternate_index(&self, index: u32) -> u32 {
        index ^ self.alt_hash()
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint(")?;
        for byte in self.0.iter() {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

/// The two candidate indices and the fingerprint of one item.
///
/// Indices are raw 32-bit values; the filter masks them down to a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub index1: u32,
    pub index2: u32,
    pub fingerprint: Fingerprint,
}

impl Placement {
    /// Hash `item` once and derive its placement for fingerprints of
    /// `fingerprint_len` bytes.
    pub fn for_item(item: &[u8], fingerprint_len: usize) -> Self {
        let h = digest(item);
        let fingerprint = Fingerprint::from_bytes(&h[..fingerprint_len]);
        Self::from_fingerprint(leading_u32(&h), fingerprint)
    }

    /// Placement of an already known fingerprint whose first index is
    /// `index1`.
    pub fn from_fingerprint(index1: u32, fingerprint: Fingerprint) -> Self {
        let index2 = fingerprint.alternate_index(index1);
        Self {
            index1,
            index2,
            fingerprint,
        }
    }
}
