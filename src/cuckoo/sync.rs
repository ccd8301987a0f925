use super::{
    CuckooError, CuckooFilter, CuckooFilterConfig, CuckooFilterOps,
    CuckooFilterStats, Result,
};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared handle to a filter. Lookups run concurrently under the read lock;
/// inserts, deletes and clears take the write lock.
#[derive(Clone, Debug)]
pub struct SyncCuckooFilter {
    inner: Arc<RwLock<CuckooFilter>>,
}

impl SyncCuckooFilter {
    pub fn new(filter: CuckooFilter) -> Self {
        Self {
            inner: Arc::new(RwLock::new(filter)),
        }
    }

    pub fn with_config(config: CuckooFilterConfig) -> Result<Self> {
        Ok(Self::new(CuckooFilter::with_config(config)?))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, CuckooFilter>> {
        self.inner
            .read()
            .map_err(|e| CuckooError::LockError(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CuckooFilter>> {
        self.inner
            .write()
            .map_err(|e| CuckooError::LockError(e.to_string()))
    }

    pub fn insert(&self, item: &[u8]) -> Result<()> {
        self.write()?.insert(item)
    }

    pub fn lookup(&self, item: &[u8]) -> Result<bool> {
        Ok(self.read()?.lookup(item))
    }

    pub fn delete(&self, item: &[u8]) -> Result<bool> {
        Ok(self.write()?.delete(item))
    }

    pub fn clear(&self) -> Result<()> {
        self.write()?.clear();
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.read()?.to_bytes())
    }

    /// Copy of the current filter state.
    pub fn snapshot(&self) -> Result<CuckooFilter> {
        Ok(self.read()?.clone())
    }
}

impl From<CuckooFilter> for SyncCuckooFilter {
    fn from(filter: CuckooFilter) -> Self {
        Self::new(filter)
    }
}
