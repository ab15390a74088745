//! Storage sink abstraction.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{StorageError, StorageResult};
use crate::record::StorageRecord;

/// Write-only key-value persistence consumed by the publisher.
///
/// Implementations own all persistence semantics beyond the write call.
/// Concurrent writes to the same `(collection, key)` are resolved by the
/// implementation; both sinks in this crate are last-write-wins.
pub trait StorageSink: Send + Sync {
    /// Returns a short name for the backend, used in log lines.
    fn backend_name(&self) -> &'static str;

    /// Creates or overwrites the object at `(record.collection, record.key)`.
    fn write(&self, record: &StorageRecord) -> StorageResult<()>;
}

#[derive(Default)]
struct MemoryState {
    records: HashMap<(String, String), StorageRecord>,
    writes: usize,
}

/// In-process sink backed by a `HashMap`.
#[derive(Default)]
pub struct MemorySink {
    state: Mutex<MemoryState>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record stored at `(collection, key)`, if any.
    pub fn get(&self, collection: &str, key: &str) -> StorageResult<Option<StorageRecord>> {
        let state = self.lock()?;
        Ok(state
            .records
            .get(&(collection.to_string(), key.to_string()))
            .cloned())
    }

    /// Number of distinct objects held.
    pub fn len(&self) -> StorageResult<usize> {
        Ok(self.lock()?.records.len())
    }

    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Total number of successful write calls, including overwrites.
    pub fn write_count(&self) -> StorageResult<usize> {
        Ok(self.lock()?.writes)
    }

    fn lock(&self) -> StorageResult<std::sync::MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| StorageError::Storage("memory sink lock poisoned".to_string()))
    }
}

impl StorageSink for MemorySink {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn write(&self, record: &StorageRecord) -> StorageResult<()> {
        let mut state = self.lock()?;
        state.records.insert(
            (record.collection.clone(), record.key.clone()),
            record.clone(),
        );
        state.writes += 1;
        Ok(())
    }
}
