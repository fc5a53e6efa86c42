//! The single time-bounded slot holding the last successfully fetched dataset

use std::io;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use log::debug;

use super::CacheManager;
use crate::data::Dataset;

/// Fixed key of the dataset slot
pub const CACHE_KEY: &str = "pluginlink_data";

/// Time-to-live for the dataset slot in hours
pub const CACHE_TTL_HOURS: u64 = 24;

/// Storage for the fetched dataset.
///
/// Implementations hold at most one dataset. Reads never return an expired
/// dataset, and writes replace whatever was there before.
pub trait DatasetStore: Send + Sync {
    /// Returns the stored dataset if present and not expired
    fn read(&self) -> Option<Dataset>;

    /// Stores a dataset with a fresh TTL, replacing any prior value
    fn write(&self, dataset: &Dataset) -> io::Result<()>;

    /// Clears the slot regardless of expiry
    fn invalidate(&self) -> io::Result<()>;
}

/// Dataset slot persisted as a JSON file through [`CacheManager`]
#[derive(Debug, Clone)]
pub struct FileStore {
    manager: CacheManager,
}

impl FileStore {
    pub fn new(manager: CacheManager) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &CacheManager {
        &self.manager
    }

    pub(crate) fn read_at(&self, now: DateTime<Utc>) -> Option<Dataset> {
        let cached = self.manager.read_at::<Dataset>(CACHE_KEY, now)?;
        if cached.is_expired {
            debug!("cached dataset from {} has expired", cached.cached_at);
            return None;
        }
        Some(cached.data)
    }
}

impl DatasetStore for FileStore {
    fn read(&self) -> Option<Dataset> {
        self.read_at(Utc::now())
    }

    fn write(&self, dataset: &Dataset) -> io::Result<()> {
        self.manager.write(CACHE_KEY, dataset, CACHE_TTL_HOURS)
    }

    fn invalidate(&self) -> io::Result<()> {
        self.manager.remove(CACHE_KEY)
    }
}

/// In-process dataset slot, for hosts without a writable cache directory
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<(Dataset, DateTime<Utc>)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read_at(&self, now: DateTime<Utc>) -> Option<Dataset> {
        let slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        match slot.as_ref() {
            Some((dataset, expires_at)) if now <= *expires_at => Some(dataset.clone()),
            _ => None,
        }
    }

    pub(crate) fn write_at(&self, dataset: &Dataset, now: DateTime<Utc>) {
        let expires_at = now + Duration::hours(CACHE_TTL_HOURS as i64);
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some((dataset.clone(), expires_at));
    }
}

impl DatasetStore for MemoryStore {
    fn read(&self) -> Option<Dataset> {
        self.read_at(Utc::now())
    }

    fn write(&self, dataset: &Dataset) -> io::Result<()> {
        self.write_at(dataset, Utc::now());
        Ok(())
    }

    fn invalidate(&self) -> io::Result<()> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}
