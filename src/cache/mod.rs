//! Cache module for storing the fetched link dataset
//!
//! `CacheManager` persists JSON entries to the filesystem with a TTL.
//! `DatasetStore` is the single dataset slot built on top of it (or kept in
//! memory), which never serves an expired dataset.

mod manager;
mod store;

pub use manager::{CacheManager, CachedData};
pub use store::{DatasetStore, FileStore, MemoryStore, CACHE_KEY, CACHE_TTL_HOURS};
