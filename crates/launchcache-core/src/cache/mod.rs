//! Cache tiers for offline access to launch listings.
//!
//! - `MemoryCache`: process-local, volatile, cleared under memory pressure
//! - `DiskCache`: one JSON record per key, survives restarts
//!
//! Neither tier expires entries on its own. Records are replaced when a
//! fresh listing is written through, or dropped by an explicit clear/delete.

pub mod disk;
pub mod key;
pub mod memory;

pub use disk::{CachedData, DiskCache, StoreError};
pub use key::CacheKey;
pub use memory::MemoryCache;
