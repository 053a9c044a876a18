//! On-disk cache for catalog responses
//!
//! Catalog responses are stored as JSON files with an expiry timestamp.
//! Expired entries are still handed back (flagged `is_expired`) so the
//! catalog can keep working from stale data when the API is unreachable.

mod manager;

pub use manager::{CacheManager, CachedData};
