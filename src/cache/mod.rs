//! Cache Module
//!
//! The bounded, sharded LRU store shared by all connections.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        LruCache                             │
//! │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐           │
//! │  │ Shard 0 │ │ Shard 1 │ │ Shard 2 │ │ ...N    │           │
//! │  │ RwLock  │ │ RwLock  │ │ RwLock  │ │ shards  │           │
//! │  └─────────┘ └─────────┘ └─────────┘ └─────────┘           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - **Sharded locking**: FNV-1a shard selection keeps concurrent clients
//!   on different locks
//! - **Bounded**: per-shard capacity with least-recently-used eviction
//! - **Lock-free statistics**: atomic hit/miss/op counters
//!
//! ## Example
//!
//! ```
//! use embercache::cache::LruCache;
//! use bytes::Bytes;
//!
//! let cache = LruCache::new(1024);
//! cache.put(Bytes::from("foo"), Bytes::from("bar"));
//! assert_eq!(cache.get(b"foo"), Some(Bytes::from("bar")));
//! ```

pub mod lru;

// Re-export commonly used types
pub use lru::{CacheStats, LruCache, DEFAULT_SHARD_COUNT};
