//! # EmberCache - A Bounded In-Memory Key-Value Cache
//!
//! EmberCache is an in-memory key-value cache that speaks the Redis
//! Serialization Protocol (RESP) over TCP. It serves a small command
//! vocabulary (`PING`, `GET`, `SET`/`PUT`, `STATS`) and bounds its memory
//! use with approximate least-recently-used eviction.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                            EmberCache                               │
//! │                                                                     │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐              │
//! │  │ TCP Server  │───>│ Connection  │───>│  Command    │              │
//! │  │ (Listener)  │    │  Handler    │    │  Handler    │              │
//! │  └─────────────┘    └─────────────┘    └──────┬──────┘              │
//! │                                               │                     │
//! │                                               ▼                     │
//! │  ┌─────────────┐    ┌──────────────────────────────────────────┐   │
//! │  │   RESP      │    │                LruCache                  │   │
//! │  │   Parser    │    │  ┌────────┐ ┌────────┐ ┌────────┐        │   │
//! │  │             │    │  │Shard 0 │ │Shard 1 │ │...256  │        │   │
//! │  └─────────────┘    │  │RwLock  │ │RwLock  │ │shards  │        │   │
//! │                     │  └────────┘ └────────┘ └────────┘        │   │
//! │                     └──────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use embercache::cache::LruCache;
//! use embercache::commands::CommandHandler;
//! use embercache::connection::{handle_connection, ConnectionStats};
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() {
//!     let cache = Arc::new(LruCache::new(1_000_000));
//!     let stats = Arc::new(ConnectionStats::new());
//!
//!     let listener = TcpListener::bind("0.0.0.0:7171").await.unwrap();
//!
//!     loop {
//!         let (stream, addr) = listener.accept().await.unwrap();
//!         let handler = CommandHandler::new(Arc::clone(&cache));
//!         let stats = Arc::clone(&stats);
//!
//!         tokio::spawn(handle_connection(stream, addr, handler, stats));
//!     }
//! }
//! ```
//!
//! ## Supported Commands
//!
//! - `PING [message]` - Liveness check; echoes the optional argument
//! - `SET key value` - Insert or update (`+OK`)
//! - `PUT key value` - Same operation with a JSON status reply
//! - `GET key` - Fetch a value; null bulk on miss
//! - `STATS` - Hit/miss/eviction counters and current size
//!
//! ## Module Overview
//!
//! - [`protocol`]: RESP value model, streaming parser and serializer
//! - [`cache`]: Sharded concurrent LRU store
//! - [`commands`]: Command validation and dispatch
//! - [`connection`]: Per-client connection pipelines
//!
//! ## Design Highlights
//!
//! ### Sharded Concurrency
//!
//! The cache splits its keyspace across 256 shards selected by an FNV-1a
//! hash of the key. Each shard pairs a hash map with a doubly linked
//! recency list under one `RwLock`, so clients touching different shards
//! never contend. Statistics counters are atomics outside the locks.
//!
//! ### Approximate LRU
//!
//! Eviction is least-recently-used per shard, not globally: when a shard
//! is full its own coldest entry is dropped. This trades strict global
//! ordering for much less lock contention.
//!
//! ### Streaming Protocol Handling
//!
//! The RESP parser consumes whatever fragment of the stream has arrived
//! and picks up where it left off, so commands split across TCP packets
//! and several commands in one packet both work.

pub mod cache;
pub mod commands;
pub mod connection;
pub mod protocol;

// Re-export commonly used types for convenience
pub use cache::{CacheStats, LruCache};
pub use commands::CommandHandler;
pub use connection::{handle_connection, ConnectionStats};
pub use protocol::{ParseError, RespParser, RespValue};

/// The default port the server listens on
pub const DEFAULT_PORT: u16 = 7171;

/// The default host the server binds to
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default total cache capacity in entries
pub const DEFAULT_CAPACITY: usize = 1_000_000;

/// Version of EmberCache
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
