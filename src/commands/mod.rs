//! Command Processing Module
//!
//! Receives parsed RESP commands, executes them against the cache, and
//! produces reply values.
//!
//! ## Architecture
//!
//! ```text
//! Client Request
//!       │
//!       ▼
//! ┌─────────────────┐
//! │  RESP Parser    │  (protocol module)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ CommandHandler  │  (this module)
//! │                 │
//! │  - Validate     │
//! │  - Dispatch     │
//! │  - Execute      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    LruCache     │  (cache module)
//! └─────────────────┘
//! ```
//!
//! ## Supported Commands
//!
//! - `PING [message]`
//! - `SET key value` / `PUT key value`
//! - `GET key`
//! - `STATS`

pub mod handler;

// Re-export the main command handler
pub use handler::{CommandHandler, MAX_KEY_VALUE_LEN};
