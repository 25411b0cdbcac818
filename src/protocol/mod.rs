//! RESP Protocol Implementation
//!
//! This module implements the Redis Serialization Protocol (RESP): the value
//! model, a streaming parser for fragmented TCP input, and the canonical
//! serializer.
//!
//! ## Modules
//!
//! - `types`: Defines the `RespValue` enum and serialization
//! - `parser`: Incremental parser for incoming RESP data
//!
//! ## Example
//!
//! ```ignore
//! use embercache::protocol::{parse_message, RespValue};
//! use bytes::Bytes;
//!
//! // Parsing incoming data
//! let data = b"*2\r\n$3\r\nGET\r\n$4\r\nname\r\n";
//! let (value, consumed) = parse_message(data).unwrap().unwrap();
//!
//! // Creating replies
//! let reply = RespValue::bulk_string(Bytes::from("bar"));
//! let bytes = reply.serialize();
//! ```

pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use parser::{parse_message, ParseError, ParseResult, RespParser};
pub use types::RespValue;
