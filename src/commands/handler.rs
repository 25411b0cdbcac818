//! Command Handler Module
//!
//! This module implements the command processing layer. It receives one
//! parsed RESP value per request, validates its shape, executes it against
//! the cache, and returns the reply value.
//!
//! ## Supported Commands
//!
//! - `PING [message]` - Test connection; echoes the optional argument
//! - `SET key value` - Insert or update a key, replies `+OK`
//! - `PUT key value` - Same operation, replies with a JSON status bulk
//! - `GET key` - Fetch a key; `$-1` on miss
//! - `STATS` - One-line cache statistics summary
//!
//! Command names are case-insensitive. Keys and values are capped at 256
//! bytes; the protocol layer imposes no cap of its own.

use crate::cache::LruCache;
use crate::protocol::RespValue;
use bytes::Bytes;
use std::sync::Arc;

/// Maximum length in bytes for a key or value accepted by SET/PUT.
pub const MAX_KEY_VALUE_LEN: usize = 256;

/// Reply body for a successful PUT.
const PUT_OK_BODY: &str = r#"{"status":"OK","message":"Key inserted/updated successfully."}"#;

/// Dispatches decoded commands against the cache.
///
/// Cloning is cheap; each connection task holds its own handle to the
/// shared cache. The cache is an explicit value threaded in at startup,
/// never a process-wide global.
#[derive(Debug, Clone)]
pub struct CommandHandler {
    cache: Arc<LruCache>,
}

impl CommandHandler {
    /// Creates a new command handler over the given cache.
    pub fn new(cache: Arc<LruCache>) -> Self {
        Self { cache }
    }

    /// Executes one command and returns the reply.
    ///
    /// # Arguments
    ///
    /// * `command` - The parsed RESP value (clients send an array of bulk
    ///   strings)
    pub fn execute(&self, command: RespValue) -> RespValue {
        let args = match command {
            RespValue::Array(args) => args,
            _ => return RespValue::error("ERR invalid command format"),
        };

        if args.is_empty() {
            return RespValue::error("ERR empty command");
        }

        // Command name comes from the first slot, uppercased in ASCII.
        let name = match &args[0] {
            RespValue::BulkString(b) => String::from_utf8_lossy(b).to_ascii_uppercase(),
            RespValue::SimpleString(s) => s.to_ascii_uppercase(),
            _ => return RespValue::error("ERR invalid command type"),
        };

        self.dispatch(&name, &args)
    }

    /// Dispatches a command to its handler. `args` includes the name slot.
    fn dispatch(&self, name: &str, args: &[RespValue]) -> RespValue {
        match name {
            "PING" => self.cmd_ping(args),
            "SET" | "PUT" => self.cmd_set(name, args),
            "GET" => self.cmd_get(args),
            "STATS" => self.cmd_stats(),
            _ => RespValue::error(format!("ERR unknown command '{}'", name)),
        }
    }

    /// Extracts key/value bytes from an argument. Anything that is not a
    /// bulk or simple string reads as the empty string.
    fn arg_bytes(value: &RespValue) -> Bytes {
        match value {
            RespValue::BulkString(b) => b.clone(),
            RespValue::SimpleString(s) => Bytes::from(s.clone()),
            _ => Bytes::new(),
        }
    }

    /// PING [message]
    fn cmd_ping(&self, args: &[RespValue]) -> RespValue {
        if args.len() > 2 {
            return RespValue::error("ERR wrong number of arguments for 'PING' command");
        }

        if args.len() == 1 {
            return RespValue::pong();
        }

        // Echo the argument, preserving its bulk/simple variant. Any other
        // shape echoes as an empty simple string.
        match &args[1] {
            RespValue::BulkString(b) => RespValue::BulkString(b.clone()),
            RespValue::SimpleString(s) => RespValue::simple_string(s.clone()),
            _ => RespValue::simple_string(""),
        }
    }

    /// SET key value / PUT key value
    fn cmd_set(&self, name: &str, args: &[RespValue]) -> RespValue {
        if args.len() != 3 {
            return RespValue::error(format!(
                "ERR wrong number of arguments for '{}' command",
                name
            ));
        }

        let key = Self::arg_bytes(&args[1]);
        let value = Self::arg_bytes(&args[2]);

        if key.len() > MAX_KEY_VALUE_LEN || value.len() > MAX_KEY_VALUE_LEN {
            return RespValue::error("ERR key or value too long (max 256 chars)");
        }

        self.cache.put(key, value);

        if name == "PUT" {
            RespValue::bulk_string(PUT_OK_BODY)
        } else {
            RespValue::ok()
        }
    }

    /// GET key
    fn cmd_get(&self, args: &[RespValue]) -> RespValue {
        if args.len() != 2 {
            return RespValue::error("ERR wrong number of arguments for 'GET' command");
        }

        let key = Self::arg_bytes(&args[1]);

        match self.cache.get(&key) {
            Some(value) => RespValue::BulkString(value),
            None => RespValue::null(),
        }
    }

    /// STATS
    ///
    /// Takes no arguments, but extra arguments are ignored rather than
    /// rejected.
    fn cmd_stats(&self) -> RespValue {
        let stats = self.cache.stats();
        RespValue::simple_string(format!(
            "Capacity: {}, Size: {}, Get Ops: {}, Put Ops: {}, Hits: {}, Misses: {}, Hit Rate: {:.2}%, Evictions: {}",
            stats.capacity,
            stats.size,
            stats.gets,
            stats.puts,
            stats.hits,
            stats.misses,
            stats.hit_rate(),
            stats.evictions,
        ))
    }
}
