//! Connection Handler Module
//!
//! Each accepted socket gets its own handler task that runs the
//! decode → dispatch → encode loop until the client goes away.
//!
//! ## Connection Lifecycle
//!
//! ```text
//! 1. Client connects (TCP handshake)
//!        │
//!        ▼
//! 2. Handler task spawned
//!        │
//!        ▼
//! 3. Loop: read bytes → parse RESP → execute command → write reply
//!        │
//!        ▼
//! 4. Client disconnects / error → task ends, socket closed
//! ```
//!
//! ## Buffer Management
//!
//! TCP is a stream: a single read may contain a fragment of one command or
//! several whole commands. Incoming bytes accumulate in a `BytesMut`; the
//! parser is drained until it reports incomplete input, and each reply is
//! written and flushed before the next command is decoded, so request/reply
//! stays strictly sequential within a connection.

use crate::commands::CommandHandler;
use crate::protocol::{ParseError, RespParser, RespValue};
use bytes::BytesMut;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;
use tracing::{debug, info, trace, warn};

/// Initial read buffer capacity
const INITIAL_BUFFER_SIZE: usize = 4096;

/// Statistics for connection handling
#[derive(Debug, Default)]
pub struct ConnectionStats {
    /// Total number of connections accepted
    pub connections_accepted: AtomicU64,
    /// Currently active connections
    pub active_connections: AtomicU64,
    /// Total commands processed
    pub commands_processed: AtomicU64,
    /// Total bytes read
    pub bytes_read: AtomicU64,
    /// Total bytes written
    pub bytes_written: AtomicU64,
}

impl ConnectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_opened(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
        self.active_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn command_processed(&self) {
        self.commands_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bytes_read(&self, count: usize) {
        self.bytes_read.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn bytes_written(&self, count: usize) {
        self.bytes_written
            .fetch_add(count as u64, Ordering::Relaxed);
    }
}

/// Errors that can occur while handling a connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// I/O error (network issue)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// RESP parse error
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Client disconnected normally
    #[error("client disconnected")]
    ClientDisconnected,

    /// Stream ended mid-frame
    #[error("unexpected end of stream")]
    UnexpectedEof,
}

impl ConnectionError {
    /// A quiet disconnect: clean EOF or the peer resetting the socket.
    /// These close silently; everything else is logged.
    fn is_quiet_disconnect(&self) -> bool {
        match self {
            ConnectionError::ClientDisconnected => true,
            ConnectionError::Io(e) => e.kind() == std::io::ErrorKind::ConnectionReset,
            _ => false,
        }
    }
}

/// Handles a single client connection.
///
/// Owns the read buffer, the parser state and the buffered writer for one
/// connected client.
pub struct ConnectionHandler {
    /// The TCP stream, write side buffered
    stream: BufWriter<TcpStream>,

    /// Client's address (for logging)
    addr: SocketAddr,

    /// Buffer for incoming data
    buffer: BytesMut,

    /// The command dispatcher (holds the shared cache)
    command_handler: CommandHandler,

    /// RESP parser
    parser: RespParser,

    /// Connection statistics (shared)
    stats: Arc<ConnectionStats>,
}

impl ConnectionHandler {
    /// Creates a new connection handler.
    pub fn new(
        stream: TcpStream,
        addr: SocketAddr,
        command_handler: CommandHandler,
        stats: Arc<ConnectionStats>,
    ) -> Self {
        stats.connection_opened();

        Self {
            stream: BufWriter::new(stream),
            addr,
            buffer: BytesMut::with_capacity(INITIAL_BUFFER_SIZE),
            command_handler,
            parser: RespParser::new(),
            stats,
        }
    }

    /// Runs the connection to completion.
    ///
    /// Reads commands, executes them and writes replies until the client
    /// disconnects or an error occurs. The socket is closed on every exit
    /// path when `self` is dropped.
    pub async fn run(mut self) -> Result<(), ConnectionError> {
        debug!(client = %self.addr, "client connected");

        let result = self.main_loop().await;

        match &result {
            Ok(()) => debug!(client = %self.addr, "client disconnected"),
            Err(e) if e.is_quiet_disconnect() => {
                trace!(client = %self.addr, "client went away")
            }
            Err(e) => warn!(client = %self.addr, error = %e, "connection error"),
        }

        self.stats.connection_closed();
        result
    }

    /// The decode → dispatch → encode loop.
    async fn main_loop(&mut self) -> Result<(), ConnectionError> {
        loop {
            // Drain every complete command already buffered. The reply is
            // written and flushed before the next command is decoded.
            while let Some(command) = self.try_parse_command()? {
                let reply = self.command_handler.execute(command);
                self.stats.command_processed();
                self.send_reply(&reply).await?;
            }

            self.read_more_data().await?;
        }
    }

    /// Attempts to parse one command from the buffer.
    ///
    /// A parse error tears the connection down; no reply is sent for the
    /// malformed frame.
    fn try_parse_command(&mut self) -> Result<Option<RespValue>, ConnectionError> {
        if self.buffer.is_empty() {
            return Ok(None);
        }

        match self.parser.parse(&self.buffer) {
            Ok(Some((value, consumed))) => {
                let _ = self.buffer.split_to(consumed);
                trace!(
                    client = %self.addr,
                    consumed = consumed,
                    remaining = self.buffer.len(),
                    "parsed command"
                );
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                warn!(client = %self.addr, error = %e, "protocol error");
                Err(ConnectionError::Parse(e))
            }
        }
    }

    /// Reads more data from the socket into the buffer.
    async fn read_more_data(&mut self) -> Result<(), ConnectionError> {
        if self.buffer.capacity() - self.buffer.len() < 1024 {
            self.buffer.reserve(INITIAL_BUFFER_SIZE);
        }

        let n = self.stream.get_mut().read_buf(&mut self.buffer).await?;

        if n == 0 {
            // Peer closed. With a partial frame buffered the stream ended
            // mid-command; otherwise this is a clean disconnect.
            if self.buffer.is_empty() {
                return Err(ConnectionError::ClientDisconnected);
            }
            return Err(ConnectionError::UnexpectedEof);
        }

        self.stats.bytes_read(n);
        trace!(client = %self.addr, bytes = n, "read data");

        Ok(())
    }

    /// Writes one reply and flushes it.
    async fn send_reply(&mut self, reply: &RespValue) -> Result<(), ConnectionError> {
        let bytes = reply.serialize();
        self.stream.write_all(&bytes).await?;
        self.stream.flush().await?;
        self.stats.bytes_written(bytes.len());
        trace!(client = %self.addr, bytes = bytes.len(), "sent reply");
        Ok(())
    }
}

/// Handles a client connection to completion.
///
/// Convenience wrapper spawned by the accept loop; converts handler errors
/// into log lines so the task never propagates a failure.
pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    command_handler: CommandHandler,
    stats: Arc<ConnectionStats>,
) {
    let handler = ConnectionHandler::new(stream, addr, command_handler, stats);
    if let Err(e) = handler.run().await {
        if !e.is_quiet_disconnect() {
            info!(client = %addr, error = %e, "connection ended with error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::LruCache;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn create_test_server() -> (SocketAddr, Arc<LruCache>, Arc<ConnectionStats>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let cache = Arc::new(LruCache::new(1024));
        let stats = Arc::new(ConnectionStats::new());

        let cache_clone = Arc::clone(&cache);
        let stats_clone = Arc::clone(&stats);

        tokio::spawn(async move {
            while let Ok((stream, client_addr)) = listener.accept().await {
                let handler = CommandHandler::new(Arc::clone(&cache_clone));
                let stats = Arc::clone(&stats_clone);
                tokio::spawn(handle_connection(stream, client_addr, handler, stats));
            }
        });

        (addr, cache, stats)
    }

    /// Sends one frame and reads one reply.
    async fn roundtrip(client: &mut TcpStream, send: &[u8]) -> Vec<u8> {
        client.write_all(send).await.unwrap();
        let mut buf = [0u8; 512];
        let n = client.read(&mut buf).await.unwrap();
        buf[..n].to_vec()
    }

    #[tokio::test]
    async fn test_ping_pong() {
        let (addr, _, _) = create_test_server().await;
        let mut client = TcpStream::connect(addr).await.unwrap();

        let reply = roundtrip(&mut client, b"*1\r\n$4\r\nPING\r\n").await;
        assert_eq!(reply, b"+PONG\r\n");
    }

    #[tokio::test]
    async fn test_ping_with_argument() {
        let (addr, _, _) = create_test_server().await;
        let mut client = TcpStream::connect(addr).await.unwrap();

        let reply = roundtrip(&mut client, b"*2\r\n$4\r\nPING\r\n$5\r\nhello\r\n").await;
        assert_eq!(reply, b"$5\r\nhello\r\n");
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let (addr, _, _) = create_test_server().await;
        let mut client = TcpStream::connect(addr).await.unwrap();

        let reply = roundtrip(&mut client, b"*3\r\n$3\r\nSET\r\n$3\r\nfoo\r\n$3\r\nbar\r\n").await;
        assert_eq!(reply, b"+OK\r\n");

        let reply = roundtrip(&mut client, b"*2\r\n$3\r\nGET\r\n$3\r\nfoo\r\n").await;
        assert_eq!(reply, b"$3\r\nbar\r\n");
    }

    #[tokio::test]
    async fn test_get_miss() {
        let (addr, _, _) = create_test_server().await;
        let mut client = TcpStream::connect(addr).await.unwrap();

        let reply = roundtrip(&mut client, b"*2\r\n$3\r\nGET\r\n$6\r\nabsent\r\n").await;
        assert_eq!(reply, b"$-1\r\n");
    }

    #[tokio::test]
    async fn test_set_wrong_arity() {
        let (addr, _, _) = create_test_server().await;
        let mut client = TcpStream::connect(addr).await.unwrap();

        let reply = roundtrip(&mut client, b"*2\r\n$3\r\nSET\r\n$1\r\nk\r\n").await;
        assert_eq!(
            reply,
            b"-ERR wrong number of arguments for 'SET' command\r\n"
        );
    }

    #[tokio::test]
    async fn test_oversized_key_rejected() {
        let (addr, _, _) = create_test_server().await;
        let mut client = TcpStream::connect(addr).await.unwrap();

        let key = "a".repeat(257);
        let frame = format!("*3\r\n$3\r\nSET\r\n${}\r\n{}\r\n$1\r\nv\r\n", key.len(), key);
        let reply = roundtrip(&mut client, frame.as_bytes()).await;
        assert_eq!(reply, b"-ERR key or value too long (max 256 chars)\r\n");
    }

    #[tokio::test]
    async fn test_fragmented_command() {
        let (addr, _, _) = create_test_server().await;
        let mut client = TcpStream::connect(addr).await.unwrap();

        // One command delivered a few bytes at a time.
        let frame: &[u8] = b"*3\r\n$3\r\nSET\r\n$3\r\nfoo\r\n$3\r\nbar\r\n";
        for chunk in frame.chunks(5) {
            client.write_all(chunk).await.unwrap();
            client.flush().await.unwrap();
            tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;
        }

        let mut buf = [0u8; 64];
        let n = client.read(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], b"+OK\r\n");
    }

    #[tokio::test]
    async fn test_pipelined_commands() {
        let (addr, _, _) = create_test_server().await;
        let mut client = TcpStream::connect(addr).await.unwrap();

        // Two SETs and two GETs in one write; replies come back in order.
        client
            .write_all(b"*3\r\n$3\r\nSET\r\n$2\r\nk1\r\n$2\r\nv1\r\n*3\r\n$3\r\nSET\r\n$2\r\nk2\r\n$2\r\nv2\r\n*2\r\n$3\r\nGET\r\n$2\r\nk1\r\n*2\r\n$3\r\nGET\r\n$2\r\nk2\r\n")
            .await
            .unwrap();

        let expected: &[u8] = b"+OK\r\n+OK\r\n$2\r\nv1\r\n$2\r\nv2\r\n";
        let mut buf = vec![0u8; expected.len()];
        client.read_exact(&mut buf).await.unwrap();
        assert_eq!(buf, expected);
    }

    #[tokio::test]
    async fn test_unknown_marker_closes_connection() {
        let (addr, _, _) = create_test_server().await;
        let mut client = TcpStream::connect(addr).await.unwrap();

        client.write_all(b"@bogus\r\n").await.unwrap();

        // No reply for the malformed frame; the server closes the socket.
        let mut buf = [0u8; 64];
        let n = client.read(&mut buf).await.unwrap();
        assert_eq!(n, 0);
    }

    #[tokio::test]
    async fn test_stats_over_the_wire() {
        let (addr, _, _) = create_test_server().await;
        let mut client = TcpStream::connect(addr).await.unwrap();

        let reply = roundtrip(&mut client, b"*3\r\n$3\r\nSET\r\n$1\r\nk\r\n$1\r\nv\r\n").await;
        assert_eq!(reply, b"+OK\r\n");

        let reply = roundtrip(&mut client, b"*1\r\n$5\r\nSTATS\r\n").await;
        let text = String::from_utf8(reply).unwrap();
        assert!(text.starts_with("+Capacity: 1024, Size: 1"));
        assert!(text.ends_with("\r\n"));
    }

    #[tokio::test]
    async fn test_connection_stats() {
        let (addr, _, stats) = create_test_server().await;

        assert_eq!(stats.active_connections.load(Ordering::Relaxed), 0);

        let mut client = TcpStream::connect(addr).await.unwrap();
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert_eq!(stats.connections_accepted.load(Ordering::Relaxed), 1);
        assert_eq!(stats.active_connections.load(Ordering::Relaxed), 1);

        let reply = roundtrip(&mut client, b"*1\r\n$4\r\nPING\r\n").await;
        assert_eq!(reply, b"+PONG\r\n");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert!(stats.commands_processed.load(Ordering::Relaxed) >= 1);
        assert!(stats.bytes_read.load(Ordering::Relaxed) > 0);
        assert!(stats.bytes_written.load(Ordering::Relaxed) > 0);

        drop(client);
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert_eq!(stats.active_connections.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn test_concurrent_clients() {
        let (addr, _, _) = create_test_server().await;

        let mut tasks = Vec::new();
        for t in 0..8 {
            tasks.push(tokio::spawn(async move {
                let mut client = TcpStream::connect(addr).await.unwrap();
                for i in 0..50 {
                    let key = format!("c{}:{}", t, i);
                    let set = format!(
                        "*3\r\n$3\r\nSET\r\n${}\r\n{}\r\n$1\r\nx\r\n",
                        key.len(),
                        key
                    );
                    let reply = roundtrip(&mut client, set.as_bytes()).await;
                    assert_eq!(reply, b"+OK\r\n");

                    let get = format!("*2\r\n$3\r\nGET\r\n${}\r\n{}\r\n", key.len(), key);
                    let reply = roundtrip(&mut client, get.as_bytes()).await;
                    assert_eq!(reply, b"$1\r\nx\r\n");
                }
            }));
        }

        for task in tasks {
            task.await.unwrap();
        }
    }
}
