//! Sharded Concurrent LRU Cache
//!
//! This module implements the bounded key-value store behind the server.
//! Keys are distributed across shards by an FNV-1a hash so that concurrent
//! clients mostly touch different locks.
//!
//! ## Concurrency Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        LruCache                             │
//! │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐           │
//! │  │ Shard 0 │ │ Shard 1 │ │ Shard 2 │ │ ...256  │           │
//! │  │ RwLock  │ │ RwLock  │ │ RwLock  │ │ shards  │           │
//! │  │ map+list│ │ map+list│ │ map+list│ │         │           │
//! │  └─────────┘ └─────────┘ └─────────┘ └─────────┘           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each shard owns a map from key to recency-list node plus a doubly linked
//! recency list (front = most recently used). Eviction removes the list
//! tail of the shard being written to, so LRU ordering is approximate
//! across the whole cache. Hit/miss/op counters are atomics updated outside
//! the shard locks.
//!
//! ## Locking in `get`
//!
//! A hit takes the shard's read lock to find the node and clone the value,
//! releases it, then takes the write lock to promote the node to the front.
//! Between the two locks another writer may evict the key; promotion
//! re-checks presence and does nothing if the key is gone. The value
//! observed under the read lock is still returned.

use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Default number of shards. A power of two, so the shard index is a
/// bitmask of the key hash rather than a division.
pub const DEFAULT_SHARD_COUNT: usize = 256;

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// FNV-1a over the key bytes: XOR each byte into the accumulator, then
/// multiply by the prime.
#[inline]
fn fnv1a(key: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in key {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Index of a node in a shard's recency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeIndex(u32);

/// One cached key-value pair, owned by exactly one list node.
#[derive(Debug)]
struct CacheEntry {
    key: Bytes,
    value: Bytes,
}

#[derive(Debug)]
struct Node {
    entry: CacheEntry,
    prev: Option<NodeIndex>,
    next: Option<NodeIndex>,
}

/// Slab-backed doubly linked recency list with O(1) push-front, detach and
/// pop-back. Nodes are linked by index instead of pointer; vacated slots
/// are recycled through a free list, so a shard at capacity stops
/// allocating.
#[derive(Debug, Default)]
struct RecencyList {
    slots: Vec<Option<Node>>,
    free: Vec<u32>,
    head: Option<NodeIndex>,
    tail: Option<NodeIndex>,
    len: usize,
}

impl RecencyList {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn node(&self, idx: NodeIndex) -> &Node {
        self.slots[idx.0 as usize]
            .as_ref()
            .expect("recency list index points at vacant slot")
    }

    fn node_mut(&mut self, idx: NodeIndex) -> &mut Node {
        self.slots[idx.0 as usize]
            .as_mut()
            .expect("recency list index points at vacant slot")
    }

    fn value(&self, idx: NodeIndex) -> &Bytes {
        &self.node(idx).entry.value
    }

    fn set_value(&mut self, idx: NodeIndex, value: Bytes) {
        self.node_mut(idx).entry.value = value;
    }

    /// Inserts an entry at the front (most recently used) position.
    fn push_front(&mut self, entry: CacheEntry) -> NodeIndex {
        let node = Node {
            entry,
            prev: None,
            next: self.head,
        };

        let idx = match self.free.pop() {
            Some(slot) => {
                self.slots[slot as usize] = Some(node);
                NodeIndex(slot)
            }
            None => {
                self.slots.push(Some(node));
                NodeIndex((self.slots.len() - 1) as u32)
            }
        };

        if let Some(old_head) = self.head {
            self.node_mut(old_head).prev = Some(idx);
        } else {
            self.tail = Some(idx);
        }
        self.head = Some(idx);
        self.len += 1;
        idx
    }

    /// Unlinks a node without freeing its slot.
    fn unlink(&mut self, idx: NodeIndex) {
        let (prev, next) = {
            let node = self.node(idx);
            (node.prev, node.next)
        };

        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
    }

    /// Moves an existing node to the front (most recently used) position.
    fn move_to_front(&mut self, idx: NodeIndex) {
        if self.head == Some(idx) {
            return;
        }

        self.unlink(idx);

        let old_head = self.head;
        {
            let node = self.node_mut(idx);
            node.prev = None;
            node.next = old_head;
        }
        if let Some(h) = old_head {
            self.node_mut(h).prev = Some(idx);
        } else {
            self.tail = Some(idx);
        }
        self.head = Some(idx);
    }

    /// Removes and returns the back (least recently used) entry.
    fn pop_back(&mut self) -> Option<CacheEntry> {
        let idx = self.tail?;
        self.unlink(idx);

        let node = self.slots[idx.0 as usize]
            .take()
            .expect("recency list tail points at vacant slot");
        self.free.push(idx.0);
        self.len -= 1;
        Some(node.entry)
    }
}

/// One shard: the key map and the recency list it indexes into, guarded
/// together by a single lock.
#[derive(Debug, Default)]
struct Shard {
    items: HashMap<Bytes, NodeIndex>,
    recency: RecencyList,
}

/// Atomic operation counters. Updated with relaxed ordering outside the
/// shard locks, so any read is a valid per-counter snapshot but not a
/// consistent snapshot across counters.
#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    gets: AtomicU64,
    puts: AtomicU64,
    evictions: AtomicU64,
}

/// A point-in-time view of cache statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Configured total capacity.
    pub capacity: usize,
    /// Current number of entries summed across shards.
    pub size: usize,
    /// Total get operations.
    pub gets: u64,
    /// Total put operations.
    pub puts: u64,
    /// Gets that found the key.
    pub hits: u64,
    /// Gets that did not find the key.
    pub misses: u64,
    /// Entries removed to make room.
    pub evictions: u64,
}

impl CacheStats {
    /// Hit rate in percent; `0.00` when no gets have been served.
    pub fn hit_rate(&self) -> f64 {
        if self.gets == 0 {
            0.0
        } else {
            self.hits as f64 / self.gets as f64 * 100.0
        }
    }
}

/// A bounded, sharded, thread-safe LRU map from byte keys to byte values.
///
/// Designed to be wrapped in an `Arc` and shared across all connection
/// tasks. All operations take `&self`.
///
/// # Example
///
/// ```
/// use embercache::cache::LruCache;
/// use bytes::Bytes;
///
/// let cache = LruCache::new(1024);
/// cache.put(Bytes::from("name"), Bytes::from("bar"));
/// assert_eq!(cache.get(b"name"), Some(Bytes::from("bar")));
/// assert_eq!(cache.get(b"absent"), None);
/// ```
#[derive(Debug)]
pub struct LruCache {
    shards: Vec<RwLock<Shard>>,
    shard_mask: u32,
    capacity: usize,
    per_shard_capacity: usize,
    counters: Counters,
}

impl LruCache {
    /// Creates a cache with the default shard count.
    pub fn new(capacity: usize) -> Self {
        Self::with_shards(capacity, DEFAULT_SHARD_COUNT)
    }

    /// Creates a cache with an explicit shard count.
    ///
    /// # Panics
    ///
    /// Panics if `shard_count` is zero or not a power of two.
    pub fn with_shards(capacity: usize, shard_count: usize) -> Self {
        assert!(
            shard_count.is_power_of_two(),
            "shard count must be a power of two, got {}",
            shard_count
        );

        let shards = (0..shard_count).map(|_| RwLock::default()).collect();

        // Integer division truncates, so the effective total can round
        // down below `capacity`. The remainder is not redistributed.
        let per_shard_capacity = std::cmp::max(1, capacity / shard_count);

        Self {
            shards,
            shard_mask: (shard_count - 1) as u32,
            capacity,
            per_shard_capacity,
            counters: Counters::default(),
        }
    }

    /// Configured total capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Upper bound on entries in a single shard.
    pub fn per_shard_capacity(&self) -> usize {
        self.per_shard_capacity
    }

    /// Number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    #[inline]
    fn shard_for(&self, key: &[u8]) -> &RwLock<Shard> {
        &self.shards[(fnv1a(key) & self.shard_mask) as usize]
    }

    /// Inserts or updates a key, promoting it to the most-recently-used
    /// position of its shard. If the shard is over capacity afterwards,
    /// the least-recently-used entry of that shard is evicted.
    pub fn put(&self, key: Bytes, value: Bytes) {
        self.counters.puts.fetch_add(1, Ordering::Relaxed);

        let shard = self.shard_for(&key);
        let mut guard = shard.write().unwrap();

        if let Some(&idx) = guard.items.get(&key) {
            guard.recency.move_to_front(idx);
            guard.recency.set_value(idx, value);
            return;
        }

        let idx = guard.recency.push_front(CacheEntry {
            key: key.clone(),
            value,
        });
        guard.items.insert(key, idx);

        // Insert-then-evict: a full shard of one element still accepts the
        // new entry and then drops its previous occupant.
        if guard.recency.len() > self.per_shard_capacity {
            if let Some(evicted) = guard.recency.pop_back() {
                guard.items.remove(&evicted.key);
                self.counters.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Looks up a key. A hit returns a clone of the value and promotes the
    /// entry; a miss returns `None`.
    pub fn get(&self, key: &[u8]) -> Option<Bytes> {
        self.counters.gets.fetch_add(1, Ordering::Relaxed);

        let shard = self.shard_for(key);

        // Read-lock fast path: find the node and copy the value out.
        let value = {
            let guard = shard.read().unwrap();
            guard
                .items
                .get(key)
                .map(|&idx| guard.recency.value(idx).clone())
        };

        let value = match value {
            Some(v) => v,
            None => {
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
        };

        // Promotion needs the write lock. Between the release above and
        // the acquire here another writer may have evicted or replaced the
        // key, so look it up again; if it is gone the promotion is a no-op
        // and the value observed under the read lock is still returned.
        {
            let mut guard = shard.write().unwrap();
            if let Some(&idx) = guard.items.get(key) {
                guard.recency.move_to_front(idx);
            }
        }

        self.counters.hits.fetch_add(1, Ordering::Relaxed);
        Some(value)
    }

    /// Current number of entries, summed shard by shard.
    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| shard.read().unwrap().items.len())
            .sum()
    }

    /// Returns true if no shard holds any entry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of counters plus the current size.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            capacity: self.capacity,
            size: self.len(),
            gets: self.counters.gets.load(Ordering::Relaxed),
            puts: self.counters.puts.load(Ordering::Relaxed),
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            evictions: self.counters.evictions.load(Ordering::Relaxed),
        }
    }
}
