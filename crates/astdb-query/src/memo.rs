//! The sharded memo table (spec.md §4.6 "Memo table").
//!
//! A `MemoKey` is `{ query_id, args_hash }`; `args_hash` is BLAKE3 over the
//! canonical argument encoding plus the query ID byte (`hash.rs`). Sharding
//! spreads entries across a fixed bucket count so concurrent readers on
//! different shards never contend, the same load-spreading tradeoff the
//! teacher's page cache makes over pages rather than a single global lock.

use hashbrown::HashMap;
use parking_lot::RwLock;
use smallvec::SmallVec;

use astdb_types::Cid;

use crate::ids::QueryId;
use crate::results::QueryResult;

/// Number of memo-table shards. A power of two so the shard index is a
/// cheap mask over the first byte of `args_hash`.
const SHARD_COUNT: usize = 16;

/// Identifies one memoized query invocation: the query and its canonical
/// argument hash (spec.md §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoKey {
    pub query_id: QueryId,
    pub args_hash: [u8; 32],
}

/// A memoized result plus the CIDs it depended on (spec.md §4.6
/// "Dependency tracking"). `dependencies` uses `SmallVec` since most
/// queries touch a handful of CIDs.
#[derive(Debug, Clone)]
pub struct CachedResult {
    pub data: QueryResult,
    pub dependencies: SmallVec<[Cid; 4]>,
}

#[derive(Default)]
struct Shard {
    entries: HashMap<MemoKey, CachedResult>,
}

/// A sharded map from `MemoKey` to `CachedResult` (spec.md §4.6).
pub struct MemoTable {
    shards: Vec<RwLock<Shard>>,
}

impl MemoTable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            shards: (0..SHARD_COUNT).map(|_| RwLock::new(Shard::default())).collect(),
        }
    }

    fn shard_for(&self, key: &MemoKey) -> &RwLock<Shard> {
        let index = key.args_hash[0] as usize % self.shards.len();
        &self.shards[index]
    }

    #[must_use]
    pub fn get(&self, key: &MemoKey) -> Option<CachedResult> {
        self.shard_for(key).read().entries.get(key).cloned()
    }

    pub fn insert(&self, key: MemoKey, value: CachedResult) {
        self.shard_for(&key).write().entries.insert(key, value);
    }

    pub fn remove(&self, key: &MemoKey) {
        self.shard_for(key).write().entries.remove(key);
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        self.shards.iter().map(|shard| shard.read().entries.len() as u64).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoTable {
    fn default() -> Self {
        Self::new()
    }
}
