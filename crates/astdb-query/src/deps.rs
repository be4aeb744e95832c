//! CID-keyed dependency tracking and invalidation (spec.md §4.6
//! "Dependency tracking", invariant 9).
//!
//! Every query's result records the CIDs it read. `DependencyIndex` keeps
//! the reverse mapping (CID -> memo keys that depend on it) so
//! `announce_change(cid)` can evict exactly the affected entries instead of
//! clearing the whole memo table.

use hashbrown::{HashMap, HashSet};
use parking_lot::Mutex;
use smallvec::SmallVec;

use astdb_types::Cid;

use crate::memo::MemoKey;

#[derive(Default)]
pub struct DependencyIndex {
    forward: Mutex<HashMap<MemoKey, SmallVec<[Cid; 4]>>>,
    reverse: Mutex<HashMap<Cid, HashSet<MemoKey>>>,
}

impl DependencyIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `key`'s result depends on `dependencies`. Replaces any
    /// prior record for `key` (a re-executed query may read a different
    /// dependency set than it did before).
    pub fn record(&self, key: MemoKey, dependencies: SmallVec<[Cid; 4]>) {
        self.remove(&key);
        let mut reverse = self.reverse.lock();
        for &cid in &dependencies {
            reverse.entry(cid).or_default().insert(key);
        }
        drop(reverse);
        self.forward.lock().insert(key, dependencies);
    }

    /// Forget `key`'s dependency record entirely (used when its memo entry
    /// is evicted).
    pub fn remove(&self, key: &MemoKey) {
        let Some(dependencies) = self.forward.lock().remove(key) else {
            return;
        };
        let mut reverse = self.reverse.lock();
        for cid in dependencies {
            if let Some(dependents) = reverse.get_mut(&cid) {
                dependents.remove(key);
                if dependents.is_empty() {
                    reverse.remove(&cid);
                }
            }
        }
    }

    /// Every memo key whose recorded dependency set contains `cid`
    /// (spec.md §4.6 "On invalidation... all memo entries whose dependency
    /// set contains that CID are evicted").
    #[must_use]
    pub fn dependents_of(&self, cid: Cid) -> Vec<MemoKey> {
        self.reverse
            .lock()
            .get(&cid)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }
}
