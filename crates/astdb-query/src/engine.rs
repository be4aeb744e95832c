//! The query engine (spec.md §4.6): owns a frozen snapshot, its eager CID
//! index, the memo table, the dependency index, and engine statistics.

use astdb_error::{AstDbError, Diagnostic, Result};
use astdb_store::Snapshot;
use astdb_types::{Cid, CidOpts};
use blake3::Hasher;
use tracing::{instrument, warn};

use crate::args::{encode_args, QueryArg};
use crate::cidindex::CidIndex;
use crate::cycle::{add_dependency, start_query};
use crate::deps::DependencyIndex;
use crate::ids::QueryId;
use crate::memo::{CachedResult, MemoKey, MemoTable};
use crate::purity::{PurityMode, QueryCx};
use crate::queries;
use crate::results::QueryResult;
use crate::stats::{EngineStats, StatsInner};
use parking_lot::Mutex;

fn hash_args(query_id: QueryId, args: &[QueryArg]) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(&[query_id.as_u8()]);
    hasher.update(&encode_args(args));
    *hasher.finalize().as_bytes()
}

/// Owns a frozen [`Snapshot`] plus everything the named query surface
/// needs to answer queries against it: an eagerly built CID index, the
/// sharded memo table, the CID-keyed dependency reverse index, and atomic
/// statistics counters (spec.md §4.6).
///
/// Construction freezes the snapshot and computes every node/declaration
/// CID once so that, from then on, queries run against a read-only
/// snapshot and can be answered concurrently (spec.md §5).
pub struct QueryEngine {
    snapshot: Snapshot,
    cid_index: CidIndex,
    memo: MemoTable,
    deps: DependencyIndex,
    stats: StatsInner,
    diagnostics: Mutex<Vec<Diagnostic>>,
    mode: PurityMode,
}

impl QueryEngine {
    /// Freeze `snapshot`, eagerly compute its full CID index under `opts`,
    /// and build an engine ready to answer queries.
    ///
    /// # Errors
    /// Propagates any error the eager CID computation pass raises.
    pub fn new(mut snapshot: Snapshot, opts: &CidOpts, mode: PurityMode) -> Result<Self> {
        snapshot.freeze();
        let cid_index = CidIndex::build(&mut snapshot, opts)?;
        Ok(Self {
            snapshot,
            cid_index,
            memo: MemoTable::new(),
            deps: DependencyIndex::new(),
            stats: StatsInner::default(),
            diagnostics: Mutex::new(Vec::new()),
            mode,
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn cid_index(&self) -> &CidIndex {
        &self.cid_index
    }

    /// Execute `query_id` with `args`, consulting (and populating) the
    /// memo table, tracking dependencies, and guarding against cycles
    /// (spec.md §4.6 Scenarios 4/6).
    ///
    /// # Errors
    /// `NonCanonicalArg` if `args` do not match the query's expected
    /// shape; `Cycle` if executing this query would close a dependency
    /// cycle; `ImpureFileSystem`/`ImpureNetwork`/`ImpureEnvironment` if a
    /// query body records an impure attempt while in
    /// [`PurityMode::Debug`].
    #[instrument(skip(self, args), fields(query = %query_id))]
    pub fn execute(&self, query_id: QueryId, args: &[QueryArg]) -> Result<QueryResult> {
        self.stats.record_query();
        let args_hash = hash_args(query_id, args);
        let key = MemoKey { query_id, args_hash };

        if let Some(cached) = self.memo.get(&key) {
            self.stats.record_hit();
            return Ok(cached.data);
        }
        self.stats.record_miss();

        let guard = start_query(key)?;
        let result = self.run_dispatch(query_id, args);
        drop(guard);

        let (data, dependencies) = result?;
        self.deps.record(key, dependencies.clone());
        self.memo.insert(
            key,
            CachedResult {
                data: data.clone(),
                dependencies,
            },
        );
        Ok(data)
    }

    fn run_dispatch(
        &self,
        query_id: QueryId,
        args: &[QueryArg],
    ) -> Result<(QueryResult, smallvec::SmallVec<[Cid; 4]>)> {
        let cx = QueryCx::new(&self.snapshot, self.mode);
        let data = match query_id {
            QueryId::ResolveName => queries::run_resolve_name(&cx, &self.cid_index, args),
            QueryId::TypeOf => queries::run_type_of(&cx, &self.cid_index, args),
            QueryId::Effects => queries::run_effects(&cx, &self.cid_index, args),
            QueryId::Dispatch => queries::run_dispatch(&cx, &self.cid_index, args),
            QueryId::Hover => queries::run_hover(&cx, &self.cid_index, args),
            QueryId::Definition => queries::run_definition(&cx, &self.cid_index, args),
            QueryId::References => queries::run_references(&cx, &self.cid_index, args),
        };
        let (dependencies, diags) = cx.into_parts();
        if !diags.is_empty() {
            self.diagnostics.lock().extend(diags);
        }
        data.map(|d| (d, dependencies))
    }

    /// Record a dependency edge from the currently executing query (if
    /// any) onto `to`, rejecting it if it would close a cycle. Exposed
    /// for direct testing of the cycle detector against the engine's own
    /// memo keys (spec.md §8 Scenario 4).
    ///
    /// # Errors
    /// `AstDbError::Cycle` if the edge would close a cycle.
    pub fn check_dependency_edge(&self, from: MemoKey, to: MemoKey) -> Result<()> {
        add_dependency(from, to)
    }

    /// Evict every memo entry that depended on `cid` (spec.md §4.6 "On
    /// invalidation... memo entries whose dependency set contains that
    /// CID are evicted").
    pub fn announce_change(&self, cid: Cid) {
        for key in self.deps.dependents_of(cid) {
            self.memo.remove(&key);
            self.deps.remove(&key);
        }
    }

    #[must_use]
    pub fn stats(&self) -> EngineStats {
        self.stats.snapshot(self.memo.len())
    }

    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }

    /// Resolve a `Cid` query argument of unknown subject kind (node vs.
    /// declaration) to whichever it turns out to be; callers that need
    /// one specific kind should use [`CidIndex::node_of_cid`] /
    /// [`CidIndex::decl_of_cid`] directly.
    #[must_use]
    pub fn resolve_cid(&self, cid: Cid) -> Option<CidSubjectResolved> {
        if let Some(node) = self.cid_index.node_of_cid(cid) {
            return Some(CidSubjectResolved::Node(node));
        }
        if let Some(decl) = self.cid_index.decl_of_cid(cid) {
            return Some(CidSubjectResolved::Decl(decl));
        }
        if cid == self.cid_index.module_cid() {
            return Some(CidSubjectResolved::Module);
        }
        warn!(%cid, "cid does not resolve to any known node, decl, or module");
        None
    }
}

/// What a CID argument turned out to address, once resolved through the
/// engine's index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CidSubjectResolved {
    Node(astdb_types::NodeId),
    Decl(astdb_types::DeclId),
    Module,
}
