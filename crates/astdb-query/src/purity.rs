//! The purity guard (spec.md §4.6 "Purity guard", §9 "Purity guard"
//! redesign note, SPEC_FULL.md §3 "`Cx`-style restricted capability
//! handle").
//!
//! There is no ambient filesystem/network/environment handle reachable
//! from inside a query body in this core to begin with -- a pure Rust
//! in-memory store has nothing to intercept. The guard is instead a
//! capability curtain: `QueryCx` is the only handle a query body receives,
//! and it exposes just the pure facilities (snapshot lookup, accessors,
//! interner read, dependency recording). `record_impure_attempt` is the
//! explicit escape hatch test code and hosts simulating an impure query
//! call to exercise the `Q1001`/`Q1003`/`Q1005` diagnostic paths (spec.md
//! §4.6 Scenario 5); the capability set is narrowed by construction rather
//! than policed at runtime.

use std::cell::RefCell;

use astdb_error::{AstDbError, Diagnostic, Result};
use astdb_store::Snapshot;
use astdb_types::Cid;
use smallvec::SmallVec;

/// The kind of side-effecting operation a query attempted (spec.md §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpureKind {
    FileSystem,
    Network,
    Environment,
}

/// Debug mode aborts the query on a purity violation; production mode
/// records the diagnostic and lets the query continue (spec.md §4.6
/// "Purity guard").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurityMode {
    Debug,
    Production,
}

/// The restricted handle a query body runs against. Pure operations
/// (snapshot reads, accessors, interner lookups) are always available;
/// reading through it records the CID dependencies that feed the memo
/// table's invalidation (spec.md §4.6 "Dependency tracking").
pub struct QueryCx<'a> {
    snapshot: &'a Snapshot,
    mode: PurityMode,
    dependencies: RefCell<SmallVec<[Cid; 4]>>,
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl<'a> QueryCx<'a> {
    /// Build a restricted handle over `snapshot`. Exposed publicly so
    /// compliance tests can exercise the purity guard directly against a
    /// query body that simulates an impure operation (spec.md §8
    /// Scenario 5), not just through the seven named queries, none of
    /// which perform I/O themselves.
    #[must_use]
    pub fn new(snapshot: &'a Snapshot, mode: PurityMode) -> Self {
        Self {
            snapshot,
            mode,
            dependencies: RefCell::new(SmallVec::new()),
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Read-only access to the underlying snapshot -- the only source of
    /// truth a pure query may consult.
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        self.snapshot
    }

    /// Record that the result being built depends on `cid`'s content.
    pub fn record_dependency(&self, cid: Cid) {
        self.dependencies.borrow_mut().push(cid);
    }

    /// Simulate an attempted side-effecting operation from inside a query
    /// body (spec.md §4.6 Scenario 5). In debug mode this fails the query;
    /// in production mode it records a diagnostic and returns `Ok`.
    ///
    /// # Errors
    /// The matching `Q1001`/`Q1003`/`Q1005` error in [`PurityMode::Debug`].
    pub fn record_impure_attempt(&self, kind: ImpureKind) -> Result<()> {
        let (diag, err) = match kind {
            ImpureKind::FileSystem => (Diagnostic::impure_file_system(), AstDbError::ImpureFileSystem),
            ImpureKind::Network => (Diagnostic::impure_network(), AstDbError::ImpureNetwork),
            ImpureKind::Environment => {
                (Diagnostic::impure_environment(), AstDbError::ImpureEnvironment)
            }
        };
        self.diagnostics.borrow_mut().push(diag);
        match self.mode {
            PurityMode::Debug => Err(err),
            PurityMode::Production => Ok(()),
        }
    }

    pub(crate) fn into_parts(self) -> (SmallVec<[Cid; 4]>, Vec<Diagnostic>) {
        (self.dependencies.into_inner(), self.diagnostics.into_inner())
    }

    /// Diagnostics recorded on this handle so far, without consuming it
    /// (spec.md §8 Scenario 5: "exactly one diagnostic recorded").
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }
}
