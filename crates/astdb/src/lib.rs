//! Public facade over the ASTDB core: construction (spec.md §6), canonical
//! serialization and CID computation (§4.3/§4.4), the kind-validated
//! accessor schema (§4.5), and the named query engine (§4.6).
//!
//! A host builds a snapshot through [`Snapshot`]'s `add_*` construction
//! surface, calls [`freeze`](Snapshot::freeze) once parsing/binding is
//! complete, computes CIDs with [`cid_of`], and builds a [`QueryEngine`]
//! to answer named queries. Accessor modules (`binary_expr`, `call_expr`,
//! ...) are re-exported under [`schema`] unchanged from their defining
//! crate -- this facade adds no behavior of its own over construction
//! convenience and a couple of ergonomic re-exports.

pub use astdb_error::{AstDbError, Diagnostic, DiagnosticCode, Result};
pub use astdb_query::{
    active_stack_is_empty, add_dependency, decode_args, encode_args, start_query, ActiveGuard,
    CachedResult, CidIndex, CidSubjectResolved, DefinitionInfo, DependencyIndex, DispatchInfo,
    EffectsInfo, EngineStats, HoverInfo, ImpureKind, MemoKey, MemoTable, PurityMode, QueryArg,
    QueryCx, QueryEngine, QueryId, QueryResult, SymbolInfo, TypeInfo,
};
pub use astdb_store::{FuncMasks, NodeRow, Snapshot, StringInterner};
pub use astdb_types::{
    Cid, CidOpts, CidSubject, DeclId, DeclKind, DiagId, EdgeId, EffectMask, NodeId, NodeKind,
    ProfileMask, RefId, ScopeId, Severity, Span, StrId, TokenId, TokenKind, TypeId, UnitId,
};

/// The kind-validated accessor schema (spec.md §4.5): one module per
/// compound node kind, each returning `Option`/`Vec` rather than panicking
/// on a kind mismatch.
pub mod schema {
    pub use astdb_schema::*;
}

/// `computeCID(snapshot, subject, opts) -> CID` (spec.md §4.4).
///
/// # Errors
/// Propagates a dangling node/decl id reachable while folding `subject`.
#[tracing::instrument(skip(snapshot, opts))]
pub fn cid_of(snapshot: &mut Snapshot, subject: CidSubject, opts: &CidOpts) -> Result<Cid> {
    astdb_cid::compute_cid(snapshot, subject, opts)
}

/// `validate(snapshot, subject, expected, opts) -> bool` (spec.md §4.4):
/// recompute `subject`'s CID and compare byte-for-byte against `expected`.
///
/// # Errors
/// Propagates a dangling node/decl id reachable while folding `subject`.
#[tracing::instrument(skip(snapshot, opts))]
pub fn validate_cid(
    snapshot: &mut Snapshot,
    subject: CidSubject,
    expected: Cid,
    opts: &CidOpts,
) -> Result<bool> {
    astdb_cid::validate(snapshot, subject, expected, opts)
}
