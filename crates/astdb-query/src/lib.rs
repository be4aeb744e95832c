//! Canonical argument encoding, memoization, dependency tracking, cycle
//! detection, the purity guard, and the seven named queries (spec.md
//! §4.6 "Query engine").
//!
//! [`QueryEngine`] is the entry point: build one from a populated
//! [`astdb_store::Snapshot`] with [`QueryEngine::new`], then call
//! [`QueryEngine::execute`] with a [`QueryId`] and its canonical
//! [`QueryArg`]s.

mod args;
mod cidindex;
mod cycle;
mod deps;
mod engine;
mod ids;
mod memo;
mod purity;
mod queries;
mod results;
mod stats;

pub use args::{decode_args, encode_args, QueryArg};
pub use cidindex::CidIndex;
pub use cycle::{active_stack_is_empty, add_dependency, start_query, ActiveGuard};
pub use deps::DependencyIndex;
pub use engine::{CidSubjectResolved, QueryEngine};
pub use ids::QueryId;
pub use memo::{CachedResult, MemoKey, MemoTable};
pub use purity::{ImpureKind, PurityMode, QueryCx};
pub use results::{
    DefinitionInfo, DispatchInfo, EffectsInfo, HoverInfo, QueryResult, SymbolInfo, TypeInfo,
};
pub use stats::EngineStats;

#[cfg(test)]
mod tests {
    use super::*;
    use astdb_store::{Snapshot, StringInterner};
    use astdb_types::{CidOpts, DeclKind, NodeKind, ScopeId, Span, TokenKind};

    fn dummy_span() -> Span {
        Span::new(0, 1, 1, 1, 1, 2)
    }

    /// Spec.md §8 Scenario 5: a query that records an impure attempt
    /// fails with the matching diagnostic code in debug mode.
    #[test]
    fn scenario_5_purity_violation_in_debug_mode() {
        let mut snap = Snapshot::open(StringInterner::new());
        let s = snap.interner_mut().unwrap().intern(b"f").unwrap();
        let tok = snap.add_token(TokenKind::Identifier, s, dummy_span()).unwrap();
        snap.add_node(NodeKind::Identifier, tok, tok, &[]).unwrap();

        let opts = CidOpts::default();
        let engine = QueryEngine::new(snap, &opts, PurityMode::Debug).unwrap();

        let cx = QueryCx::new(engine.snapshot(), PurityMode::Debug);
        let err = cx.record_impure_attempt(ImpureKind::FileSystem).unwrap_err();
        assert_eq!(err, astdb_error::AstDbError::ImpureFileSystem);
    }

    /// In production mode the same attempt is recorded as a diagnostic
    /// but does not fail the call.
    #[test]
    fn purity_violation_in_production_mode_is_recorded_not_fatal() {
        let snap = Snapshot::open(StringInterner::new());
        let opts = CidOpts::default();
        let engine = QueryEngine::new(snap, &opts, PurityMode::Production).unwrap();
        let cx = QueryCx::new(engine.snapshot(), PurityMode::Production);
        assert!(cx.record_impure_attempt(ImpureKind::Network).is_ok());
    }

    #[test]
    fn query_engine_construction_freezes_the_snapshot() {
        let mut snap = Snapshot::open(StringInterner::new());
        let s = snap.interner_mut().unwrap().intern(b"x").unwrap();
        let tok = snap.add_token(TokenKind::Identifier, s, dummy_span()).unwrap();
        let node = snap.add_node(NodeKind::Identifier, tok, tok, &[]).unwrap();
        let scope = snap.add_scope(ScopeId::INVALID).unwrap();
        snap.add_decl(node, s, scope, DeclKind::Variable).unwrap();

        let opts = CidOpts::default();
        let engine = QueryEngine::new(snap, &opts, PurityMode::Debug).unwrap();
        assert!(engine.snapshot().is_frozen());
    }
}
