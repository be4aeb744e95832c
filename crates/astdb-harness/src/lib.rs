//! Shared deterministic fixtures for the compliance test suite under
//! `tests/` (spec.md §8 "Testable properties" and "End-to-end
//! scenarios"). Not part of the public API surface -- this crate is
//! `publish = false`.

use astdb::{
    CidOpts, DeclKind, NodeKind, ScopeId, Snapshot, Span, StringInterner, TokenKind,
};

/// A fixed span used throughout the fixtures; its exact coordinates are
/// never semantically meaningful -- only whitespace-invariance tests vary
/// spans deliberately.
#[must_use]
pub fn fixed_span() -> Span {
    Span::new(0, 2, 1, 1, 1, 3)
}

/// Build the Scenario 1 snapshot: a single `int_literal "42"` node
/// (spec.md §8 Scenario 1). Returns the snapshot and the node id.
#[must_use]
pub fn int_literal_snapshot(text: &[u8], span: Span) -> (Snapshot, astdb::NodeId) {
    let mut snap = Snapshot::open(StringInterner::new());
    let str_id = snap.interner_mut().unwrap().intern(text).unwrap();
    let tok = snap
        .add_token(TokenKind::IntLiteral, str_id, span)
        .unwrap();
    let node = snap.add_node(NodeKind::IntLiteral, tok, tok, &[]).unwrap();
    snap.freeze();
    (snap, node)
}

/// Build a snapshot with one function-scoped variable `x`, a reference
/// to it from a second node, and the scope/ref wiring a binder would
/// produce. Returns `(snapshot, decl_node, use_node)`.
#[must_use]
pub fn resolved_reference_snapshot() -> (Snapshot, astdb::NodeId, astdb::NodeId) {
    let mut snap = Snapshot::open(StringInterner::new());
    let name = snap.interner_mut().unwrap().intern(b"x").unwrap();
    let span = fixed_span();
    let tok = snap.add_token(TokenKind::Identifier, name, span).unwrap();

    let decl_node = snap.add_node(NodeKind::Identifier, tok, tok, &[]).unwrap();
    let scope = snap.add_scope(ScopeId::INVALID).unwrap();
    let decl = snap
        .add_decl(decl_node, name, scope, DeclKind::Variable)
        .unwrap();

    let use_node = snap.add_node(NodeKind::Identifier, tok, tok, &[]).unwrap();
    snap.set_node_scope(use_node, scope).unwrap();
    snap.add_ref(use_node, name, decl).unwrap();

    snap.freeze();
    (snap, decl_node, use_node)
}

/// The default CID options used across the suite unless a test is
/// specifically exercising knob separation (spec.md §8 Scenario 3).
#[must_use]
pub fn default_opts() -> CidOpts {
    CidOpts::default()
}
