//! Row types for each columnar table (spec.md §3.2).

use astdb_types::{DeclId, NodeId, ScopeId, Severity, Span, StrId, TokenId, TypeId};

/// A lexical token (spec.md §3.2 `Token`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenRow {
    pub kind: astdb_types::TokenKind,
    pub str_id: StrId,
    pub span: Span,
    pub trivia: Option<Span>,
}

/// An AST node (spec.md §3.2 `Node`).
///
/// `has_type_annotation` is the SPEC_FULL.md §2 item 2 resolution to the
/// `let_stmt`/`var_stmt` two-child ambiguity; it is meaningless (and left
/// `false`) for every node kind other than `LetStmt`/`VarStmt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRow {
    pub kind: astdb_types::NodeKind,
    pub first_token: TokenId,
    pub last_token: TokenId,
    pub child_start: u32,
    pub child_count: u32,
    pub has_type_annotation: bool,
}

/// A child reference stored in the flat edge table (spec.md §3.2 `Edge`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRow(pub NodeId);

/// A lexical scope (spec.md §3.2 `Scope`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeRow {
    pub parent: ScopeId,
    pub first_decl: u32,
    pub decl_count: u32,
}

/// A declaration (spec.md §3.2 `Decl`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclRow {
    pub node: NodeId,
    pub name: StrId,
    pub scope: ScopeId,
    pub kind: astdb_types::DeclKind,
    pub type_id: TypeId,
}

/// A name-use linking a reference site to its definition (spec.md §3.2
/// `Ref`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefRow {
    pub at_node: NodeId,
    pub name: StrId,
    pub target_decl: DeclId,
}

/// A diagnostic attached to a unit (spec.md §3.2 `Diagnostic`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagRow {
    pub code: StrId,
    pub severity: Severity,
    pub span: Span,
    pub message: StrId,
}
