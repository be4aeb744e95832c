//! Result payloads for the named query surface (spec.md §4.6).

use astdb_types::{Cid, DeclId, DeclKind, EffectMask, NodeId, ScopeId, TypeId};

/// `ResolveName` result: the declaration a name resolves to at a given
/// scope, innermost-scope-wins (spec.md §3.2 `Decl` invariants).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    pub decl: DeclId,
    pub name: String,
    pub kind: DeclKind,
    pub scope: ScopeId,
}

/// `TypeOf` result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    pub type_id: TypeId,
}

/// `Effects` result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectsInfo {
    pub effect_mask: EffectMask,
}

/// `Dispatch` result: which callee a call site resolves to, and whether
/// resolution succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchInfo {
    pub callee: NodeId,
    pub resolved: bool,
    pub resolved_decl: DeclId,
}

/// `Hover` result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverInfo {
    pub text: String,
    pub cid: Cid,
}

/// `Definition` result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefinitionInfo {
    pub decl: DeclId,
    pub node: NodeId,
}

/// The tagged union of every named query's result (spec.md §4.6 "Result
/// variants match §4.6"). Queries whose reference subject may legitimately
/// be absent (an unresolved name, a call site with no matching
/// declaration, ...) wrap their payload in `Option` rather than failing --
/// spec.md §7: "query-specific result-absent conditions are returned as
/// optional results, not errors".
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    ResolveName(Option<SymbolInfo>),
    TypeOf(Option<TypeInfo>),
    Effects(Option<EffectsInfo>),
    Dispatch(Option<DispatchInfo>),
    Hover(Option<HoverInfo>),
    Definition(Option<DefinitionInfo>),
    References(Vec<Cid>),
}
