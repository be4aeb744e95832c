//! The columnar snapshot store (spec.md §3.3, §4.2, §6).

use astdb_error::{AstDbError, Result};
use astdb_types::{
    Cid, CidOpts, DeclId, DeclKind, DiagId, EffectMask, NodeId, NodeKind, ProfileMask, RefId,
    ScopeId, Severity, Span, StrId, TokenId, TokenKind, TypeId,
};
use hashbrown::HashMap;
use tracing::trace;

use crate::interner::StringInterner;
use crate::rows::{DeclRow, DiagRow, EdgeRow, NodeRow, RefRow, ScopeRow, TokenRow};
use crate::table::Table;

/// A function declaration's summary masks (spec.md §4.3 "Function
/// declaration" normalization rule: "parameter count, return-type
/// presence flag, effect mask, profile mask"). Stored out-of-line from
/// `NodeRow` since only `FuncDecl` nodes carry them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FuncMasks {
    pub effect_mask: EffectMask,
    pub profile_mask: ProfileMask,
}

/// A frozen-once-built, arena-bound, append-only columnar store (spec.md
/// §3.3). `Snapshot` exclusively owns its string interner and every row
/// table; dropping it releases everything in one shot.
#[derive(Debug)]
pub struct Snapshot {
    interner: StringInterner,
    tokens: Table<TokenRow>,
    nodes: Table<NodeRow>,
    edges: Table<EdgeRow>,
    scopes: Table<ScopeRow>,
    decls: Table<DeclRow>,
    refs: Table<RefRow>,
    diags: Table<DiagRow>,
    cid_cache: HashMap<NodeId, Cid>,
    cid_cache_opts: Option<CidOpts>,
    node_scope: HashMap<NodeId, ScopeId>,
    func_masks: HashMap<NodeId, FuncMasks>,
    frozen: bool,
}

impl Snapshot {
    /// `open_snapshot(interner)` (spec.md §6). The caller supplies the
    /// interner so a host may share one across several snapshots, or pass
    /// a fresh one for a snapshot-scoped interner (spec.md §3.3).
    #[must_use]
    pub fn open(interner: StringInterner) -> Self {
        Self {
            interner,
            tokens: Table::new("tokens"),
            nodes: Table::new("nodes"),
            edges: Table::new("edges"),
            scopes: Table::new("scopes"),
            decls: Table::new("decls"),
            refs: Table::new("refs"),
            diags: Table::new("diags"),
            cid_cache: HashMap::new(),
            cid_cache_opts: None,
            node_scope: HashMap::new(),
            func_masks: HashMap::new(),
            frozen: false,
        }
    }

    fn check_mutable(&self) -> Result<()> {
        if self.frozen {
            return Err(AstDbError::SnapshotFrozen);
        }
        Ok(())
    }

    /// Freeze the snapshot: no further `add_*` calls will succeed. Queries
    /// may read concurrently once frozen (spec.md §5). Idempotent.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    #[must_use]
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn interner_mut(&mut self) -> Result<&mut StringInterner> {
        self.check_mutable()?;
        Ok(&mut self.interner)
    }

    // -- construction -----------------------------------------------------

    /// `add_token(kind, str_id, span) -> TokenId`.
    pub fn add_token(
        &mut self,
        kind: TokenKind,
        str_id: StrId,
        span: Span,
    ) -> Result<TokenId> {
        self.add_token_with_trivia(kind, str_id, span, None)
    }

    pub fn add_token_with_trivia(
        &mut self,
        kind: TokenKind,
        str_id: StrId,
        span: Span,
        trivia: Option<Span>,
    ) -> Result<TokenId> {
        self.check_mutable()?;
        let row = TokenRow {
            kind,
            str_id,
            span,
            trivia,
        };
        let raw = self.tokens.append(row)?;
        trace!(token_id = raw, ?kind, "add_token");
        Ok(TokenId::from_raw(raw))
    }

    /// `add_node(kind, first_token, last_token, children) -> NodeId`.
    ///
    /// Children are appended to the flat edge table; the node's
    /// `child_start`/`child_count` address the resulting contiguous slice
    /// (spec.md §3.2 `Node`/`Edge`, §4.2).
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        first_token: TokenId,
        last_token: TokenId,
        children: &[NodeId],
    ) -> Result<NodeId> {
        self.add_node_ext(kind, first_token, last_token, children, false)
    }

    /// Extended form populating `has_type_annotation` (SPEC_FULL.md §2
    /// item 2), used by parsers/binders building `let_stmt`/`var_stmt`
    /// nodes.
    pub fn add_node_ext(
        &mut self,
        kind: NodeKind,
        first_token: TokenId,
        last_token: TokenId,
        children: &[NodeId],
        has_type_annotation: bool,
    ) -> Result<NodeId> {
        self.check_mutable()?;
        if first_token.is_valid() && last_token.is_valid() && first_token.to_raw() > last_token.to_raw() {
            return Err(AstDbError::InvalidToken(first_token));
        }
        let child_start = self.edges.len();
        for &child in children {
            self.edges.append(EdgeRow(child))?;
        }
        let child_count = u32::try_from(children.len()).unwrap_or(u32::MAX);
        let row = NodeRow {
            kind,
            first_token,
            last_token,
            child_start,
            child_count,
            has_type_annotation,
        };
        let raw = self.nodes.append(row)?;
        trace!(node_id = raw, ?kind, child_count, "add_node");
        Ok(NodeId::from_raw(raw))
    }

    /// `add_scope(parent) -> ScopeId`. Declarations are attached
    /// afterwards via `add_decl`, which extends the scope's
    /// `first_decl..first_decl+decl_count` run; scopes must therefore be
    /// fully populated with their declarations before a sibling scope is
    /// opened, matching how a binder walks the tree depth-first.
    ///
    /// "a scope's parent has a lower ID than the scope itself" (spec.md
    /// §4.2) holds by construction: `ScopeId`s are only ever handed out by
    /// this method in append order, so any `parent` a caller passes in was
    /// necessarily returned by an earlier call.
    pub fn add_scope(&mut self, parent: ScopeId) -> Result<ScopeId> {
        self.check_mutable()?;
        let first_decl = self.decls.len();
        let row = ScopeRow {
            parent,
            first_decl,
            decl_count: 0,
        };
        let raw = self.scopes.append(row)?;
        trace!(scope_id = raw, ?parent, "add_scope");
        Ok(ScopeId::from_raw(raw))
    }

    /// `add_decl(node, name, scope, kind) -> DeclId`.
    ///
    /// Appends to the declaration table and extends `scope`'s contiguous
    /// decl run. Must be called for `scope`'s declarations before any
    /// other scope's declarations are added (see `add_scope`), or the
    /// `first_decl..first_decl+decl_count` contiguity invariant (spec.md
    /// §3.2 `Scope`) would not hold.
    pub fn add_decl(
        &mut self,
        node: NodeId,
        name: StrId,
        scope: ScopeId,
        kind: DeclKind,
    ) -> Result<DeclId> {
        self.check_mutable()?;
        let row = DeclRow {
            node,
            name,
            scope,
            kind,
            type_id: TypeId::INVALID,
        };
        let raw = self.decls.append(row)?;
        if let Some(scope_row) = self.scopes.get_mut(scope.to_raw()) {
            scope_row.decl_count += 1;
        }
        trace!(decl_id = raw, ?node, ?scope, "add_decl");
        Ok(DeclId::from_raw(raw))
    }

    /// Assign a resolved type to an existing declaration (populated by a
    /// type checker consuming this store; not part of the minimal §6
    /// construction surface but needed for `TypeOf` to have anything to
    /// answer with).
    pub fn set_decl_type(&mut self, decl: DeclId, type_id: TypeId) -> Result<()> {
        self.check_mutable()?;
        let row = self
            .decls
            .get_mut(decl.to_raw())
            .ok_or(AstDbError::InvalidDeclId(decl))?;
        row.type_id = type_id;
        Ok(())
    }

    /// `add_ref(at_node, name, target_decl) -> RefId`.
    pub fn add_ref(
        &mut self,
        at_node: NodeId,
        name: StrId,
        target_decl: DeclId,
    ) -> Result<RefId> {
        self.check_mutable()?;
        let row = RefRow {
            at_node,
            name,
            target_decl,
        };
        let raw = self.refs.append(row)?;
        trace!(ref_id = raw, ?at_node, ?target_decl, "add_ref");
        Ok(RefId::from_raw(raw))
    }

    /// `add_diag(code, severity, span, message) -> DiagId`.
    pub fn add_diag(
        &mut self,
        code: StrId,
        severity: Severity,
        span: Span,
        message: StrId,
    ) -> Result<DiagId> {
        self.check_mutable()?;
        let row = DiagRow {
            code,
            severity,
            span,
            message,
        };
        let raw = self.diags.append(row)?;
        trace!(diag_id = raw, ?severity, "add_diag");
        Ok(DiagId::from_raw(raw))
    }

    /// Record the innermost scope enclosing `node` (node→scope map,
    /// spec.md §4.2).
    pub fn set_node_scope(&mut self, node: NodeId, scope: ScopeId) -> Result<()> {
        self.check_mutable()?;
        self.node_scope.insert(node, scope);
        Ok(())
    }

    #[must_use]
    pub fn node_scope(&self, node: NodeId) -> Option<ScopeId> {
        self.node_scope.get(&node).copied()
    }

    /// Attach effect/profile mask summary fields to a `FuncDecl` node
    /// (spec.md §4.3 "Function declaration" normalization rule).
    pub fn set_func_masks(
        &mut self,
        node: NodeId,
        effect_mask: EffectMask,
        profile_mask: ProfileMask,
    ) -> Result<()> {
        self.check_mutable()?;
        self.func_masks.insert(
            node,
            FuncMasks {
                effect_mask,
                profile_mask,
            },
        );
        Ok(())
    }

    #[must_use]
    pub fn func_masks(&self, node: NodeId) -> FuncMasks {
        self.func_masks.get(&node).copied().unwrap_or_default()
    }

    // -- lookup -------------------------------------------------------------

    #[must_use]
    pub fn get_token(&self, id: TokenId) -> Option<TokenRow> {
        self.tokens.get(id.to_raw()).copied()
    }

    #[must_use]
    pub fn get_node(&self, id: NodeId) -> Option<NodeRow> {
        self.nodes.get(id.to_raw()).copied()
    }

    #[must_use]
    pub fn get_scope(&self, id: ScopeId) -> Option<ScopeRow> {
        self.scopes.get(id.to_raw()).copied()
    }

    #[must_use]
    pub fn get_decl(&self, id: DeclId) -> Option<DeclRow> {
        self.decls.get(id.to_raw()).copied()
    }

    #[must_use]
    pub fn get_ref(&self, id: RefId) -> Option<RefRow> {
        self.refs.get(id.to_raw()).copied()
    }

    #[must_use]
    pub fn get_diag(&self, id: DiagId) -> Option<DiagRow> {
        self.diags.get(id.to_raw()).copied()
    }

    /// The ordered child `NodeId`s of `node`, or an empty `Vec` if `node`
    /// is invalid or has no children (spec.md §4.2 edge table slicing).
    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        let Some(row) = self.get_node(node) else {
            return Vec::new();
        };
        self.edges
            .slice(row.child_start, row.child_count)
            .iter()
            .map(|e| e.0)
            .collect()
    }

    #[must_use]
    pub fn token_text<'a>(&'a self, id: TokenId) -> Option<&'a str> {
        let row = self.get_token(id)?;
        self.interner.get_str(row.str_id)
    }

    // -- CID cache ------------------------------------------------------

    /// Fetch a cached CID for `node`, but only if it was computed under
    /// the same `opts` -- the cache is keyed on `NodeId` alone (spec.md
    /// §3.2), so a change in toolchain knobs (spec.md invariant 7) must
    /// evict the whole cache rather than return a stale entry.
    #[must_use]
    pub fn cached_cid(&self, node: NodeId, opts: &CidOpts) -> Option<Cid> {
        if self.cid_cache_opts.as_ref() != Some(opts) {
            return None;
        }
        self.cid_cache.get(&node).copied()
    }

    pub fn cache_cid(&mut self, node: NodeId, cid: Cid, opts: &CidOpts) {
        if self.cid_cache_opts.as_ref() != Some(opts) {
            self.cid_cache.clear();
            self.cid_cache_opts = Some(opts.clone());
        }
        self.cid_cache.insert(node, cid);
    }

    /// Evict every cached CID. A node CID cache entry "exists iff the CID
    /// was requested at least once and inputs unchanged since" (spec.md
    /// §3.2); since this store has no incremental re-parse, the only
    /// supported invalidation is a full clear after any further mutation.
    pub fn invalidate_cid_cache(&mut self) {
        self.cid_cache.clear();
        self.cid_cache_opts = None;
    }

    #[must_use]
    pub fn token_count(&self) -> u32 {
        self.tokens.len()
    }

    #[must_use]
    pub fn node_count(&self) -> u32 {
        self.nodes.len()
    }

    #[must_use]
    pub fn decl_count(&self) -> u32 {
        self.decls.len()
    }

    #[must_use]
    pub fn scope_count(&self) -> u32 {
        self.scopes.len()
    }

    #[must_use]
    pub fn ref_count(&self) -> u32 {
        self.refs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_span() -> Span {
        Span::new(0, 1, 1, 1, 1, 2)
    }

    #[test]
    fn id_stability_across_lookups() {
        let mut snap = Snapshot::open(StringInterner::new());
        let str_id = snap.interner_mut().unwrap().intern(b"42").unwrap();
        let tok = snap
            .add_token(TokenKind::IntLiteral, str_id, dummy_span())
            .unwrap();
        let node = snap
            .add_node(NodeKind::IntLiteral, tok, tok, &[])
            .unwrap();
        assert_eq!(snap.get_token(tok).unwrap().str_id, str_id);
        assert_eq!(snap.get_node(node).unwrap().kind, NodeKind::IntLiteral);
    }

    #[test]
    fn children_are_ordered() {
        let mut snap = Snapshot::open(StringInterner::new());
        let str_id = snap.interner_mut().unwrap().intern(b"x").unwrap();
        let tok = snap
            .add_token(TokenKind::Identifier, str_id, dummy_span())
            .unwrap();
        let a = snap.add_node(NodeKind::Identifier, tok, tok, &[]).unwrap();
        let b = snap.add_node(NodeKind::Identifier, tok, tok, &[]).unwrap();
        let parent = snap
            .add_node(NodeKind::ArrayLit, tok, tok, &[a, b])
            .unwrap();
        assert_eq!(snap.children(parent), vec![a, b]);
    }

    #[test]
    fn frozen_snapshot_rejects_mutation() {
        let mut snap = Snapshot::open(StringInterner::new());
        snap.freeze();
        assert!(snap.is_frozen());
        let err = snap
            .add_token(TokenKind::Identifier, StrId::INVALID, dummy_span())
            .unwrap_err();
        assert_eq!(err, AstDbError::SnapshotFrozen);
    }

    #[test]
    fn appends_under_the_row_limit_succeed() {
        // ROW_LIMIT is `u32::MAX - 1`; exhausting it isn't practical in a
        // unit test, so this only exercises the non-failing path. See
        // `astdb_store::table::tests` for the sentinel-boundary checks.
        let mut t: Table<u8> = Table::new("tiny");
        for _ in 0..3 {
            t.append(0).unwrap();
        }
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn scope_decl_run_tracks_insertion_order() {
        let mut snap = Snapshot::open(StringInterner::new());
        let str_id = snap.interner_mut().unwrap().intern(b"x").unwrap();
        let tok = snap
            .add_token(TokenKind::Identifier, str_id, dummy_span())
            .unwrap();
        let node = snap.add_node(NodeKind::Identifier, tok, tok, &[]).unwrap();
        let scope = snap.add_scope(ScopeId::INVALID).unwrap();
        let d1 = snap
            .add_decl(node, str_id, scope, DeclKind::Variable)
            .unwrap();
        let d2 = snap
            .add_decl(node, str_id, scope, DeclKind::Variable)
            .unwrap();
        let scope_row = snap.get_scope(scope).unwrap();
        assert_eq!(scope_row.decl_count, 2);
        assert_eq!(d1.to_raw() + 1, d2.to_raw());
    }
}

