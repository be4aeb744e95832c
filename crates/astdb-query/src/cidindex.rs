//! Eager CID index: the bridge between the CID-addressed named query
//! surface (spec.md §4.6, every query argument and `References` result is
//! a CID) and the row-addressed snapshot store underneath it.
//!
//! [`QueryEngine::new`](crate::engine::QueryEngine::new) computes and
//! caches every node's and declaration's CID once, up front, then builds
//! the reverse maps here. After that the snapshot's CID cache is fully
//! populated and every subsequent query runs against a read-only
//! snapshot -- no further `&mut Snapshot` calls are needed, which is what
//! lets [`QueryEngine`](crate::engine::QueryEngine) hand out concurrent
//! `&QueryCx` borrows once built (spec.md §5 "multiple readers may query
//! concurrently once a snapshot is frozen").

use hashbrown::HashMap;

use astdb_error::Result;
use astdb_store::Snapshot;
use astdb_types::{Cid, CidOpts, CidSubject, DeclId, NodeId, ScopeId};

/// Resolved forward/reverse CID mappings plus the node/decl/ref cross
/// references the named queries need (spec.md §4.6 "Named queries").
#[derive(Debug)]
pub struct CidIndex {
    node_to_cid: HashMap<NodeId, Cid>,
    cid_to_node: HashMap<Cid, NodeId>,
    decl_to_cid: HashMap<DeclId, Cid>,
    cid_to_decl: HashMap<Cid, DeclId>,
    /// The declaration whose `node` field equals a given node, if any --
    /// answers `TypeOf(node)` without a linear scan of the decl table.
    decl_by_node: HashMap<NodeId, DeclId>,
    /// The target declaration a reference site resolves to -- answers
    /// `Definition`/`Dispatch`.
    ref_by_node: HashMap<NodeId, DeclId>,
    module_cid: Cid,
}

impl CidIndex {
    /// Walk every node and declaration once, computing and caching CIDs,
    /// then build the reverse lookup tables (spec.md §4.4 `computeCID`,
    /// §4.6 dependency resolution).
    ///
    /// # Errors
    /// Propagates any `AstDbError` the underlying CID computation raises
    /// (a dangling node/decl id reachable from the row tables, which
    /// would indicate store corruption).
    pub fn build(snapshot: &mut Snapshot, opts: &CidOpts) -> Result<Self> {
        let mut node_to_cid = HashMap::new();
        let mut cid_to_node = HashMap::new();
        for raw in 0..snapshot.node_count() {
            let node = NodeId::from_raw(raw);
            let cid = astdb_cid::compute_cid(snapshot, CidSubject::Node(node), opts)?;
            node_to_cid.insert(node, cid);
            cid_to_node.insert(cid, node);
        }

        let mut decl_to_cid = HashMap::new();
        let mut cid_to_decl = HashMap::new();
        let mut decl_by_node = HashMap::new();
        for raw in 0..snapshot.decl_count() {
            let decl = DeclId::from_raw(raw);
            let cid = astdb_cid::compute_cid(snapshot, CidSubject::Decl(decl), opts)?;
            decl_to_cid.insert(decl, cid);
            cid_to_decl.insert(cid, decl);
            if let Some(row) = snapshot.get_decl(decl) {
                decl_by_node.insert(row.node, decl);
            }
        }

        let mut ref_by_node = HashMap::new();
        for raw in 0..snapshot.ref_count() {
            let ref_id = astdb_types::RefId::from_raw(raw);
            if let Some(row) = snapshot.get_ref(ref_id) {
                ref_by_node.insert(row.at_node, row.target_decl);
            }
        }

        let module_cid = astdb_cid::compute_cid(snapshot, CidSubject::Module, opts)?;

        Ok(Self {
            node_to_cid,
            cid_to_node,
            decl_to_cid,
            cid_to_decl,
            decl_by_node,
            ref_by_node,
            module_cid,
        })
    }

    #[must_use]
    pub fn node_of_cid(&self, cid: Cid) -> Option<NodeId> {
        self.cid_to_node.get(&cid).copied()
    }

    #[must_use]
    pub fn decl_of_cid(&self, cid: Cid) -> Option<DeclId> {
        self.cid_to_decl.get(&cid).copied()
    }

    #[must_use]
    pub fn cid_of_node(&self, node: NodeId) -> Option<Cid> {
        self.node_to_cid.get(&node).copied()
    }

    #[must_use]
    pub fn cid_of_decl(&self, decl: DeclId) -> Option<Cid> {
        self.decl_to_cid.get(&decl).copied()
    }

    #[must_use]
    pub fn decl_by_node(&self, node: NodeId) -> Option<DeclId> {
        self.decl_by_node.get(&node).copied()
    }

    #[must_use]
    pub fn ref_by_node(&self, node: NodeId) -> Option<DeclId> {
        self.ref_by_node.get(&node).copied()
    }

    #[must_use]
    pub fn module_cid(&self) -> Cid {
        self.module_cid
    }

    /// The scope a `scope: CID` query argument names is the scope
    /// enclosing the node that CID resolves to (spec.md §4.6 `ResolveName`
    /// signature takes a CID, but only nodes and declarations carry CIDs
    /// (spec.md §3.1 `CIDSubject`); a scope is therefore addressed
    /// through the node whose innermost scope it is, per the `node_scope`
    /// map (spec.md §4.2)).
    #[must_use]
    pub fn scope_of_node(&self, snapshot: &Snapshot, node: NodeId) -> Option<ScopeId> {
        snapshot.node_scope(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astdb_store::StringInterner;
    use astdb_types::{DeclKind, NodeKind, Span, TokenKind};

    fn dummy_span() -> Span {
        Span::new(0, 1, 1, 1, 1, 2)
    }

    #[test]
    fn builds_reverse_node_and_decl_maps() {
        let mut snap = Snapshot::open(StringInterner::new());
        let s = snap.interner_mut().unwrap().intern(b"x").unwrap();
        let tok = snap.add_token(TokenKind::Identifier, s, dummy_span()).unwrap();
        let node = snap.add_node(NodeKind::Identifier, tok, tok, &[]).unwrap();
        let scope = snap.add_scope(ScopeId::INVALID).unwrap();
        let decl = snap.add_decl(node, s, scope, DeclKind::Variable).unwrap();
        snap.freeze();

        let opts = CidOpts::default();
        let index = CidIndex::build(&mut snap, &opts).unwrap();
        let node_cid = index.cid_of_node(node).unwrap();
        assert_eq!(index.node_of_cid(node_cid), Some(node));
        assert_eq!(index.decl_by_node(node), Some(decl));
    }
}
