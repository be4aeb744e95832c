//! CID computation: serialize, hash, domain-separate (spec.md §4.4).

use astdb_error::Result;
use astdb_store::Snapshot;
use astdb_types::{Cid, CidOpts, CidSubject, DeclId, NodeId, CID_LEN};
use tracing::debug;

use crate::knob::{knob_block, target_triple_block};

fn finalize(subject_bytes: &[u8], opts: &CidOpts) -> Cid {
    let mut hasher = blake3::Hasher::new();
    hasher.update(subject_bytes);
    hasher.update(&knob_block(opts));
    hasher.update(&target_triple_block(opts));
    let hash = hasher.finalize();
    let mut bytes = [0u8; CID_LEN];
    bytes.copy_from_slice(hash.as_bytes());
    Cid::from_bytes(bytes)
}

/// Compute (and cache) the CID of a single node, recursively folding its
/// children's CIDs first (spec.md §4.3 "Merkle fold").
fn compute_node_cid(snapshot: &mut Snapshot, node: NodeId, opts: &CidOpts) -> Result<Cid> {
    if let Some(cached) = snapshot.cached_cid(node, opts) {
        return Ok(cached);
    }
    let children = snapshot.children(node);
    let mut child_cids = Vec::with_capacity(children.len());
    for child in children {
        child_cids.push(compute_node_cid(snapshot, child, opts)?);
    }
    let bytes = astdb_canon::serialize_node(snapshot, node, &child_cids)?;
    let cid = finalize(&bytes, opts);
    snapshot.cache_cid(node, cid, opts);
    Ok(cid)
}

fn compute_decl_cid(snapshot: &mut Snapshot, decl: DeclId, opts: &CidOpts) -> Result<Cid> {
    let row = snapshot
        .get_decl(decl)
        .ok_or(astdb_error::AstDbError::InvalidDeclId(decl))?;
    let node_cid = compute_node_cid(snapshot, row.node, opts)?;
    let bytes = astdb_canon::serialize_decl(snapshot, decl, node_cid)?;
    Ok(finalize(&bytes, opts))
}

/// Fold every top-level declaration's CID, in `DeclId` insertion order
/// (SPEC_FULL.md §2 item 3, resolving spec.md §9 Open Question 3).
fn compute_module_cid(snapshot: &mut Snapshot, opts: &CidOpts) -> Result<Cid> {
    let mut item_cids = Vec::with_capacity(snapshot.decl_count() as usize);
    for raw in 0..snapshot.decl_count() {
        let decl = DeclId::from_raw(raw);
        item_cids.push(compute_decl_cid(snapshot, decl, opts)?);
    }
    let bytes = astdb_canon::serialize_module(&item_cids);
    Ok(finalize(&bytes, opts))
}

/// `computeCID(snapshot, subject, opts) -> CID` (spec.md §4.4).
pub fn compute_cid(snapshot: &mut Snapshot, subject: CidSubject, opts: &CidOpts) -> Result<Cid> {
    let cid = match subject {
        CidSubject::Node(node) => compute_node_cid(snapshot, node, opts)?,
        CidSubject::Decl(decl) => compute_decl_cid(snapshot, decl, opts)?,
        CidSubject::Module => compute_module_cid(snapshot, opts)?,
    };
    debug!(%cid, "computed cid");
    Ok(cid)
}

/// `validate(snapshot, subject, expected, opts) -> bool`: recompute and
/// compare byte-for-byte (spec.md §4.4).
pub fn validate(
    snapshot: &mut Snapshot,
    subject: CidSubject,
    expected: Cid,
    opts: &CidOpts,
) -> Result<bool> {
    let actual = compute_cid(snapshot, subject, opts)?;
    Ok(actual == expected)
}
