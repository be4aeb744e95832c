//! Tagged frame encoding (spec.md §4.3).

use astdb_error::{AstDbError, Result};
use astdb_store::Snapshot;
use astdb_types::{Cid, DeclId, NodeId};

use crate::leb128::write_uleb128;
use crate::payload::node_payload;

const TAG_NODE: u8 = b'N';
const TAG_DECL: u8 = b'D';
const TAG_MODULE: u8 = b'M';
const TAG_STRING: u8 = b'S';

/// `'S' | uleb128(len) | bytes` (spec.md §4.3).
pub fn write_string_frame(out: &mut Vec<u8>, bytes: &[u8]) {
    out.push(TAG_STRING);
    write_uleb128(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}

/// `'N' | uleb128(kind) | uleb128(child_count) | <payload> |
/// cid(child_0) || cid(child_1) || …` (spec.md §4.3).
///
/// `child_cids` must be the already-computed CIDs of `node`'s children,
/// in order; the caller (`astdb-cid`) is responsible for that recursion
/// since only it can consult/update the CID cache.
pub fn serialize_node(snapshot: &Snapshot, node: NodeId, child_cids: &[Cid]) -> Result<Vec<u8>> {
    let row = snapshot.get_node(node).ok_or(AstDbError::InvalidNodeId(node))?;
    let mut out = Vec::new();
    out.push(TAG_NODE);
    write_uleb128(&mut out, u64::from(row.kind.as_u32()));
    write_uleb128(&mut out, u64::from(row.child_count));
    out.extend(node_payload(snapshot, node)?);
    for cid in child_cids {
        out.extend_from_slice(cid.as_bytes());
    }
    Ok(out)
}

/// `'D' | uleb128(kind) | string(name) | uleb128(type_id) | cid(node)`
/// (spec.md §4.3).
pub fn serialize_decl(snapshot: &Snapshot, decl: DeclId, node_cid: Cid) -> Result<Vec<u8>> {
    let row = snapshot.get_decl(decl).ok_or(AstDbError::InvalidDeclId(decl))?;
    let name = snapshot
        .interner()
        .get(row.name)
        .ok_or(AstDbError::InvalidDeclId(decl))?;
    let mut out = Vec::new();
    out.push(TAG_DECL);
    write_uleb128(&mut out, u64::from(row.kind.as_u32()));
    write_string_frame(&mut out, name);
    write_uleb128(&mut out, u64::from(row.type_id.to_raw()));
    out.extend_from_slice(node_cid.as_bytes());
    Ok(out)
}

/// `'M' | uleb128(item_count) | cid(item_0) || …` (spec.md §4.3).
///
/// `item_cids` must already be ordered per SPEC_FULL.md §2 item 3 (module
/// top-level items in `DeclId` insertion order).
#[must_use]
pub fn serialize_module(item_cids: &[Cid]) -> Vec<u8> {
    let mut out = Vec::new();
    out.push(TAG_MODULE);
    write_uleb128(&mut out, item_cids.len() as u64);
    for cid in item_cids {
        out.extend_from_slice(cid.as_bytes());
    }
    out
}
