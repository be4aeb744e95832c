//! Canonical byte serializer (spec.md §4.3): deterministic encoding of
//! any subject (node, decl, module) independent of source positions,
//! whitespace, comments, or interner/ID incidentals.

mod frames;
mod leb128;
mod payload;

pub use frames::{serialize_decl, serialize_module, serialize_node, write_string_frame};
pub use leb128::{write_sleb128, write_uleb128};
pub use payload::node_payload;

#[cfg(test)]
mod tests {
    use astdb_store::{Snapshot, StringInterner};
    use astdb_types::{Cid, NodeKind, Span, TokenKind};

    use super::*;

    fn dummy_span() -> Span {
        Span::new(0, 1, 1, 1, 1, 2)
    }

    #[test]
    fn int_literal_payload_is_position_independent() {
        let mut snap = Snapshot::open(StringInterner::new());
        let s1 = snap.interner_mut().unwrap().intern(b"42").unwrap();
        let t1 = snap
            .add_token(TokenKind::IntLiteral, s1, dummy_span())
            .unwrap();
        let n1 = snap.add_node(NodeKind::IntLiteral, t1, t1, &[]).unwrap();

        let mut snap2 = Snapshot::open(StringInterner::new());
        let s2 = snap2.interner_mut().unwrap().intern(b"42").unwrap();
        let t2 = snap2
            .add_token(
                TokenKind::IntLiteral,
                s2,
                Span::new(100, 102, 5, 3, 5, 5),
            )
            .unwrap();
        let n2 = snap2.add_node(NodeKind::IntLiteral, t2, t2, &[]).unwrap();

        let bytes1 = serialize_node(&snap, n1, &[]).unwrap();
        let bytes2 = serialize_node(&snap2, n2, &[]).unwrap();
        assert_eq!(bytes1, bytes2);
    }

    #[test]
    fn child_order_changes_bytes() {
        let mut snap = Snapshot::open(StringInterner::new());
        let s = snap.interner_mut().unwrap().intern(b"x").unwrap();
        let tok = snap
            .add_token(TokenKind::Identifier, s, dummy_span())
            .unwrap();
        let a = snap.add_node(NodeKind::Identifier, tok, tok, &[]).unwrap();
        let b = snap.add_node(NodeKind::Identifier, tok, tok, &[]).unwrap();
        let parent = snap
            .add_node(NodeKind::ArrayLit, tok, tok, &[a, b])
            .unwrap();

        let cid_a = Cid::from_bytes([1; 32]);
        let cid_b = Cid::from_bytes([2; 32]);
        let forward = serialize_node(&snap, parent, &[cid_a, cid_b]).unwrap();
        let swapped = serialize_node(&snap, parent, &[cid_b, cid_a]).unwrap();
        assert_ne!(forward, swapped);
    }

    #[test]
    fn nan_normalizes_to_single_bit_pattern() {
        let mut snap = Snapshot::open(StringInterner::new());
        let s1 = snap.interner_mut().unwrap().intern(b"NaN").unwrap();
        let t1 = snap
            .add_token(TokenKind::FloatLiteral, s1, dummy_span())
            .unwrap();
        let n1 = snap.add_node(NodeKind::FloatLiteral, t1, t1, &[]).unwrap();

        let mut snap2 = Snapshot::open(StringInterner::new());
        let s2 = snap2.interner_mut().unwrap().intern(b"nan").unwrap();
        let t2 = snap2
            .add_token(TokenKind::FloatLiteral, s2, dummy_span())
            .unwrap();
        let n2 = snap2.add_node(NodeKind::FloatLiteral, t2, t2, &[]).unwrap();

        let bytes1 = serialize_node(&snap, n1, &[]).unwrap();
        let bytes2 = serialize_node(&snap2, n2, &[]).unwrap();
        assert_eq!(bytes1, bytes2);
    }

    #[test]
    fn negative_zero_normalizes_to_positive_zero() {
        let mut snap = Snapshot::open(StringInterner::new());
        let s1 = snap.interner_mut().unwrap().intern(b"-0.0").unwrap();
        let t1 = snap
            .add_token(TokenKind::FloatLiteral, s1, dummy_span())
            .unwrap();
        let n1 = snap.add_node(NodeKind::FloatLiteral, t1, t1, &[]).unwrap();

        let mut snap2 = Snapshot::open(StringInterner::new());
        let s2 = snap2.interner_mut().unwrap().intern(b"0.0").unwrap();
        let t2 = snap2
            .add_token(TokenKind::FloatLiteral, s2, dummy_span())
            .unwrap();
        let n2 = snap2.add_node(NodeKind::FloatLiteral, t2, t2, &[]).unwrap();

        let bytes1 = serialize_node(&snap, n1, &[]).unwrap();
        let bytes2 = serialize_node(&snap2, n2, &[]).unwrap();
        assert_eq!(bytes1, bytes2);
    }
}
