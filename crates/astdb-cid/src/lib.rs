//! BLAKE3-256 content-identifier computation over canonical byte streams,
//! domain-separated by toolchain knobs (spec.md §4.4).

mod compute;
mod knob;

pub use compute::{compute_cid, validate};
pub use knob::{knob_block, target_triple_block};

#[cfg(test)]
mod tests {
    use astdb_store::{Snapshot, StringInterner};
    use astdb_types::{CidOpts, CidSubject, NodeKind, Span, TokenKind};

    use super::*;

    fn dummy_span() -> Span {
        Span::new(0, 2, 1, 1, 1, 3)
    }

    fn snapshot_with_int_literal(text: &[u8], span: Span) -> (Snapshot, astdb_types::NodeId) {
        let mut snap = Snapshot::open(StringInterner::new());
        let str_id = snap.interner_mut().unwrap().intern(text).unwrap();
        let tok = snap
            .add_token(TokenKind::IntLiteral, str_id, span)
            .unwrap();
        let node = snap.add_node(NodeKind::IntLiteral, tok, tok, &[]).unwrap();
        (snap, node)
    }

    // Scenario 1 -- integer literal canonical round-trip.
    #[test]
    fn scenario_1_int_literal_round_trip() {
        let (mut snap, node) = snapshot_with_int_literal(b"42", dummy_span());
        let opts = CidOpts::default();
        let cid = compute_cid(&mut snap, CidSubject::Node(node), &opts).unwrap();
        assert_eq!(cid.as_bytes().len(), 32);

        let cid_again = compute_cid(&mut snap, CidSubject::Node(node), &opts).unwrap();
        assert_eq!(cid, cid_again);

        assert!(validate(&mut snap, CidSubject::Node(node), cid, &opts).unwrap());
        assert!(!validate(
            &mut snap,
            CidSubject::Node(node),
            astdb_types::Cid::from_bytes([0; 32]),
            &opts
        )
        .unwrap());
    }

    // Scenario 2 -- whitespace invariance.
    #[test]
    fn scenario_2_whitespace_invariance() {
        let (mut snap_a, node_a) =
            snapshot_with_int_literal(b"123", Span::new(0, 3, 1, 1, 1, 4));
        let (mut snap_b, node_b) =
            snapshot_with_int_literal(b"123", Span::new(10, 13, 2, 5, 2, 8));
        let opts = CidOpts::default();
        let cid_a = compute_cid(&mut snap_a, CidSubject::Node(node_a), &opts).unwrap();
        let cid_b = compute_cid(&mut snap_b, CidSubject::Node(node_b), &opts).unwrap();
        assert_eq!(cid_a, cid_b);
    }

    // Scenario 3 -- knob separation.
    #[test]
    fn scenario_3_knob_separation() {
        let (mut snap, node) = snapshot_with_int_literal(b"7", dummy_span());
        let mut opts_v1 = CidOpts::default();
        opts_v1.toolchain_version = 1;
        let mut opts_v2 = CidOpts::default();
        opts_v2.toolchain_version = 2;
        let cid_v1 = compute_cid(&mut snap, CidSubject::Node(node), &opts_v1).unwrap();
        let cid_v2 = compute_cid(&mut snap, CidSubject::Node(node), &opts_v2).unwrap();
        assert_ne!(cid_v1, cid_v2);
    }

    #[test]
    fn memoized_cid_hits_cache_without_recomputation_drift() {
        let mut snap = Snapshot::open(StringInterner::new());
        let str_id = snap.interner_mut().unwrap().intern(b"a").unwrap();
        let tok = snap
            .add_token(TokenKind::Identifier, str_id, dummy_span())
            .unwrap();
        let leaf = snap.add_node(NodeKind::Identifier, tok, tok, &[]).unwrap();
        let parent = snap
            .add_node(NodeKind::ArrayLit, tok, tok, &[leaf, leaf])
            .unwrap();
        let opts = CidOpts::default();
        let cid1 = compute_cid(&mut snap, CidSubject::Node(parent), &opts).unwrap();
        assert!(snap.cached_cid(leaf, &opts).is_some());
        let cid2 = compute_cid(&mut snap, CidSubject::Node(parent), &opts).unwrap();
        assert_eq!(cid1, cid2);
    }
}
