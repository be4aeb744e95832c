//! Spec.md §8 invariant 3: "For every argument list `A`,
//! `decode(encode(A)) = A` bytewise."

use astdb::{Cid, QueryArg};
use astdb_query::{decode_args, encode_args};
use proptest::prelude::*;

#[test]
fn round_trips_a_mixed_argument_list() {
    let args = vec![
        QueryArg::cid(Cid::from_bytes([1; 32])),
        QueryArg::Int(-17),
        QueryArg::str("resolve_me"),
        QueryArg::List(vec![QueryArg::Int(1), QueryArg::Int(2), QueryArg::Int(3)]),
    ];
    let bytes = encode_args(&args);
    assert_eq!(decode_args(&bytes).unwrap(), args);
}

#[test]
fn round_trips_an_empty_argument_list() {
    let args: Vec<QueryArg> = vec![];
    let bytes = encode_args(&args);
    assert_eq!(decode_args(&bytes).unwrap(), args);
}

fn arb_query_arg() -> impl Strategy<Value = QueryArg> {
    let leaf = prop_oneof![
        any::<[u8; 32]>().prop_map(|b| QueryArg::cid(Cid::from_bytes(b))),
        any::<i64>().prop_map(QueryArg::Int),
        ".*".prop_map(QueryArg::str),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(QueryArg::List)
    })
}

proptest! {
    #[test]
    fn encode_decode_is_identity_over_arbitrary_args(
        args in prop::collection::vec(arb_query_arg(), 0..8)
    ) {
        let bytes = encode_args(&args);
        prop_assert_eq!(decode_args(&bytes).unwrap(), args);
    }
}
