//! End-to-end exercise of all seven named queries against a small,
//! hand-built program shape (spec.md §4.6 "Named queries").

use astdb::{
    schema, DeclKind, NodeKind, PurityMode, QueryArg, QueryEngine, QueryId, QueryResult, ScopeId,
    Snapshot, Span, StringInterner, TokenKind,
};
use astdb_harness::default_opts;

fn span() -> Span {
    Span::new(0, 1, 1, 1, 1, 2)
}

/// Builds: `func f(a) { return a; } f(x);` worth of structure, wired by
/// hand the way a binder would: a `FuncDecl` declaring `f` at module
/// scope, a parameter `a` declared in `f`'s own scope, a `CallExpr`
/// calling `f` with one argument, and a `Ref` resolving the call's callee
/// identifier back to `f`'s declaration.
fn sample_program() -> (
    Snapshot,
    astdb::NodeId, // f's name node (decl)
    astdb::NodeId, // call expression node
    astdb::NodeId, // callee identifier node (the reference site)
    astdb::DeclId, // f's declaration
) {
    let mut snap = Snapshot::open(StringInterner::new());
    let f_name = snap.interner_mut().unwrap().intern(b"f").unwrap();
    let a_name = snap.interner_mut().unwrap().intern(b"a").unwrap();
    let tok = snap.add_token(TokenKind::Identifier, f_name, span()).unwrap();

    let module_scope = snap.add_scope(ScopeId::INVALID).unwrap();

    let f_name_node = snap.add_node(NodeKind::Identifier, tok, tok, &[]).unwrap();
    let param_name_node = snap.add_node(NodeKind::Identifier, tok, tok, &[]).unwrap();
    let param_ty_node = snap.add_node(NodeKind::Identifier, tok, tok, &[]).unwrap();
    let param_node = snap
        .add_node(NodeKind::ParamDecl, tok, tok, &[param_name_node, param_ty_node])
        .unwrap();
    let params_list = snap.add_node(NodeKind::BlockStmt, tok, tok, &[param_node]).unwrap();

    let body_ref_node = snap.add_node(NodeKind::Identifier, tok, tok, &[]).unwrap();
    let return_stmt = snap
        .add_node(NodeKind::ReturnStmt, tok, tok, &[body_ref_node])
        .unwrap();
    let body = snap.add_node(NodeKind::BlockStmt, tok, tok, &[return_stmt]).unwrap();

    let func_decl = snap
        .add_node(NodeKind::FuncDecl, tok, tok, &[f_name_node, params_list, body])
        .unwrap();
    let f_decl = snap
        .add_decl(func_decl, f_name, module_scope, DeclKind::Function)
        .unwrap();

    let func_scope = snap.add_scope(module_scope).unwrap();
    let a_decl = snap
        .add_decl(param_node, a_name, func_scope, DeclKind::Parameter)
        .unwrap();
    snap.set_node_scope(body_ref_node, func_scope).unwrap();
    snap.add_ref(body_ref_node, a_name, a_decl).unwrap();

    snap.set_func_masks(func_decl, astdb::EffectMask::empty(), astdb::ProfileMask::empty())
        .unwrap();

    let callee_node = snap.add_node(NodeKind::Identifier, tok, tok, &[]).unwrap();
    let call_arg = snap.add_node(NodeKind::Identifier, tok, tok, &[]).unwrap();
    let call_node = snap
        .add_node(NodeKind::CallExpr, tok, tok, &[callee_node, call_arg])
        .unwrap();
    snap.set_node_scope(callee_node, module_scope).unwrap();
    snap.add_ref(callee_node, f_name, f_decl).unwrap();

    let _ = call_node;
    snap.freeze();
    (snap, f_name_node, call_node, callee_node, f_decl)
}

#[test]
fn resolve_name_finds_the_function_declaration_from_module_scope() {
    let (snap, _f_name_node, _call_node, callee_node, f_decl) = sample_program();
    let opts = default_opts();
    let engine = QueryEngine::new(snap, &opts, PurityMode::Debug).unwrap();

    let callee_cid = engine.cid_index().cid_of_node(callee_node).unwrap();
    let result = engine
        .execute(QueryId::ResolveName, &[QueryArg::str("f"), QueryArg::cid(callee_cid)])
        .unwrap();
    match result {
        QueryResult::ResolveName(Some(info)) => assert_eq!(info.decl, f_decl),
        other => panic!("expected a resolved symbol, got {other:?}"),
    }
}

#[test]
fn dispatch_resolves_the_call_sites_callee() {
    let (snap, _f_name_node, call_node, callee_node, f_decl) = sample_program();
    let opts = default_opts();
    let engine = QueryEngine::new(snap, &opts, PurityMode::Debug).unwrap();

    let call_cid = engine.cid_index().cid_of_node(call_node).unwrap();
    let result = engine
        .execute(QueryId::Dispatch, &[QueryArg::cid(call_cid)])
        .unwrap();
    match result {
        QueryResult::Dispatch(Some(info)) => {
            assert_eq!(info.callee, callee_node);
            assert!(info.resolved);
            assert_eq!(info.resolved_decl, f_decl);
        }
        other => panic!("expected a resolved dispatch, got {other:?}"),
    }
}

#[test]
fn definition_follows_the_callee_reference_to_its_declaration() {
    let (snap, _f_name_node, _call_node, callee_node, f_decl) = sample_program();
    let opts = default_opts();
    let engine = QueryEngine::new(snap, &opts, PurityMode::Debug).unwrap();

    let callee_cid = engine.cid_index().cid_of_node(callee_node).unwrap();
    let result = engine
        .execute(QueryId::Definition, &[QueryArg::cid(callee_cid)])
        .unwrap();
    match result {
        QueryResult::Definition(Some(info)) => {
            assert_eq!(info.decl, f_decl);
            assert_eq!(engine.snapshot().get_decl(info.decl).unwrap().node, info.node);
        }
        other => panic!("expected a resolved definition, got {other:?}"),
    }
}

#[test]
fn references_finds_every_ref_targeting_the_declaration() {
    let (snap, _f_name_node, _call_node, callee_node, f_decl) = sample_program();
    let opts = default_opts();
    let engine = QueryEngine::new(snap, &opts, PurityMode::Debug).unwrap();

    let decl_cid = engine.cid_index().cid_of_decl(f_decl).unwrap();
    let result = engine
        .execute(QueryId::References, &[QueryArg::cid(decl_cid)])
        .unwrap();
    let callee_cid = engine.cid_index().cid_of_node(callee_node).unwrap();
    match result {
        QueryResult::References(refs) => assert!(refs.contains(&callee_cid)),
        other => panic!("expected a list of references, got {other:?}"),
    }
}

#[test]
fn effects_reads_back_the_functions_recorded_mask() {
    let (snap, _f_name_node, _call_node, _callee_node, _f_decl) = sample_program();
    let opts = default_opts();
    let engine = QueryEngine::new(snap, &opts, PurityMode::Debug).unwrap();

    let func_decl_node = (0..engine.snapshot().node_count())
        .map(astdb::NodeId::from_raw)
        .find(|&n| engine.snapshot().get_node(n).unwrap().kind == NodeKind::FuncDecl)
        .unwrap();
    let node_cid = engine.cid_index().cid_of_node(func_decl_node).unwrap();
    let result = engine.execute(QueryId::Effects, &[QueryArg::cid(node_cid)]).unwrap();
    match result {
        QueryResult::Effects(Some(info)) => assert!(info.effect_mask.is_empty()),
        other => panic!("expected effects info, got {other:?}"),
    }
}

#[test]
fn hover_reads_the_first_tokens_text() {
    let (snap, f_name_node, _call_node, _callee_node, _f_decl) = sample_program();
    let opts = default_opts();
    let engine = QueryEngine::new(snap, &opts, PurityMode::Debug).unwrap();

    let cid = engine.cid_index().cid_of_node(f_name_node).unwrap();
    let result = engine.execute(QueryId::Hover, &[QueryArg::cid(cid)]).unwrap();
    match result {
        QueryResult::Hover(Some(info)) => assert_eq!(info.text, "f"),
        other => panic!("expected hover info, got {other:?}"),
    }
}

#[test]
fn accessor_schema_agrees_with_the_hand_built_call_shape() {
    let (snap, _f_name_node, call_node, callee_node, _f_decl) = sample_program();
    assert_eq!(schema::call_expr::callee(&snap, call_node), Some(callee_node));
    assert_eq!(schema::call_expr::arguments(&snap, call_node).len(), 1);
}
