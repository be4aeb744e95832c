//! The seven named queries (spec.md §4.6 "Named queries").
//!
//! Every query takes CID-addressed subjects rather than raw row IDs, so a
//! query body first resolves its CID arguments through the engine's
//! CID index before reading the snapshot through [`QueryCx`]. A query
//! whose subject does not resolve, or whose lookup legitimately has no
//! answer (an unbound name, an unresolved call site), returns `Ok(None)`
//! rather than an error (spec.md §7).

use astdb_error::{AstDbError, Result};
use astdb_types::{Cid, DeclId, NodeId};

use crate::args::QueryArg;
use crate::cidindex::CidIndex;
use crate::purity::QueryCx;
use crate::results::{
    DefinitionInfo, DispatchInfo, EffectsInfo, HoverInfo, QueryResult, SymbolInfo, TypeInfo,
};

fn arg_cid(args: &[QueryArg], index: usize) -> Result<Cid> {
    match args.get(index) {
        Some(QueryArg::Cid(cid)) => Ok(*cid),
        _ => Err(AstDbError::NonCanonicalArg),
    }
}

fn arg_str(args: &[QueryArg], index: usize) -> Result<&str> {
    match args.get(index) {
        Some(QueryArg::Str(s)) => Ok(s.as_str()),
        _ => Err(AstDbError::NonCanonicalArg),
    }
}

/// Resolve `name` starting at the scope the `scope` CID's node opens,
/// walking outward through enclosing scopes (spec.md §3.2 `Decl`
/// invariants: "a name resolves to the innermost declaration in scope").
fn resolve_name(cx: &QueryCx, index: &CidIndex, name: &str, scope_node: NodeId) -> Option<SymbolInfo> {
    let mut scope = index.scope_of_node(cx.snapshot(), scope_node)?;
    loop {
        let scope_row = cx.snapshot().get_scope(scope)?;
        for offset in 0..scope_row.decl_count {
            let decl_id = DeclId::from_raw(scope_row.first_decl + offset);
            let Some(decl_row) = cx.snapshot().get_decl(decl_id) else {
                continue;
            };
            if cx.snapshot().interner().get_str(decl_row.name) == Some(name) {
                return Some(SymbolInfo {
                    decl: decl_id,
                    name: name.to_string(),
                    kind: decl_row.kind,
                    scope,
                });
            }
        }
        if scope_row.parent.is_invalid() {
            return None;
        }
        scope = scope_row.parent;
    }
}

pub(crate) fn run_resolve_name(cx: &QueryCx, index: &CidIndex, args: &[QueryArg]) -> Result<QueryResult> {
    let name = arg_str(args, 0)?.to_string();
    let scope_cid = arg_cid(args, 1)?;
    cx.record_dependency(scope_cid);
    let Some(scope_node) = index.node_of_cid(scope_cid) else {
        return Ok(QueryResult::ResolveName(None));
    };
    Ok(QueryResult::ResolveName(resolve_name(cx, index, &name, scope_node)))
}

pub(crate) fn run_type_of(cx: &QueryCx, index: &CidIndex, args: &[QueryArg]) -> Result<QueryResult> {
    let node_cid = arg_cid(args, 0)?;
    cx.record_dependency(node_cid);
    let Some(node) = index.node_of_cid(node_cid) else {
        return Ok(QueryResult::TypeOf(None));
    };
    let Some(decl) = index.decl_by_node(node) else {
        return Ok(QueryResult::TypeOf(None));
    };
    let Some(decl_row) = cx.snapshot().get_decl(decl) else {
        return Ok(QueryResult::TypeOf(None));
    };
    if decl_row.type_id.is_invalid() {
        return Ok(QueryResult::TypeOf(None));
    }
    Ok(QueryResult::TypeOf(Some(TypeInfo {
        type_id: decl_row.type_id,
    })))
}

pub(crate) fn run_effects(cx: &QueryCx, index: &CidIndex, args: &[QueryArg]) -> Result<QueryResult> {
    let node_cid = arg_cid(args, 0)?;
    cx.record_dependency(node_cid);
    let Some(node) = index.node_of_cid(node_cid) else {
        return Ok(QueryResult::Effects(None));
    };
    let masks = cx.snapshot().func_masks(node);
    Ok(QueryResult::Effects(Some(EffectsInfo {
        effect_mask: masks.effect_mask,
    })))
}

pub(crate) fn run_dispatch(cx: &QueryCx, index: &CidIndex, args: &[QueryArg]) -> Result<QueryResult> {
    let callsite_cid = arg_cid(args, 0)?;
    // arg_types is accepted per spec.md §4.6's signature but overload
    // resolution by argument type is out of scope for this core (spec.md
    // §2 Non-goals: "Type system / type inference engine"); the single
    // reference this core knows how to resolve is the one recorded at
    // the call's callee node.
    cx.record_dependency(callsite_cid);
    let Some(callsite) = index.node_of_cid(callsite_cid) else {
        return Ok(QueryResult::Dispatch(None));
    };
    let Some(callee) = astdb_schema::call_expr::callee(cx.snapshot(), callsite) else {
        return Ok(QueryResult::Dispatch(None));
    };
    let resolved_decl = index.ref_by_node(callee).unwrap_or(DeclId::INVALID);
    Ok(QueryResult::Dispatch(Some(DispatchInfo {
        callee,
        resolved: resolved_decl.is_valid(),
        resolved_decl,
    })))
}

pub(crate) fn run_hover(cx: &QueryCx, index: &CidIndex, args: &[QueryArg]) -> Result<QueryResult> {
    let node_cid = arg_cid(args, 0)?;
    cx.record_dependency(node_cid);
    let Some(node) = index.node_of_cid(node_cid) else {
        return Ok(QueryResult::Hover(None));
    };
    let Some(row) = cx.snapshot().get_node(node) else {
        return Ok(QueryResult::Hover(None));
    };
    let Some(text) = cx.snapshot().token_text(row.first_token) else {
        return Ok(QueryResult::Hover(None));
    };
    Ok(QueryResult::Hover(Some(HoverInfo {
        text: text.to_string(),
        cid: node_cid,
    })))
}

pub(crate) fn run_definition(cx: &QueryCx, index: &CidIndex, args: &[QueryArg]) -> Result<QueryResult> {
    let ref_cid = arg_cid(args, 0)?;
    cx.record_dependency(ref_cid);
    let Some(ref_node) = index.node_of_cid(ref_cid) else {
        return Ok(QueryResult::Definition(None));
    };
    let Some(decl) = index.ref_by_node(ref_node) else {
        return Ok(QueryResult::Definition(None));
    };
    let Some(decl_row) = cx.snapshot().get_decl(decl) else {
        return Ok(QueryResult::Definition(None));
    };
    Ok(QueryResult::Definition(Some(DefinitionInfo {
        decl,
        node: decl_row.node,
    })))
}

pub(crate) fn run_references(cx: &QueryCx, index: &CidIndex, args: &[QueryArg]) -> Result<QueryResult> {
    let decl_cid = arg_cid(args, 0)?;
    cx.record_dependency(decl_cid);
    let Some(decl) = index.decl_of_cid(decl_cid) else {
        return Ok(QueryResult::References(Vec::new()));
    };
    let mut refs = Vec::new();
    for raw in 0..cx.snapshot().ref_count() {
        let ref_id = astdb_types::RefId::from_raw(raw);
        let Some(ref_row) = cx.snapshot().get_ref(ref_id) else {
            continue;
        };
        if ref_row.target_decl == decl {
            if let Some(cid) = index.cid_of_node(ref_row.at_node) {
                refs.push(cid);
            }
        }
    }
    Ok(QueryResult::References(refs))
}
