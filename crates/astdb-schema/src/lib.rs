//! Kind-validated accessors over the node/edge tables (spec.md §4.5).
//!
//! These shapes are the *only* contract between a parser and its
//! consumers (spec.md §4.5 "Contract"): every accessor here validates
//! the node's kind first and returns `None`/an empty `Vec` on mismatch,
//! never panics.

use astdb_store::Snapshot;
use astdb_types::{NodeId, NodeKind, TokenId};

fn node_of_kind(snapshot: &Snapshot, node: NodeId, kind: NodeKind) -> Option<NodeId> {
    let row = snapshot.get_node(node)?;
    (row.kind == kind).then_some(node)
}

/// `binary_expr` -> `[lhs, rhs]`.
pub mod binary_expr {
    use super::{node_of_kind, NodeId, NodeKind, Snapshot, TokenId};

    #[must_use]
    pub fn left(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        node_of_kind(snapshot, node, NodeKind::BinaryExpr)?;
        snapshot.children(node).first().copied()
    }

    #[must_use]
    pub fn right(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        node_of_kind(snapshot, node, NodeKind::BinaryExpr)?;
        snapshot.children(node).get(1).copied()
    }

    /// `left.last_token + 1` (spec.md §4.5 Open Question 1; preserved per
    /// SPEC_FULL.md §2 item 1 rather than adding an explicit field).
    #[must_use]
    pub fn operator_token(snapshot: &Snapshot, node: NodeId) -> Option<TokenId> {
        let lhs = left(snapshot, node)?;
        let lhs_row = snapshot.get_node(lhs)?;
        Some(TokenId::from_raw(lhs_row.last_token.to_raw() + 1))
    }
}

/// `unary_expr` -> `[operand]`.
pub mod unary_expr {
    use super::{node_of_kind, NodeId, NodeKind, Snapshot, TokenId};

    #[must_use]
    pub fn operand(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        node_of_kind(snapshot, node, NodeKind::UnaryExpr)?;
        snapshot.children(node).first().copied()
    }

    #[must_use]
    pub fn operator_token(snapshot: &Snapshot, node: NodeId) -> Option<TokenId> {
        let row = node_of_kind(snapshot, node, NodeKind::UnaryExpr).and_then(|n| snapshot.get_node(n))?;
        Some(row.first_token)
    }
}

/// `call_expr` -> `[callee, arg0, arg1, …]`.
pub mod call_expr {
    use super::{node_of_kind, NodeId, NodeKind, Snapshot};

    #[must_use]
    pub fn callee(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        node_of_kind(snapshot, node, NodeKind::CallExpr)?;
        snapshot.children(node).first().copied()
    }

    #[must_use]
    pub fn arguments(snapshot: &Snapshot, node: NodeId) -> Vec<NodeId> {
        if node_of_kind(snapshot, node, NodeKind::CallExpr).is_none() {
            return Vec::new();
        }
        let children = snapshot.children(node);
        children.get(1..).map(<[NodeId]>::to_vec).unwrap_or_default()
    }
}

/// `index_expr` -> `[object, index]`.
pub mod index_expr {
    use super::{node_of_kind, NodeId, NodeKind, Snapshot};

    #[must_use]
    pub fn object(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        node_of_kind(snapshot, node, NodeKind::IndexExpr)?;
        snapshot.children(node).first().copied()
    }

    #[must_use]
    pub fn index(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        node_of_kind(snapshot, node, NodeKind::IndexExpr)?;
        snapshot.children(node).get(1).copied()
    }
}

/// `field_expr` -> `[object]`.
pub mod field_expr {
    use super::{node_of_kind, NodeId, NodeKind, Snapshot, TokenId};

    #[must_use]
    pub fn object(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        node_of_kind(snapshot, node, NodeKind::FieldExpr)?;
        snapshot.children(node).first().copied()
    }

    #[must_use]
    pub fn field_name_token(snapshot: &Snapshot, node: NodeId) -> Option<TokenId> {
        let row = node_of_kind(snapshot, node, NodeKind::FieldExpr).and_then(|n| snapshot.get_node(n))?;
        Some(row.last_token)
    }
}

/// `array_lit` -> `[elem0, elem1, …]`.
pub mod array_lit {
    use super::{node_of_kind, NodeId, NodeKind, Snapshot};

    #[must_use]
    pub fn elements(snapshot: &Snapshot, node: NodeId) -> Vec<NodeId> {
        if node_of_kind(snapshot, node, NodeKind::ArrayLit).is_none() {
            return Vec::new();
        }
        snapshot.children(node)
    }
}

/// `let_stmt`/`var_stmt` -> `[name, type_annotation?, initializer?]`.
///
/// The `type_annotation`/`initializer` split consults the node's
/// `has_type_annotation` flag (SPEC_FULL.md §2 item 2), not arity alone.
pub mod let_stmt {
    use super::{node_of_kind, NodeId, NodeKind, Snapshot};

    fn validate(snapshot: &Snapshot, node: NodeId) -> Option<astdb_store::NodeRow> {
        let row = snapshot.get_node(node)?;
        matches!(row.kind, NodeKind::LetStmt | NodeKind::VarStmt).then_some(row)
    }

    #[must_use]
    pub fn name(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        validate(snapshot, node)?;
        snapshot.children(node).first().copied()
    }

    #[must_use]
    pub fn type_annotation(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        let row = validate(snapshot, node)?;
        if !row.has_type_annotation {
            return None;
        }
        snapshot.children(node).get(1).copied()
    }

    #[must_use]
    pub fn initializer(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        let row = validate(snapshot, node)?;
        let children = snapshot.children(node);
        if row.has_type_annotation {
            children.get(2).copied()
        } else {
            children.get(1).copied()
        }
    }
}

/// `func_decl` -> `[name, params, return_type?, body]`.
pub mod func_decl {
    use super::{node_of_kind, NodeId, NodeKind, Snapshot};

    #[must_use]
    pub fn name(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        node_of_kind(snapshot, node, NodeKind::FuncDecl)?;
        snapshot.children(node).first().copied()
    }

    #[must_use]
    pub fn parameters(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        node_of_kind(snapshot, node, NodeKind::FuncDecl)?;
        snapshot.children(node).get(1).copied()
    }

    #[must_use]
    pub fn return_type(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        node_of_kind(snapshot, node, NodeKind::FuncDecl)?;
        let children = snapshot.children(node);
        if children.len() == 4 {
            children.get(2).copied()
        } else {
            None
        }
    }

    #[must_use]
    pub fn body(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        node_of_kind(snapshot, node, NodeKind::FuncDecl)?;
        snapshot.children(node).last().copied()
    }
}

/// `param_decl` -> `[name, type_annotation]`.
pub mod param_decl {
    use super::{node_of_kind, NodeId, NodeKind, Snapshot};

    #[must_use]
    pub fn name(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        node_of_kind(snapshot, node, NodeKind::ParamDecl)?;
        snapshot.children(node).first().copied()
    }

    #[must_use]
    pub fn type_annotation(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        node_of_kind(snapshot, node, NodeKind::ParamDecl)?;
        snapshot.children(node).get(1).copied()
    }
}

/// `return_stmt` -> `[expr?]`.
pub mod return_stmt {
    use super::{node_of_kind, NodeId, NodeKind, Snapshot};

    #[must_use]
    pub fn expression(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        node_of_kind(snapshot, node, NodeKind::ReturnStmt)?;
        snapshot.children(node).first().copied()
    }
}

/// `assign_stmt` -> `[lhs, rhs]`.
pub mod assign_stmt {
    use super::{node_of_kind, NodeId, NodeKind, Snapshot};

    #[must_use]
    pub fn lhs(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        node_of_kind(snapshot, node, NodeKind::AssignStmt)?;
        snapshot.children(node).first().copied()
    }

    #[must_use]
    pub fn rhs(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        node_of_kind(snapshot, node, NodeKind::AssignStmt)?;
        snapshot.children(node).get(1).copied()
    }
}

/// `block_stmt` -> `[stmt0, stmt1, …]`.
pub mod block_stmt {
    use super::{node_of_kind, NodeId, NodeKind, Snapshot};

    #[must_use]
    pub fn statements(snapshot: &Snapshot, node: NodeId) -> Vec<NodeId> {
        if node_of_kind(snapshot, node, NodeKind::BlockStmt).is_none() {
            return Vec::new();
        }
        snapshot.children(node)
    }
}

/// `struct_decl`/`enum_decl` -> `[name, body]`.
pub mod type_decl {
    use super::{NodeId, NodeKind, Snapshot};

    fn validate(snapshot: &Snapshot, node: NodeId) -> Option<()> {
        let row = snapshot.get_node(node)?;
        matches!(row.kind, NodeKind::StructDecl | NodeKind::EnumDecl).then_some(())
    }

    #[must_use]
    pub fn name(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        validate(snapshot, node)?;
        snapshot.children(node).first().copied()
    }

    #[must_use]
    pub fn body(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
        validate(snapshot, node)?;
        snapshot.children(node).get(1).copied()
    }
}
