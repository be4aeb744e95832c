//! Per-node-kind payload normalization (spec.md §4.3 "Normalization
//! rules").

use astdb_error::{AstDbError, Result};
use astdb_store::Snapshot;
use astdb_types::{NodeId, NodeKind};

use crate::frames::write_string_frame;
use crate::leb128::{write_sleb128, write_uleb128};

/// A fixed table of common operator lexemes mapped to a stable numeric
/// code, used by the `binary_expr` payload rule ("uleb128(operator token
/// kind)", spec.md §4.3). Lexemes outside this table still get a stable,
/// deterministic code (see `operator_code`) -- this just keeps the common
/// case small.
const KNOWN_OPERATORS: &[(&str, u32)] = &[
    ("+", 0),
    ("-", 1),
    ("*", 2),
    ("/", 3),
    ("%", 4),
    ("==", 5),
    ("!=", 6),
    ("<", 7),
    ("<=", 8),
    (">", 9),
    (">=", 10),
    ("&&", 11),
    ("||", 12),
    ("!", 13),
    ("&", 14),
    ("|", 15),
    ("^", 16),
    ("<<", 17),
    (">>", 18),
    ("=", 19),
];

/// Stable FNV-1a fallback for operator lexemes outside `KNOWN_OPERATORS`,
/// offset clear of the known-table range so the two never collide.
fn operator_code(text: &str) -> u32 {
    if let Some((_, code)) = KNOWN_OPERATORS.iter().find(|(lexeme, _)| *lexeme == text) {
        return *code;
    }
    let mut hash: u32 = 0x811c_9dc5;
    for b in text.bytes() {
        hash ^= u32::from(b);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    1000 + (hash % 1_000_000)
}

/// Canonical quiet NaN bit pattern every NaN float literal normalizes to
/// (spec.md §4.3 float-literal rule).
const CANONICAL_NAN: u64 = 0x7ff8_0000_0000_0000;

fn normalize_float_bits(value: f64) -> u64 {
    if value.is_nan() {
        return CANONICAL_NAN;
    }
    if value == 0.0 {
        return 0.0f64.to_bits(); // folds -0.0 into +0.0
    }
    value.to_bits()
}

/// Compute the payload bytes for `node` (spec.md §4.3). Does not include
/// the child CIDs; those are appended by the caller (`astdb-cid`) after
/// the Merkle-fold recursion resolves them.
pub fn node_payload(snapshot: &Snapshot, node: NodeId) -> Result<Vec<u8>> {
    let row = snapshot.get_node(node).ok_or(AstDbError::InvalidNodeId(node))?;
    let mut out = Vec::new();
    match row.kind {
        NodeKind::IntLiteral => {
            let text = snapshot
                .token_text(row.first_token)
                .ok_or(AstDbError::InvalidToken(row.first_token))?;
            let value: i64 = text
                .parse()
                .map_err(|_| AstDbError::InvalidIntLiteral {
                    text: text.to_string(),
                })?;
            write_sleb128(&mut out, value);
        }
        NodeKind::FloatLiteral => {
            let text = snapshot
                .token_text(row.first_token)
                .ok_or(AstDbError::InvalidToken(row.first_token))?;
            let value: f64 = text
                .parse()
                .map_err(|_| AstDbError::InvalidFloatLiteral {
                    text: text.to_string(),
                })?;
            out.extend_from_slice(&normalize_float_bits(value).to_le_bytes());
        }
        NodeKind::StringLiteral => {
            let text = snapshot
                .token_text(row.first_token)
                .ok_or(AstDbError::InvalidToken(row.first_token))?;
            write_string_frame(&mut out, text.as_bytes());
        }
        NodeKind::BoolLiteral => {
            let text = snapshot
                .token_text(row.first_token)
                .ok_or(AstDbError::InvalidToken(row.first_token))?;
            out.push(u8::from(text == "true" || text == "1"));
        }
        NodeKind::NullLiteral => {
            // empty payload
        }
        NodeKind::Identifier => {
            let text = snapshot
                .token_text(row.first_token)
                .ok_or(AstDbError::InvalidToken(row.first_token))?;
            write_string_frame(&mut out, text.as_bytes());
        }
        NodeKind::BinaryExpr => {
            // Operator token is `left.last_token + 1` (the preserved
            // heuristic, spec.md §4.5 Open Question 1 / SPEC_FULL.md §2
            // item 1).
            let children = snapshot.children(node);
            let left = *children.first().ok_or(AstDbError::InvalidNodeId(node))?;
            let left_row = snapshot
                .get_node(left)
                .ok_or(AstDbError::InvalidNodeId(left))?;
            let op_token_raw = left_row.last_token.to_raw() + 1;
            let op_token = astdb_types::TokenId::from_raw(op_token_raw);
            let text = snapshot
                .token_text(op_token)
                .ok_or(AstDbError::InvalidToken(op_token))?;
            write_uleb128(&mut out, u64::from(operator_code(text)));
        }
        NodeKind::FuncDecl => {
            let name_text = snapshot
                .token_text(row.first_token)
                .ok_or(AstDbError::InvalidToken(row.first_token))?;
            write_string_frame(&mut out, name_text.as_bytes());

            let children = snapshot.children(node);
            let has_return_type = children.len() == 4;
            let param_count = children
                .get(1)
                .map(|&params| snapshot.children(params).len())
                .unwrap_or(0);
            write_uleb128(&mut out, param_count as u64);
            out.push(u8::from(has_return_type));

            let masks = snapshot.func_masks(node);
            write_uleb128(&mut out, masks.effect_mask.bits());
            write_uleb128(&mut out, u64::from(masks.profile_mask.bits()));
        }
        NodeKind::LetStmt | NodeKind::VarStmt => {
            // SPEC_FULL.md §2 item 2: the has-type-annotation flag
            // disambiguates the two-child case and must be folded into
            // the CID, or two snapshots disagreeing only in this flag
            // (but with identical children) would wrongly collide.
            out.push(u8::from(row.has_type_annotation));
        }
        NodeKind::UnaryExpr
        | NodeKind::CallExpr
        | NodeKind::IndexExpr
        | NodeKind::FieldExpr
        | NodeKind::ArrayLit
        | NodeKind::ParamDecl
        | NodeKind::ReturnStmt
        | NodeKind::AssignStmt
        | NodeKind::BlockStmt
        | NodeKind::StructDecl
        | NodeKind::EnumDecl => {
            // "Generic/other nodes: no payload beyond the frame header;
            // structure is captured by children." (spec.md §4.3)
        }
    }
    Ok(out)
}
