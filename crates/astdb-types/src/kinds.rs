//! Lexical and syntactic kind enumerations (spec.md §3.2, §4.5).
//!
//! These are the vocabulary the accessor schema (`astdb-schema`) and the
//! canonical serializer (`astdb-canon`) both switch on. Each variant's
//! discriminant is stable once published -- it is written into the
//! canonical byte stream (`uleb128(kind)`), so reordering variants would
//! silently change every CID.

use serde::{Deserialize, Serialize};

/// Lexical class of a token (spec.md §3.2 `Token` entity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum TokenKind {
    IntLiteral = 0,
    FloatLiteral = 1,
    StringLiteral = 2,
    BoolLiteral = 3,
    NullLiteral = 4,
    Identifier = 5,
    Keyword = 6,
    /// Any binary operator lexeme (`+`, `-`, `==`, `&&`, ...). The
    /// specific operator is distinguished by `str_id`, not by a finer
    /// `TokenKind` split, matching spec.md §4.3's "uleb128(operator
    /// token kind)" normalization rule.
    Operator = 7,
    Punctuation = 8,
    Trivia = 9,
    Eof = 10,
}

impl TokenKind {
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Syntactic class of an AST node (spec.md §3.2 `Node` entity, §4.5
/// accessor table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum NodeKind {
    IntLiteral = 0,
    FloatLiteral = 1,
    StringLiteral = 2,
    BoolLiteral = 3,
    NullLiteral = 4,
    Identifier = 5,
    BinaryExpr = 6,
    UnaryExpr = 7,
    CallExpr = 8,
    IndexExpr = 9,
    FieldExpr = 10,
    ArrayLit = 11,
    LetStmt = 12,
    VarStmt = 13,
    FuncDecl = 14,
    ParamDecl = 15,
    ReturnStmt = 16,
    AssignStmt = 17,
    BlockStmt = 18,
    StructDecl = 19,
    EnumDecl = 20,
}

impl NodeKind {
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// `true` for the two node kinds whose child-count-2 case is
    /// disambiguated by the node's `has_type_annotation` flag rather than
    /// by arity alone (spec.md §4.5 Open Question 2, resolved in
    /// SPEC_FULL.md §2 item 2).
    #[must_use]
    pub const fn uses_type_annotation_flag(self) -> bool {
        matches!(self, Self::LetStmt | Self::VarStmt)
    }
}

/// Kind of a declaration row (spec.md §3.2 `Decl` entity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum DeclKind {
    Variable = 0,
    Parameter = 1,
    Function = 2,
    Struct = 3,
    Enum = 4,
    Field = 5,
}

impl DeclKind {
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}
