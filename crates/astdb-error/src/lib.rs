//! Shared error enum and diagnostic wire types for the ASTDB core
//! (spec.md §7 "Error handling design", §6 "Diagnostic wire format").

mod diagnostic;

pub use diagnostic::{Diagnostic, DiagnosticCode};

use astdb_types::{DeclId, NodeId, TokenId};
use thiserror::Error;

/// The single error type propagated by every fallible operation in the
/// workspace, one variant per failure mode named in spec.md §4.x/§7.
///
/// Invalid-ID lookups are *not* represented here: `get_*` operations
/// return `Option<Row>` and simply answer `None` (spec.md §7, "not an
/// error"). `AstDbError` is reserved for conditions that abort the calling
/// operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstDbError {
    /// An `add_*` operation would exceed the table's row-count limit
    /// (spec.md §3.3 "Capacity discipline"; SPEC_FULL.md §2 item 4: the
    /// growable-table resolution still raises this error at `u32::MAX - 1`
    /// rows since IDs are 32-bit and `0xFFFF_FFFF` is the sentinel).
    #[error("table `{table}` exceeded its row capacity of {capacity}")]
    CapacityExceeded { table: &'static str, capacity: u32 },

    /// `intern` was called in strict mode with bytes that are not
    /// Unicode-NFC-normalized (spec.md §4.1).
    #[error("interned string is not Unicode NFC-normalized")]
    NonCanonicalString,

    /// The canonical serializer was asked to serialize a dangling
    /// `NodeId` (spec.md §4.3 failure modes).
    #[error("invalid node id: {0}")]
    InvalidNodeId(NodeId),

    /// The canonical serializer was asked to serialize a dangling
    /// `DeclId`.
    #[error("invalid decl id: {0}")]
    InvalidDeclId(DeclId),

    /// A node's `first_token`/`last_token` does not resolve to a real row.
    #[error("invalid token id: {0}")]
    InvalidToken(TokenId),

    /// An integer-literal token's text could not be parsed as a signed
    /// decimal integer (spec.md §4.3 normalization rules).
    #[error("token text `{text}` is not a valid integer literal")]
    InvalidIntLiteral { text: String },

    /// A float-literal token's text could not be parsed as an IEEE-754
    /// double.
    #[error("token text `{text}` is not a valid float literal")]
    InvalidFloatLiteral { text: String },

    /// `QE0005`: a query argument failed canonical encoding (invalid
    /// UTF-8, wrong-width CID, ...) (spec.md §4.6).
    #[error("[QE0005] non-canonical query argument")]
    NonCanonicalArg,

    /// `QE0007`: the cycle detector rejected a `startQuery`/dependency
    /// edge that would close a cycle (spec.md §4.6).
    #[error("[QE0007] cycle detected in query dependency graph")]
    Cycle,

    /// `Q1001`: a query attempted filesystem access (spec.md §4.6).
    #[error("[Q1001] impure operation: file system access")]
    ImpureFileSystem,

    /// `Q1003`: a query attempted network access.
    #[error("[Q1003] impure operation: network access")]
    ImpureNetwork,

    /// `Q1005`: a query attempted environment access.
    #[error("[Q1005] impure operation: environment access")]
    ImpureEnvironment,

    /// An `add_*` operation was attempted on a snapshot that has already
    /// been frozen (spec.md §3.3 "Lifecycle & ownership").
    #[error("snapshot is frozen and accepts no further mutation")]
    SnapshotFrozen,
}

/// Result alias used by every fallible function in the workspace.
pub type Result<T> = std::result::Result<T, AstDbError>;
