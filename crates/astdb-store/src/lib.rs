//! The columnar snapshot store: string interner, append-only row tables,
//! CID cache, and node→scope map (spec.md §3, §4.2, §6).

mod interner;
mod rows;
mod snapshot;
mod table;

pub use interner::StringInterner;
pub use rows::{DeclRow, DiagRow, EdgeRow, NodeRow, RefRow, ScopeRow, TokenRow};
pub use snapshot::{FuncMasks, Snapshot};
pub use table::{Table, ROW_LIMIT};
