//! The named query surface's identity (spec.md §4.6).

use serde::{Deserialize, Serialize};

/// One entry per named query in the initial surface (spec.md §4.6).
/// "Additional queries extend the same protocol" -- new variants are added
/// here, never modeled as open string identifiers, so `query_id` stays a
/// single byte in the canonical argument hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum QueryId {
    ResolveName = 0,
    TypeOf = 1,
    Effects = 2,
    Dispatch = 3,
    Hover = 4,
    Definition = 5,
    References = 6,
}

impl QueryId {
    /// The single byte folded into `args_hash` alongside the canonical
    /// argument encoding (spec.md §4.6 "Memo table").
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for QueryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ResolveName => "ResolveName",
            Self::TypeOf => "TypeOf",
            Self::Effects => "Effects",
            Self::Dispatch => "Dispatch",
            Self::Hover => "Hover",
            Self::Definition => "Definition",
            Self::References => "References",
        };
        f.write_str(s)
    }
}
