//! Strongly typed opaque 32-bit row identifiers (spec.md §3.1).
//!
//! Every table in the snapshot store is addressed by a dedicated ID type.
//! The types are mutually incompatible by construction: there is no `From`
//! impl between them, so swapping a `NodeId` for a `DeclId` is a compile
//! error rather than a silently wrong array index.

use serde::{Deserialize, Serialize};

/// Sentinel raw value reserved by every ID type to mean "no such row".
pub const INVALID_RAW: u32 = u32::MAX;

macro_rules! define_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// The sentinel value denoting "no such row".
            pub const INVALID: Self = Self(INVALID_RAW);

            /// Rebuild an ID from its raw row index. This is the only
            /// supported construction path outside the store itself, and
            /// exists for serialization/FFI boundaries only.
            #[must_use]
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            /// The raw row index, for serialization/FFI boundaries only.
            #[must_use]
            pub const fn to_raw(self) -> u32 {
                self.0
            }

            /// `true` if this is the sentinel invalid ID.
            #[must_use]
            pub const fn is_invalid(self) -> bool {
                self.0 == INVALID_RAW
            }

            /// `true` if this ID addresses a real row.
            #[must_use]
            pub const fn is_valid(self) -> bool {
                !self.is_invalid()
            }

            /// The row index as `usize`, for column-vector indexing.
            ///
            /// Panics if called on the invalid sentinel; callers should
            /// check `is_valid()` first.
            #[must_use]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                if self.is_invalid() {
                    write!(f, concat!(stringify!($name), "(invalid)"))
                } else {
                    write!(f, concat!(stringify!($name), "({})"), self.0)
                }
            }
        }
    };
}

define_id!(StrId, "Identifies a deduplicated interned string.");
define_id!(TokenId, "Identifies a row in the token table.");
define_id!(NodeId, "Identifies a row in the AST node table.");
define_id!(EdgeId, "Identifies a row in the child-edge table.");
define_id!(ScopeId, "Identifies a row in the scope table.");
define_id!(DeclId, "Identifies a row in the declaration table.");
define_id!(RefId, "Identifies a row in the reference table.");
define_id!(DiagId, "Identifies a row in the diagnostic table.");
define_id!(TypeId, "Identifies a semantic type assigned to a declaration.");
define_id!(UnitId, "Identifies a compilation unit (source file).");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_is_default() {
        assert!(NodeId::default().is_invalid());
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn raw_round_trips() {
        let id = NodeId::from_raw(42);
        assert_eq!(id.to_raw(), 42);
        assert_eq!(id.index(), 42);
        assert!(id.is_valid());
    }

    #[test]
    fn distinct_types_are_not_interchangeable() {
        let node = NodeId::from_raw(7);
        let decl = DeclId::from_raw(7);
        // Same raw value, different types -- this would not compile if we
        // tried `node == decl`, which is exactly the point.
        assert_eq!(node.to_raw(), decl.to_raw());
    }
}
