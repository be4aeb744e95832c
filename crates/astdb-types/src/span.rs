//! Source spans (byte range + line/col) attached to tokens and diagnostics.

use serde::{Deserialize, Serialize};

/// A half-open byte range with 1-based line/column coordinates at each end.
///
/// Spans are carried for host diagnostics only; the canonical serializer
/// (`astdb-canon`) never reads them, which is what gives CIDs their
/// whitespace/position invariance (spec.md §4.3 invariant 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start_byte: u32,
    pub end_byte: u32,
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    #[must_use]
    pub const fn new(
        start_byte: u32,
        end_byte: u32,
        start_line: u32,
        start_col: u32,
        end_line: u32,
        end_col: u32,
    ) -> Self {
        Self {
            start_byte,
            end_byte,
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end_byte - self.start_byte
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start_byte == self.end_byte
    }
}
