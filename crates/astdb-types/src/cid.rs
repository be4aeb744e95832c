//! Content identifiers: the 32-byte BLAKE3 output identifying a subject's
//! canonical semantic content (spec.md §3.1, §4.4).

use serde::{Deserialize, Serialize};

use crate::ids::{DeclId, NodeId};

/// Number of bytes in a CID (BLAKE3-256 output).
pub const CID_LEN: usize = 32;

/// A content identifier: a 32-byte value identifying the canonical semantic
/// content of a [`CIDSubject`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cid(pub [u8; CID_LEN]);

impl Cid {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; CID_LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; CID_LEN] {
        &self.0
    }

    /// Lower-case 64-character hex encoding.
    #[must_use]
    pub fn format(&self) -> String {
        let mut out = String::with_capacity(CID_LEN * 2);
        for byte in self.0 {
            out.push_str(&format!("{byte:02x}"));
        }
        out
    }

    /// Parse a 64-character lower- or upper-case hex string.
    #[must_use]
    pub fn parse(hex: &str) -> Option<Self> {
        if hex.len() != CID_LEN * 2 {
            return None;
        }
        let mut bytes = [0u8; CID_LEN];
        for (i, chunk) in hex.as_bytes().chunks_exact(2).enumerate() {
            let hi = (chunk[0] as char).to_digit(16)?;
            let lo = (chunk[1] as char).to_digit(16)?;
            bytes[i] = ((hi << 4) | lo) as u8;
        }
        Some(Self(bytes))
    }

    #[must_use]
    pub fn compare(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl std::fmt::Debug for Cid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cid({})", self.format())
    }
}

impl std::fmt::Display for Cid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}

/// The three kinds of subject a CID can be computed over (spec.md §3.1,
/// §9 "Tagged variants" -- a closed three-way variant, never an open
/// extension point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CidSubject {
    Node(NodeId),
    Decl(DeclId),
    Module,
}
