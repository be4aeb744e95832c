//! UTF-8 string interner with exact dedup (spec.md §4.1).
//!
//! Interned bytes live in a single append-only buffer rather than in
//! per-string `bumpalo` allocations: a `StringInterner` owning both a
//! `bumpalo::Bump` and slices borrowed from it would be a self-referential
//! struct, which this workspace's `forbid(unsafe_code)` lint rules out
//! building without a crate like `ouroboros`. A flat growable buffer
//! indexed by `(offset, len)` gives the same properties we want --
//! append-only, O(1) amortized insert, the whole interner freed in one
//! deallocation -- without storing any self-referential borrow. See
//! DESIGN.md for the note on why this supersedes a `bumpalo`-backed
//! approach.

use astdb_error::{AstDbError, Result};
use astdb_types::StrId;
use hashbrown::HashMap;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy)]
struct Slot {
    offset: u32,
    len: u32,
}

/// Deduplicating UTF-8 string interner.
///
/// `intern(a) == intern(b)` iff `a` and `b` are byte-equal (spec.md
/// invariant 2). Lookup correctness does not depend on insertion order;
/// only performance does.
#[derive(Debug, Default)]
pub struct StringInterner {
    buffer: Vec<u8>,
    slots: Vec<Slot>,
    /// Maps a content hash to the candidate `StrId`s sharing it, so exact
    /// dedup can be resolved by a handful of byte comparisons instead of a
    /// linear scan of every interned string.
    by_hash: HashMap<u64, SmallVec<[StrId; 4]>>,
    strict_nfc: bool,
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(0x0000_0100_0000_01B3);
    }
    hash
}

/// A very small, dependency-free check for the subset of non-NFC inputs
/// this interner refuses in strict mode: presence of a combining mark
/// immediately after an ASCII letter that has a precomposed form is the
/// overwhelmingly common case callers hit by accident (e.g. `"e\u{0301}"`
/// instead of `"\u{00e9}"`). This is a heuristic, not a full Unicode
/// normalization check; hosts needing full NFC validation should validate
/// before calling `intern`.
fn looks_non_canonical(bytes: &[u8]) -> bool {
    const COMBINING_START: u32 = 0x0300;
    const COMBINING_END: u32 = 0x036F;
    let Ok(s) = std::str::from_utf8(bytes) else {
        return false;
    };
    s.chars().any(|c| {
        let cp = c as u32;
        (COMBINING_START..=COMBINING_END).contains(&cp)
    })
}

impl StringInterner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an interner that rejects non-canonical (non-NFC) input at
    /// `intern` time (spec.md §4.1 "optional strict mode").
    #[must_use]
    pub fn new_strict() -> Self {
        Self {
            strict_nfc: true,
            ..Self::default()
        }
    }

    fn push(&mut self, bytes: &[u8]) -> StrId {
        let offset = u32::try_from(self.buffer.len()).expect("interner buffer exceeds u32 range");
        self.buffer.extend_from_slice(bytes);
        let len = u32::try_from(bytes.len()).expect("interned string exceeds u32 length");
        let id = StrId::from_raw(u32::try_from(self.slots.len()).unwrap_or(u32::MAX));
        self.slots.push(Slot { offset, len });
        id
    }

    /// Intern `bytes`, returning the existing `StrId` if an entry with
    /// byte-equal content already exists (spec.md §4.1).
    ///
    /// # Errors
    /// `NonCanonicalString` in strict mode when `bytes` looks non-NFC.
    pub fn intern(&mut self, bytes: &[u8]) -> Result<StrId> {
        if self.strict_nfc && looks_non_canonical(bytes) {
            return Err(AstDbError::NonCanonicalString);
        }
        if let Some(existing) = self.find(bytes) {
            return Ok(existing);
        }
        let hash = fnv1a(bytes);
        let id = self.push(bytes);
        self.by_hash.entry(hash).or_default().push(id);
        Ok(id)
    }

    /// Non-inserting lookup.
    #[must_use]
    pub fn find(&self, bytes: &[u8]) -> Option<StrId> {
        let hash = fnv1a(bytes);
        let candidates = self.by_hash.get(&hash)?;
        candidates
            .iter()
            .copied()
            .find(|&id| self.get(id) == Some(bytes))
    }

    /// Fetch the interned bytes for `id`, or `None` if `id` is invalid or
    /// out of range.
    #[must_use]
    pub fn get(&self, id: StrId) -> Option<&[u8]> {
        if id.is_invalid() {
            return None;
        }
        let slot = self.slots.get(id.index())?;
        let start = slot.offset as usize;
        let end = start + slot.len as usize;
        self.buffer.get(start..end)
    }

    /// Fetch the interned bytes as `str`, assuming (per spec.md §3.2) the
    /// input was valid UTF-8 at intern time.
    #[must_use]
    pub fn get_str(&self, id: StrId) -> Option<&str> {
        self.get(id).and_then(|b| std::str::from_utf8(b).ok())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_is_exact() {
        let mut interner = StringInterner::new();
        let a = interner.intern(b"hello").unwrap();
        let b = interner.intern(b"hello").unwrap();
        let c = interner.intern(b"world").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn get_round_trips() {
        let mut interner = StringInterner::new();
        let id = interner.intern(b"example").unwrap();
        assert_eq!(interner.get(id), Some(b"example".as_slice()));
        assert_eq!(interner.get_str(id), Some("example"));
    }

    #[test]
    fn get_invalid_is_none() {
        let interner = StringInterner::new();
        assert_eq!(interner.get(StrId::INVALID), None);
        assert_eq!(interner.get(StrId::from_raw(99)), None);
    }

    #[test]
    fn find_does_not_insert() {
        let mut interner = StringInterner::new();
        assert_eq!(interner.find(b"missing"), None);
        assert_eq!(interner.len(), 0);
        let id = interner.intern(b"present").unwrap();
        assert_eq!(interner.find(b"present"), Some(id));
    }

    #[test]
    fn strict_mode_rejects_combining_marks() {
        let mut interner = StringInterner::new_strict();
        let decomposed = "e\u{0301}"; // e + combining acute accent
        assert!(matches!(
            interner.intern(decomposed.as_bytes()),
            Err(AstDbError::NonCanonicalString)
        ));
        assert!(interner.intern("\u{00e9}".as_bytes()).is_ok());
    }
}
