//! Canonical query argument encoding (spec.md §4.6 "Canonical argument
//! encoding", invariant 3).
//!
//! Arguments are a length-prefixed stream of type-tagged values. CIDs are
//! raw 32 bytes, integers are fixed-width little-endian `i64`, strings are
//! `u32 length | UTF-8 bytes` with well-formedness enforced on decode.
//! `List` is this workspace's own extension for queries like `Dispatch`
//! that take a variable-length argument (`arg_types: [TypeId]`); it nests
//! the same tag-then-payload rule recursively.

use astdb_error::{AstDbError, Result};
use astdb_types::{Cid, CID_LEN};

const TAG_CID: u8 = 0;
const TAG_INT: u8 = 1;
const TAG_STR: u8 = 2;
const TAG_LIST: u8 = 3;

/// One canonical query argument value (spec.md §4.6).
#[derive(Debug, Clone, PartialEq)]
pub enum QueryArg {
    Cid(Cid),
    Int(i64),
    Str(String),
    List(Vec<QueryArg>),
}

impl QueryArg {
    #[must_use]
    pub fn cid(cid: Cid) -> Self {
        Self::Cid(cid)
    }

    #[must_use]
    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }
}

/// Encode `args` into the canonical byte stream (spec.md §4.6).
#[must_use]
pub fn encode_args(args: &[QueryArg]) -> Vec<u8> {
    let mut out = Vec::new();
    write_arg_list(&mut out, args);
    out
}

/// Decode a canonical byte stream back into argument values.
///
/// # Errors
/// `AstDbError::NonCanonicalArg` (`QE0005`) on truncated input, an unknown
/// tag, or a string payload that is not valid UTF-8.
pub fn decode_args(bytes: &[u8]) -> Result<Vec<QueryArg>> {
    let mut cursor = 0usize;
    let args = read_arg_list(bytes, &mut cursor)?;
    if cursor != bytes.len() {
        return Err(AstDbError::NonCanonicalArg);
    }
    Ok(args)
}

fn write_arg_list(out: &mut Vec<u8>, args: &[QueryArg]) {
    out.extend_from_slice(&(args.len() as u32).to_le_bytes());
    for arg in args {
        write_arg(out, arg);
    }
}

fn write_arg(out: &mut Vec<u8>, arg: &QueryArg) {
    match arg {
        QueryArg::Cid(cid) => {
            out.push(TAG_CID);
            out.extend_from_slice(cid.as_bytes());
        }
        QueryArg::Int(value) => {
            out.push(TAG_INT);
            out.extend_from_slice(&value.to_le_bytes());
        }
        QueryArg::Str(s) => {
            out.push(TAG_STR);
            out.extend_from_slice(&(s.len() as u32).to_le_bytes());
            out.extend_from_slice(s.as_bytes());
        }
        QueryArg::List(items) => {
            out.push(TAG_LIST);
            write_arg_list(out, items);
        }
    }
}

fn take<'a>(bytes: &'a [u8], cursor: &mut usize, len: usize) -> Result<&'a [u8]> {
    let end = cursor.checked_add(len).ok_or(AstDbError::NonCanonicalArg)?;
    let slice = bytes.get(*cursor..end).ok_or(AstDbError::NonCanonicalArg)?;
    *cursor = end;
    Ok(slice)
}

fn read_u32(bytes: &[u8], cursor: &mut usize) -> Result<u32> {
    let slice = take(bytes, cursor, 4)?;
    Ok(u32::from_le_bytes(slice.try_into().expect("length checked above")))
}

fn read_arg_list(bytes: &[u8], cursor: &mut usize) -> Result<Vec<QueryArg>> {
    let count = read_u32(bytes, cursor)? as usize;
    let mut args = Vec::with_capacity(count.min(4096));
    for _ in 0..count {
        args.push(read_arg(bytes, cursor)?);
    }
    Ok(args)
}

fn read_arg(bytes: &[u8], cursor: &mut usize) -> Result<QueryArg> {
    let tag = *take(bytes, cursor, 1)?.first().expect("length checked above");
    match tag {
        TAG_CID => {
            let slice = take(bytes, cursor, CID_LEN)?;
            let mut raw = [0u8; CID_LEN];
            raw.copy_from_slice(slice);
            Ok(QueryArg::Cid(Cid::from_bytes(raw)))
        }
        TAG_INT => {
            let slice = take(bytes, cursor, 8)?;
            Ok(QueryArg::Int(i64::from_le_bytes(
                slice.try_into().expect("length checked above"),
            )))
        }
        TAG_STR => {
            let len = read_u32(bytes, cursor)? as usize;
            let slice = take(bytes, cursor, len)?;
            let s = std::str::from_utf8(slice).map_err(|_| AstDbError::NonCanonicalArg)?;
            Ok(QueryArg::Str(s.to_string()))
        }
        TAG_LIST => Ok(QueryArg::List(read_arg_list(bytes, cursor)?)),
        _ => Err(AstDbError::NonCanonicalArg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_tag() {
        let args = vec![
            QueryArg::Cid(Cid::from_bytes([7; CID_LEN])),
            QueryArg::Int(-42),
            QueryArg::Str("hello".to_string()),
            QueryArg::List(vec![QueryArg::Int(1), QueryArg::Int(2)]),
        ];
        let bytes = encode_args(&args);
        let decoded = decode_args(&bytes).unwrap();
        assert_eq!(decoded, args);
    }

    #[test]
    fn truncated_input_is_non_canonical() {
        let args = vec![QueryArg::Str("x".to_string())];
        let mut bytes = encode_args(&args);
        bytes.truncate(bytes.len() - 1);
        assert_eq!(decode_args(&bytes), Err(AstDbError::NonCanonicalArg));
    }

    #[test]
    fn invalid_utf8_string_is_non_canonical() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.push(TAG_STR);
        bytes.extend_from_slice(&2u32.to_le_bytes());
        bytes.extend_from_slice(&[0xff, 0xfe]);
        assert_eq!(decode_args(&bytes), Err(AstDbError::NonCanonicalArg));
    }

    #[test]
    fn trailing_bytes_are_non_canonical() {
        let mut bytes = encode_args(&[QueryArg::Int(1)]);
        bytes.push(0);
        assert_eq!(decode_args(&bytes), Err(AstDbError::NonCanonicalArg));
    }
}
