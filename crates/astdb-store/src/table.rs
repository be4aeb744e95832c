//! A generic append-only column: `append(row) -> TypedId`, `get(id) ->
//! Option<&Row>` (spec.md §4.2). Growable (SPEC_FULL.md §2 item 4), but
//! refuses to exceed `u32::MAX - 1` rows since IDs are 32-bit and
//! `0xFFFF_FFFF` is the reserved invalid sentinel.

use astdb_error::{AstDbError, Result};

/// Ceiling a growable table will raise `CapacityExceeded` at, one below
/// the invalid-ID sentinel.
pub const ROW_LIMIT: u32 = u32::MAX - 1;

#[derive(Debug, Clone)]
pub struct Table<Row> {
    name: &'static str,
    rows: Vec<Row>,
}

impl<Row> Table<Row> {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: Vec::new(),
        }
    }

    /// Append `row`, returning its dense row index. Errors if the table is
    /// already at `ROW_LIMIT`.
    pub fn append(&mut self, row: Row) -> Result<u32> {
        if self.rows.len() as u64 >= u64::from(ROW_LIMIT) {
            return Err(AstDbError::CapacityExceeded {
                table: self.name,
                capacity: ROW_LIMIT,
            });
        }
        let index = u32::try_from(self.rows.len()).expect("checked against ROW_LIMIT above");
        self.rows.push(row);
        Ok(index)
    }

    #[must_use]
    pub fn get(&self, index: u32) -> Option<&Row> {
        if index == u32::MAX {
            return None;
        }
        self.rows.get(index as usize)
    }

    #[must_use]
    pub fn get_mut(&mut self, index: u32) -> Option<&mut Row> {
        if index == u32::MAX {
            return None;
        }
        self.rows.get_mut(index as usize)
    }

    #[must_use]
    pub fn len(&self) -> u32 {
        u32::try_from(self.rows.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn slice(&self, start: u32, count: u32) -> &[Row] {
        let start = start as usize;
        let end = start + count as usize;
        &self.rows[start..end]
    }
}
