//! Parsed table storage: header index + raw rows.
//!
//! Key invariants:
//! - Raw field values are never rewritten in place after parse
//! - A row's position in `rows` is its stable original index
//! - Header lookups for absent names return `None`, and every consumer
//!   treats that as "field unavailable" (empty string / zero)

// ---------------------------------------------------------------------------
// HeaderIndex
// ---------------------------------------------------------------------------

/// Column name → position map, built once per parse.
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    columns: Vec<String>,
}

impl HeaderIndex {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Position of a named column, or `None` when the header lacks it.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Header-indexed row set for one panel's source data.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub header: HeaderIndex,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            header: HeaderIndex::new(columns),
            rows,
        }
    }

    /// Field value by row index and column name.
    ///
    /// Absent column, out-of-range row, or short row all yield `""` —
    /// never an error.
    pub fn field(&self, row: usize, column: &str) -> &str {
        let Some(col) = self.header.index_of(column) else {
            return "";
        };
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["Method".into(), "Amount".into()],
            vec![
                vec!["Card".into(), "10.00".into()],
                vec!["Cash".into()], // short row
            ],
        )
    }

    #[test]
    fn field_lookup() {
        let t = sample();
        assert_eq!(t.field(0, "Method"), "Card");
        assert_eq!(t.field(0, "Amount"), "10.00");
    }

    #[test]
    fn absent_column_is_empty() {
        let t = sample();
        assert_eq!(t.field(0, "Tip"), "");
    }

    #[test]
    fn short_row_is_empty() {
        let t = sample();
        assert_eq!(t.field(1, "Amount"), "");
    }

    #[test]
    fn out_of_range_row_is_empty() {
        let t = sample();
        assert_eq!(t.field(99, "Method"), "");
    }

    #[test]
    fn header_index_of() {
        let h = HeaderIndex::new(vec!["A".into(), "B".into()]);
        assert_eq!(h.index_of("B"), Some(1));
        assert_eq!(h.index_of("C"), None);
    }
}
