//! Table document - the loaded CSV data and its column metadata
//!
//! Rows keep the synthesized identifier in field 0; the declared columns
//! follow. Every mutation re-normalizes row lengths against the header,
//! padding short rows and truncating stray extra fields.

use std::path::PathBuf;

/// In-memory table state owned by the session
#[derive(Debug, Clone)]
pub struct TableDocument {
    /// Declared column names (identifier column not included)
    pub headers: Vec<String>,
    /// Stored width percentages, one per header
    pub widths: Vec<u16>,
    /// Data rows; field 0 is the identifier
    pub rows: Vec<Vec<String>>,
    /// File the table was loaded from / saved to
    pub path: Option<PathBuf>,
    /// Unsaved changes flag
    pub dirty: bool,
}

impl Default for TableDocument {
    fn default() -> Self {
        Self {
            headers: vec!["-".to_string(); 5],
            widths: vec![8, 30, 30, 16, 16],
            rows: Vec::new(),
            path: None,
            dirty: false,
        }
    }
}

/// Check whether a field is an all-digit identifier
pub fn is_identifier(field: &str) -> bool {
    !field.is_empty() && field.chars().all(|c| c.is_ascii_digit())
}

impl TableDocument {
    /// Build a document from freshly parsed file content
    ///
    /// Synthesizes the identifier column when the first data field of the
    /// first row is not all-digit, then normalizes every row.
    pub fn from_parts(headers: Vec<String>, widths: Vec<u16>, mut rows: Vec<Vec<String>>) -> Self {
        let needs_ids = rows
            .first()
            .and_then(|row| row.first())
            .map(|field| !is_identifier(field))
            .unwrap_or(false);

        if needs_ids {
            for (i, row) in rows.iter_mut().enumerate() {
                row.insert(0, (i + 1).to_string());
            }
        }

        let mut doc = Self {
            headers,
            widths,
            rows,
            path: None,
            dirty: false,
        };
        doc.normalize();
        doc
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Pad or truncate every row to identifier + declared columns
    ///
    /// Runs on every refresh; extra fields beyond the header width are
    /// silently dropped.
    pub fn normalize(&mut self) {
        let target = self.column_count() + 1;
        for row in &mut self.rows {
            while row.len() < target {
                row.push(String::new());
            }
            row.truncate(target);
        }
    }

    /// Append an empty row with the next identifier, returning its index
    pub fn add_row(&mut self) -> usize {
        let mut row = vec![(self.rows.len() + 1).to_string()];
        row.resize(self.column_count() + 1, String::new());
        self.rows.push(row);
        self.dirty = true;
        self.rows.len() - 1
    }

    /// Drop the trailing row again (cancelled add)
    pub fn remove_last_row(&mut self) {
        self.rows.pop();
    }

    /// Replace the data cells of a row, keeping its identifier
    pub fn set_row_cells(&mut self, index: usize, cells: Vec<String>) {
        if let Some(row) = self.rows.get_mut(index) {
            row.truncate(1);
            row.extend(cells);
            self.dirty = true;
        }
        self.normalize();
    }

    pub fn delete_row(&mut self, index: usize) {
        if index < self.rows.len() {
            self.rows.remove(index);
            self.dirty = true;
        }
    }

    /// Drop all data rows; header and widths stay
    pub fn clear_rows(&mut self) {
        self.rows.clear();
        self.dirty = true;
    }

    /// Apply a committed header edit and re-normalize the rows
    pub fn apply_header(&mut self, names: Vec<String>, widths: Vec<u16>) {
        self.headers = names;
        self.widths = widths;
        self.normalize();
        self.dirty = true;
    }

    /// Data cells of a row without the identifier
    pub fn row_cells(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).and_then(|row| row.get(1..))
    }

    /// File name for the title bar, if a file is attached
    pub fn file_name(&self) -> Option<String> {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_parts_synthesizes_identifiers() {
        let doc = TableDocument::from_parts(
            strings(&["name", "qty"]),
            vec![50, 50],
            vec![strings(&["apples", "3"]), strings(&["pears", "1"])],
        );
        assert_eq!(doc.rows[0], strings(&["1", "apples", "3"]));
        assert_eq!(doc.rows[1], strings(&["2", "pears", "1"]));
    }

    #[test]
    fn test_from_parts_keeps_existing_identifiers() {
        let doc = TableDocument::from_parts(
            strings(&["name", "qty"]),
            vec![50, 50],
            vec![strings(&["7", "apples", "3"])],
        );
        assert_eq!(doc.rows[0], strings(&["7", "apples", "3"]));
    }

    #[test]
    fn test_normalize_pads_and_truncates() {
        let doc = TableDocument::from_parts(
            strings(&["a", "b"]),
            vec![50, 50],
            vec![strings(&["1", "x"]), strings(&["2", "x", "y", "stray"])],
        );
        assert_eq!(doc.rows[0], strings(&["1", "x", ""]));
        assert_eq!(doc.rows[1], strings(&["2", "x", "y"]));
    }

    #[test]
    fn test_add_row_assigns_next_identifier() {
        let mut doc = TableDocument::from_parts(
            strings(&["a", "b"]),
            vec![50, 50],
            vec![strings(&["1", "x", "y"])],
        );
        let index = doc.add_row();
        assert_eq!(index, 1);
        assert_eq!(doc.rows[1], strings(&["2", "", ""]));
        assert!(doc.dirty);
    }

    #[test]
    fn test_set_row_cells_keeps_identifier() {
        let mut doc = TableDocument::from_parts(
            strings(&["a", "b"]),
            vec![50, 50],
            vec![strings(&["1", "x", "y"])],
        );
        doc.set_row_cells(0, strings(&["new", "cells"]));
        assert_eq!(doc.rows[0], strings(&["1", "new", "cells"]));
    }

    #[test]
    fn test_apply_header_renormalizes_rows() {
        let mut doc = TableDocument::from_parts(
            strings(&["a", "b", "c"]),
            vec![40, 30, 30],
            vec![strings(&["1", "x", "y", "z"])],
        );
        doc.apply_header(strings(&["a", "b"]), vec![50, 50]);
        // Shrinking the header silently drops the overflow field
        assert_eq!(doc.rows[0], strings(&["1", "x", "y"]));
    }

    #[test]
    fn test_clear_rows_keeps_layout() {
        let mut doc = TableDocument::from_parts(
            strings(&["a", "b"]),
            vec![50, 50],
            vec![strings(&["1", "x", "y"])],
        );
        doc.clear_rows();
        assert!(doc.rows.is_empty());
        assert_eq!(doc.widths, vec![50, 50]);
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("42"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("4a"));
        assert!(!is_identifier("apples"));
    }
}
