//! Table file loading and saving
//!
//! The on-disk format is CSV with two header rows: row 1 carries the
//! column names, row 2 the width percentages, everything after is data.
//! The synthesized identifier column is never written out.

use crate::model::TableDocument;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Load and parse a size-hinted CSV file
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<TableDocument> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut records: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("Failed to read {}", path.display()))?;
        let fields: Vec<String> = record.iter().map(|f| f.to_string()).collect();
        // Skip blank lines, but keep rows of genuinely empty fields
        if fields.is_empty() || (fields.len() == 1 && fields[0].is_empty()) {
            continue;
        }
        records.push(fields);
    }

    if records.len() < 2 {
        bail!("{}: expected a header row and a width row", path.display());
    }

    let headers = records.remove(0);
    let width_row = records.remove(0);

    if width_row.len() != headers.len() {
        bail!(
            "{}: width row has {} entries for {} columns",
            path.display(),
            width_row.len(),
            headers.len()
        );
    }

    let mut widths = Vec::with_capacity(width_row.len());
    for field in &width_row {
        let width: u16 = field
            .trim()
            .parse()
            .with_context(|| format!("{}: invalid column width '{}'", path.display(), field))?;
        widths.push(width);
    }

    let mut doc = TableDocument::from_parts(headers, widths, records);
    doc.path = Some(path.to_path_buf());
    Ok(doc)
}

/// Write the table back to disk, stripping the identifier column
pub fn save_table(doc: &TableDocument, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(&doc.headers)?;
    writer.write_record(doc.widths.iter().map(|w| w.to_string()))?;
    for row in &doc.rows {
        writer.write_record(row.get(1..).unwrap_or(&[]))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Append `.csv` when the user typed a bare file name
pub fn ensure_csv_extension(input: &str) -> PathBuf {
    if input.to_lowercase().ends_with(".csv") {
        PathBuf::from(input)
    } else {
        PathBuf::from(format!("{}.csv", input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_table_with_identifiers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "t.csv", "name,qty\n60,40\n1,apples,3\n2,pears,1\n");

        let doc = load_table(&path).unwrap();
        assert_eq!(doc.headers, vec!["name", "qty"]);
        assert_eq!(doc.widths, vec![60, 40]);
        assert_eq!(doc.rows.len(), 2);
        assert_eq!(doc.rows[0], vec!["1", "apples", "3"]);
    }

    #[test]
    fn test_load_table_synthesizes_identifiers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "t.csv", "name,qty\n60,40\napples,3\npears,1\n");

        let doc = load_table(&path).unwrap();
        assert_eq!(doc.rows[0], vec!["1", "apples", "3"]);
        assert_eq!(doc.rows[1], vec!["2", "pears", "1"]);
    }

    #[test]
    fn test_load_table_pads_and_truncates_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "t.csv", "a,b\n50,50\n1,x\n2,x,y,stray\n");

        let doc = load_table(&path).unwrap();
        assert_eq!(doc.rows[0], vec!["1", "x", ""]);
        assert_eq!(doc.rows[1], vec!["2", "x", "y"]);
    }

    #[test]
    fn test_load_table_rejects_non_integer_width() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "t.csv", "a,b\n50,wide\n1,x,y\n");
        assert!(load_table(&path).is_err());
    }

    #[test]
    fn test_load_table_rejects_missing_width_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "t.csv", "a,b\n");
        assert!(load_table(&path).is_err());
    }

    #[test]
    fn test_round_trip_preserves_headers_and_widths() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "t.csv", "name,date,note\n40,30,30\nmilk,02.05.25,dairy\n");

        let doc = load_table(&path).unwrap();
        let out = dir.path().join("out.csv");
        save_table(&doc, &out).unwrap();

        let reloaded = load_table(&out).unwrap();
        assert_eq!(reloaded.headers, doc.headers);
        assert_eq!(reloaded.widths, doc.widths);
        assert_eq!(reloaded.rows, doc.rows);
    }

    #[test]
    fn test_save_strips_identifier_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "t.csv", "a,b\n50,50\nx,y\n");

        let doc = load_table(&path).unwrap();
        let out = dir.path().join("out.csv");
        save_table(&doc, &out).unwrap();

        let written = fs::read_to_string(&out).unwrap();
        assert_eq!(written, "a,b\n50,50\nx,y\n");
    }

    #[test]
    fn test_ensure_csv_extension() {
        assert_eq!(ensure_csv_extension("list"), PathBuf::from("list.csv"));
        assert_eq!(ensure_csv_extension("list.csv"), PathBuf::from("list.csv"));
        assert_eq!(ensure_csv_extension("list.CSV"), PathBuf::from("list.CSV"));
    }
}
