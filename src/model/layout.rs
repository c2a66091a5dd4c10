//! Column layout - percentage allocations and derived widths
//!
//! The file format stores one integer percentage per column; the table
//! view turns those into concrete cell widths for the current terminal
//! size. Percentages must sum to exactly 100 when committed from the
//! header dialog.

use std::fmt;

/// Fewer columns than this cannot be committed or removed down to
pub const MIN_COLUMNS: usize = 2;

/// Percentage a freshly added column starts with
const NEW_COLUMN_SIZE: &str = "5";

/// Errors from the header-edit workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Edited percentages do not sum to 100
    SumMismatch { actual: u32 },
    /// Removal would leave fewer than [`MIN_COLUMNS`] columns
    MinimumColumns,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::SumMismatch { actual } => {
                write!(f, "column sizes must add up to 100, currently {}", actual)
            }
            LayoutError::MinimumColumns => {
                write!(f, "at least {} columns must remain", MIN_COLUMNS)
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Derive per-column widths from percentage allocations
///
/// Each width is `total_width * p / 100` with integer truncation. The
/// widths can undershoot `total_width` by up to `columns - 1` cells; the
/// slack stays unallocated rather than being redistributed.
pub fn compute_widths(percentages: &[u16], total_width: u16) -> Vec<u16> {
    percentages
        .iter()
        .map(|p| (u32::from(total_width) * u32::from(*p) / 100) as u16)
        .collect()
}

/// Validate raw percentage inputs from the header dialog
///
/// Non-numeric entries count as zero towards the reported sum rather
/// than raising on their own; the hard failure happens here at commit
/// time. Succeeds only when every entry parses and the sum is exactly
/// 100.
pub fn validate_layout(raw: &[String]) -> Result<Vec<u16>, LayoutError> {
    let mut values = Vec::with_capacity(raw.len());
    let mut actual: u32 = 0;
    let mut all_numeric = true;

    for entry in raw {
        match entry.trim().parse::<u32>() {
            Ok(value) => {
                actual += value;
                values.push(value as u16);
            }
            Err(_) => all_numeric = false,
        }
    }

    if actual != 100 || !all_numeric {
        return Err(LayoutError::SumMismatch { actual });
    }

    Ok(values)
}

/// Edit set for the header dialog
///
/// Holds raw strings so malformed input round-trips for re-display when
/// validation fails. The table's own header and widths stay untouched
/// until [`HeaderEditor::commit`] succeeds.
#[derive(Debug, Clone)]
pub struct HeaderEditor {
    /// Column names under edit
    pub names: Vec<String>,
    /// Raw percentage strings under edit
    pub sizes: Vec<String>,
}

impl HeaderEditor {
    pub fn new(names: &[String], widths: &[u16]) -> Self {
        Self {
            names: names.to_vec(),
            sizes: widths.iter().map(|w| w.to_string()).collect(),
        }
    }

    pub fn column_count(&self) -> usize {
        self.names.len()
    }

    /// Append a new column with an empty name
    pub fn add_column(&mut self) {
        self.names.push(String::new());
        self.sizes.push(NEW_COLUMN_SIZE.to_string());
    }

    /// Drop the last column, refusing below the minimum
    pub fn remove_column(&mut self) -> Result<(), LayoutError> {
        if self.names.len() <= MIN_COLUMNS {
            return Err(LayoutError::MinimumColumns);
        }
        self.names.pop();
        self.sizes.pop();
        Ok(())
    }

    /// Validate and produce the final header names and layout
    pub fn commit(&self) -> Result<(Vec<String>, Vec<u16>), LayoutError> {
        let widths = validate_layout(&self.sizes)?;
        Ok((self.names.clone(), widths))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_compute_widths_exact_split() {
        assert_eq!(
            compute_widths(&[8, 30, 30, 16, 16], 1000),
            vec![80, 300, 300, 160, 160]
        );
    }

    #[test]
    fn test_compute_widths_truncates_without_redistribution() {
        // 3.3 + 3.3 + 3.4 floors to 3 + 3 + 3; the missing cell stays slack
        assert_eq!(compute_widths(&[33, 33, 34], 10), vec![3, 3, 3]);
    }

    #[test]
    fn test_compute_widths_zero_total() {
        assert_eq!(compute_widths(&[50, 50], 0), vec![0, 0]);
    }

    #[test]
    fn test_validate_layout_accepts_exact_hundred() {
        assert_eq!(validate_layout(&strings(&["50", "50"])), Ok(vec![50, 50]));
    }

    #[test]
    fn test_validate_layout_rejects_wrong_sum() {
        assert_eq!(
            validate_layout(&strings(&["50", "40"])),
            Err(LayoutError::SumMismatch { actual: 90 })
        );
    }

    #[test]
    fn test_validate_layout_treats_non_numeric_as_zero() {
        assert_eq!(
            validate_layout(&strings(&["abc", "100"])),
            Err(LayoutError::SumMismatch { actual: 100 })
        );
    }

    #[test]
    fn test_validate_layout_no_tolerance_band() {
        assert!(validate_layout(&strings(&["50", "51"])).is_err());
        assert!(validate_layout(&strings(&["50", "49"])).is_err());
    }

    #[test]
    fn test_header_editor_add_column() {
        let mut editor = HeaderEditor::new(&strings(&["a", "b"]), &[50, 50]);
        editor.add_column();
        assert_eq!(editor.names, strings(&["a", "b", ""]));
        assert_eq!(editor.sizes, strings(&["50", "50", "5"]));
    }

    #[test]
    fn test_header_editor_remove_column_floor() {
        let mut editor = HeaderEditor::new(&strings(&["a", "b", "c"]), &[40, 30, 30]);
        assert!(editor.remove_column().is_ok());
        assert_eq!(editor.column_count(), 2);

        // At the floor the edit set stays unchanged
        assert_eq!(editor.remove_column(), Err(LayoutError::MinimumColumns));
        assert_eq!(editor.names, strings(&["a", "b"]));
        assert_eq!(editor.sizes, strings(&["40", "30"]));
    }

    #[test]
    fn test_header_editor_commit_round_trip() {
        let editor = HeaderEditor::new(&strings(&["name", "date"]), &[70, 30]);
        let (names, widths) = editor.commit().expect("valid layout");
        assert_eq!(names, strings(&["name", "date"]));
        assert_eq!(widths, vec![70, 30]);
    }

    #[test]
    fn test_header_editor_rejected_commit_keeps_raw_input() {
        let mut editor = HeaderEditor::new(&strings(&["a", "b"]), &[50, 50]);
        editor.sizes[0] = "4x".to_string();
        assert_eq!(
            editor.commit(),
            Err(LayoutError::SumMismatch { actual: 50 })
        );
        // Malformed entry survives for re-display
        assert_eq!(editor.sizes[0], "4x");
    }
}
