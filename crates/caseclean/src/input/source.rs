//! Data source abstraction and metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// Parsed tabular data, owned fully in memory.
///
/// Cells are strings; a null cell is the empty string. Common NA
/// spellings in raw input are recognized by [`DataTable::is_null_value`].
/// Row order is significant and is preserved by every operation that
/// filters rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
    /// The delimiter used.
    pub delimiter: u8,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find the index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.column_index(name)?;
        Some(self.column_values(index).collect())
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Set a specific cell value. Out-of-bounds indices are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: String) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value;
        }
    }

    /// Append a new column filled with a default value, returning its index.
    pub fn add_column(&mut self, name: String, default: String) -> usize {
        self.headers.push(name);
        for row in &mut self.rows {
            row.push(default.clone());
        }
        self.headers.len() - 1
    }

    /// Keep only the rows whose mask entry is `true`, preserving order.
    ///
    /// The mask must be exactly one entry per row.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        debug_assert_eq!(keep.len(), self.rows.len());
        let mut index = 0;
        self.rows.retain(|_| {
            let kept = keep.get(index).copied().unwrap_or(true);
            index += 1;
            kept
        });
    }

    /// Count the null cells in a column.
    pub fn null_count(&self, index: usize) -> usize {
        self.column_values(index)
            .filter(|v| Self::is_null_value(v))
            .count()
    }

    /// Check if a value represents a missing/null value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("nil")
            || trimmed == "."
            || trimmed == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataTable {
        DataTable::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec!["1".to_string(), "x".to_string()],
                vec!["2".to_string(), "y".to_string()],
                vec!["3".to_string(), "z".to_string()],
            ],
            b',',
        )
    }

    #[test]
    fn test_column_index() {
        let table = sample();
        assert_eq!(table.column_index("b"), Some(1));
        assert_eq!(table.column_index("missing"), None);
    }

    #[test]
    fn test_set_and_get() {
        let mut table = sample();
        table.set(1, 0, "20".to_string());
        assert_eq!(table.get(1, 0), Some("20"));
        // Out of bounds is a no-op
        table.set(9, 0, "boom".to_string());
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_add_column() {
        let mut table = sample();
        let idx = table.add_column("c".to_string(), String::new());
        assert_eq!(idx, 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.get(0, 2), Some(""));
    }

    #[test]
    fn test_retain_rows_preserves_order() {
        let mut table = sample();
        table.retain_rows(&[true, false, true]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 0), Some("1"));
        assert_eq!(table.get(1, 0), Some("3"));
    }
}
