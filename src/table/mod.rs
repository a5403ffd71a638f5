use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::path::Path;

use crate::codec;

/// One record of column name to cell value pairs, preserving insertion order.
pub type Row = IndexMap<String, String>;

/// Default file name used when no file was ever opened.
pub const DEFAULT_EXPORT_NAME: &str = "data.csv";

/// The ordered rows currently loaded in the session, plus the source file
/// name and a modified flag.
pub struct Table {
    rows: Vec<Row>,
    file_name: Option<String>,
    is_modified: bool,
}

impl Table {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            file_name: None,
            is_modified: false,
        }
    }

    /// Replaces all rows wholesale. Callers reset any selection state.
    pub fn load_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.is_modified = false;
    }

    /// Sets a cell, creating the column key if the row lacked it. Rows may
    /// carry different key sets. Out-of-range `row` is a caller bug and
    /// panics.
    pub fn set_cell(&mut self, row: usize, column: &str, value: String) {
        let record = &mut self.rows[row];

        // Only set modified flag if value actually changes
        if record.get(column) != Some(&value) {
            record.insert(column.to_string(), value);
            self.is_modified = true;
        }
    }

    /// Appends a row with no keys to the end of the table.
    pub fn add_row(&mut self) {
        self.rows.push(Row::new());
        self.is_modified = true;
    }

    /// Removes the row at `row`, shifting later rows down by one.
    /// Out-of-range `row` is a caller bug and panics.
    pub fn delete_row(&mut self, row: usize) {
        self.rows.remove(row);
        self.is_modified = true;
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in display order: the key set of row 0, or empty when
    /// the table is empty. Keys present only on later rows do not appear.
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        match self.rows.first() {
            Some(row) => row.keys().cloned().collect(),
            None => Vec::new(),
        }
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, IndexMap::len)
    }

    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn set_file_name(&mut self, name: String) {
        self.file_name = Some(name);
    }

    /// The default destination for a write: the source file name, or
    /// `data.csv` when none was ever set.
    #[must_use]
    pub fn export_name(&self) -> String {
        self.file_name
            .clone()
            .unwrap_or_else(|| DEFAULT_EXPORT_NAME.to_string())
    }

    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.is_modified = modified;
    }

    /// Encodes the rows as CSV and writes them to `path`, clearing the
    /// modified flag on success.
    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        let text = codec::encode(&self.rows)?;

        std::fs::write(path, text)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        self.is_modified = false;
        Ok(())
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sample_table() -> Table {
        let mut table = Table::new();
        table.load_rows(vec![
            row(&[("name", "Alice"), ("age", "30")]),
            row(&[("name", "Bob"), ("age", "25")]),
        ]);
        table
    }

    #[test]
    fn new_table_is_empty_and_unmodified() {
        let table = Table::new();
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
        assert!(!table.is_modified());
    }

    #[test]
    fn load_rows_replaces_everything_and_clears_modified() {
        let mut table = sample_table();
        table.set_cell(0, "name", "Carol".to_string());
        assert!(table.is_modified());

        table.load_rows(vec![row(&[("x", "1")])]);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.columns(), vec!["x"]);
        assert!(!table.is_modified());
    }

    #[test]
    fn set_cell_is_idempotent() {
        let mut table = sample_table();
        table.set_cell(0, "age", "31".to_string());
        let after_once: Vec<Row> = table.rows().to_vec();

        table.set_modified(false);
        table.set_cell(0, "age", "31".to_string());
        assert_eq!(table.rows(), after_once.as_slice());
        assert!(!table.is_modified());
    }

    #[test]
    fn set_cell_creates_missing_column_key() {
        let mut table = sample_table();
        table.set_cell(1, "city", "Oslo".to_string());
        assert_eq!(table.cell(1, "city"), Some("Oslo"));
        // Header still comes from row 0, which lacks the new key
        assert_eq!(table.columns(), vec!["name", "age"]);
    }

    #[test]
    #[should_panic]
    fn set_cell_out_of_range_panics() {
        let mut table = Table::new();
        table.set_cell(0, "name", "Alice".to_string());
    }

    #[test]
    fn add_row_appends_empty_row_then_set_cell_works() {
        let mut table = Table::new();
        table.add_row();
        assert_eq!(table.row_count(), 1);
        assert!(table.rows()[0].is_empty());

        table.set_cell(0, "x", "1".to_string());
        assert_eq!(table.cell(0, "x"), Some("1"));
        assert_eq!(table.columns(), vec!["x"]);
    }

    #[test]
    fn delete_row_shifts_later_rows_down() {
        let mut table = Table::new();
        table.load_rows(vec![
            row(&[("n", "0")]),
            row(&[("n", "1")]),
            row(&[("n", "2")]),
        ]);

        table.delete_row(1);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(0, "n"), Some("0"));
        assert_eq!(table.cell(1, "n"), Some("2"));
        assert!(table.is_modified());
    }

    #[test]
    fn export_name_defaults_to_data_csv() {
        let mut table = Table::new();
        assert_eq!(table.export_name(), "data.csv");

        table.set_file_name("people.csv".to_string());
        assert_eq!(table.export_name(), "people.csv");
    }

    #[test]
    fn save_to_writes_csv_and_clears_modified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut table = sample_table();
        table.set_cell(0, "age", "31".to_string());
        table.save_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "name,age\nAlice,31\nBob,25\n");
        assert!(!table.is_modified());
    }
}
