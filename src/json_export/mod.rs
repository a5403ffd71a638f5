use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::table::Row;

pub fn serialize_to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize data to JSON")
}

/// Writes the rows as a pretty-printed JSON array of objects, preserving
/// column order within each object.
pub fn export_rows_json(rows: &[Row], path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;

    let json_string = serialize_to_json(&rows)?;

    file.write_all(json_string.as_bytes())
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    Ok(())
}

/// Default JSON destination derived from a CSV export name: the file stem
/// with a `.json` extension, in the current directory.
#[must_use]
pub fn default_json_path(export_name: &str) -> PathBuf {
    let stem = Path::new(export_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("export");

    PathBuf::from(format!("{stem}.json"))
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

    #[test]
    fn rows_serialize_as_ordered_objects() {
        let rows = vec![row(&[("name", "Alice"), ("age", "30")])];
        let json = serialize_to_json(&rows).unwrap();

        let name_pos = json.find("\"name\"").unwrap();
        let age_pos = json.find("\"age\"").unwrap();
        assert!(name_pos < age_pos);
    }

    #[test]
    fn empty_rows_serialize_as_empty_array() {
        let rows: Vec<Row> = Vec::new();
        assert_eq!(serialize_to_json(&rows).unwrap(), "[]");
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let rows = vec![row(&[("x", "1")])];

        export_rows_json(&rows, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"x\": \"1\""));
    }

    #[test]
    fn default_path_uses_file_stem() {
        assert_eq!(default_json_path("people.csv"), PathBuf::from("people.json"));
        assert_eq!(default_json_path("data.csv"), PathBuf::from("data.json"));
    }
}
