use anyhow::Result;
use csv::ReaderBuilder;
use std::path::Path;
use thiserror::Error;

use crate::table::Row;

/// Failure kinds raised when input cannot be decoded into rows.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unable to read file: {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("file is not valid UTF-8: {path}")]
    Encoding { path: String },
    #[error("no header row found in input")]
    Empty,
    #[error("malformed CSV: {0}")]
    Malformed(#[from] csv::Error),
}

/// Result of a successful decode: the header columns in file order and the
/// data rows keyed by those columns.
pub struct Decoded {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// Decodes raw CSV text. The first record is the header; its fields become
/// the keys of every subsequent row. Short records leave keys absent and
/// fields beyond the header are ignored.
pub fn decode(raw: &str) -> Result<Decoded, ParseError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(raw.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    if headers.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = Row::new();
        for (name, field) in headers.iter().zip(record.iter()) {
            row.insert(name.clone(), field.to_string());
        }
        rows.push(row);
    }

    Ok(Decoded {
        columns: headers,
        rows,
    })
}

/// Reads and decodes a CSV file. I/O and encoding failures map to
/// `ParseError` so the open boundary has a single error channel.
pub fn decode_file(path: &Path) -> Result<Decoded, ParseError> {
    let bytes = std::fs::read(path).map_err(|source| ParseError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let text = std::str::from_utf8(&bytes).map_err(|_| ParseError::Encoding {
        path: path.display().to_string(),
    })?;

    decode(text)
}

/// Encodes rows back to CSV text. The header is the key set of the first
/// row; missing keys serialize as empty fields and keys absent from the
/// header are dropped. An empty table encodes to the empty string.
pub fn encode(rows: &[Row]) -> Result<String> {
    let Some(first) = rows.first() else {
        return Ok(String::new());
    };

    let columns: Vec<&String> = first.keys().collect();
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(&columns)?;
    for row in rows {
        let record: Vec<&str> = columns
            .iter()
            .map(|column| row.get(*column).map_or("", String::as_str))
            .collect();
        writer.write_record(&record)?;
    }

    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}
