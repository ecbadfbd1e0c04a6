//! Pocket prediction tables.
//!
//! A prediction table is a comma-separated file whose first row names the
//! columns. Columns are padded with spaces by the predictor, so every header
//! and cell is trimmed. Known numeric columns become numbers, everything else
//! stays text. A single malformed row rejects the whole table.
//!
//! ```
//! use artifacts::pocket::{parse_table, PocketValue};
//!
//! let csv = "name  ,  rank,  score\npocket1,     1,  12.5\n";
//! let pockets = parse_table(csv.as_bytes()).unwrap();
//! assert_eq!(pockets[0].text("name"), Some("pocket1"));
//! assert_eq!(pockets[0].number("score"), Some(12.5));
//! assert_eq!(pockets[0].get("rank"), Some(&PocketValue::Number(1.0)));
//! ```

use std::io::Read;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{ArtifactError, Result};

/// Columns of the prediction schema that hold numbers.
pub const NUMERIC_COLUMNS: [&str; 8] = [
    "rank",
    "score",
    "probability",
    "sas_points",
    "surf_atoms",
    "center_x",
    "center_y",
    "center_z",
];

pub fn is_numeric_column(name: &str) -> bool {
    NUMERIC_COLUMNS.contains(&name)
}

/// One cell of a pocket record.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum PocketValue {
    Number(f64),
    Text(String),
}

/// One predicted pocket. Fields keep the column order of the table and
/// serialize as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pocket {
    fields: Vec<(String, PocketValue)>,
}

impl Pocket {
    pub fn get(&self, name: &str) -> Option<&PocketValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            PocketValue::Number(n) => Some(*n),
            PocketValue::Text(_) => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            PocketValue::Text(s) => Some(s),
            PocketValue::Number(_) => None,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &PocketValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Pocket {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Parses a prediction table from raw bytes.
///
/// Returns the pockets in row order. Fails with [`ArtifactError::Table`] on a
/// row whose column count differs from the header or whose numeric column does
/// not parse; I/O errors of `reader` surface as [`ArtifactError::Table`] too,
/// so callers that know the path should prefer [`parse_table_at`].
pub fn parse_table<R: Read>(reader: R) -> Result<Vec<Pocket>> {
    parse_rows(reader).map_err(|err| err.into_artifact_error(None))
}

/// [`parse_table`] with I/O failures attributed to `path`.
pub fn parse_table_at<R: Read>(reader: R, path: &std::path::Path) -> Result<Vec<Pocket>> {
    parse_rows(reader).map_err(|err| err.into_artifact_error(Some(path)))
}

enum TableError {
    Io(std::io::Error),
    Row { line: u64, message: String },
}

impl TableError {
    fn into_artifact_error(self, path: Option<&std::path::Path>) -> ArtifactError {
        match (self, path) {
            (TableError::Io(source), Some(path)) => ArtifactError::from_io(path, source),
            (TableError::Io(source), None) => ArtifactError::Table {
                line: 0,
                message: source.to_string(),
            },
            (TableError::Row { line, message }, _) => ArtifactError::Table { line, message },
        }
    }
}

impl From<csv::Error> for TableError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(source) => TableError::Io(source),
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => TableError::Row {
                line,
                message: format!("expected {expected_len} columns, found {len}"),
            },
            csv::ErrorKind::Utf8 { err, .. } => TableError::Row {
                line,
                message: format!("invalid UTF-8: {err}"),
            },
            other => TableError::Row {
                line,
                message: format!("{other:?}"),
            },
        }
    }
}

fn parse_rows<R: Read>(reader: R) -> std::result::Result<Vec<Pocket>, TableError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    let header: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let numeric: Vec<bool> = header.iter().map(|name| is_numeric_column(name)).collect();

    let mut pockets = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let mut fields = Vec::with_capacity(header.len());
        for ((name, cell), is_number) in header.iter().zip(row.iter()).zip(&numeric) {
            let value = if *is_number {
                let n = cell
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| TableError::Row {
                        line,
                        message: format!("column {name:?} expects a finite number, found {cell:?}"),
                    })?;
                PocketValue::Number(n)
            } else {
                PocketValue::Text(cell.to_string())
            };
            fields.push((name.clone(), value));
        }
        pockets.push(Pocket { fields });
    }
    Ok(pockets)
}
