use crate::pattern::Entry;
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("Failed to read records file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse records file '{path}': {message}")]
    Syntax { path: String, message: String },
    #[error("Record #{index} in '{path}' is not an attribute map: {source}")]
    InvalidRecord {
        path: String,
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Load records from a JSON or JSON5 file
///
/// The file holds either a single object or an array of objects. Attribute
/// values are strings, numbers, booleans, or arrays of those.
pub fn load_records(path: &Path) -> Result<Vec<Entry>, RecordsError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| RecordsError::Read {
        path: path_display.clone(),
        source,
    })?;

    parse_records(&raw).map_err(|err| match err {
        RecordsError::Syntax { message, .. } => RecordsError::Syntax {
            path: path_display.clone(),
            message,
        },
        RecordsError::InvalidRecord { index, source, .. } => RecordsError::InvalidRecord {
            path: path_display.clone(),
            index,
            source,
        },
        other => other,
    })
}

/// Parse records from JSON or JSON5 text
pub fn parse_records(raw: &str) -> Result<Vec<Entry>, RecordsError> {
    let value = json5::from_str::<Value>(raw).map_err(|e| RecordsError::Syntax {
        path: String::new(),
        message: e.to_string(),
    })?;

    let items = match value {
        Value::Array(items) => items,
        other => vec![other],
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Entry>(item).map_err(|source| RecordsError::InvalidRecord {
                path: String::new(),
                index,
                source,
            })
        })
        .collect()
}
