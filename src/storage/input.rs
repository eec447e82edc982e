//! Loading the input collection.
//!
//! The input file holds a single mapping of record identifier to record. It
//! is read fully into memory, keeping the mapping's order, but the records
//! themselves are left untyped so that one malformed record cannot prevent
//! the others from being extracted.

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::instrument;

/// One entry of the input collection, not yet interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// The record's key in the input mapping.
    pub identifier: String,
    /// The record's contents.
    pub value: Value,
}

/// The encoding of an input file, inferred from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// JSON (the default for any extension other than YAML's).
    Json,
    /// YAML (`.yaml` or `.yml`).
    Yaml,
}

impl InputFormat {
    /// Infer the format from a file path.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Errors that can occur when loading the input collection.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The input file was not found.
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// An I/O error occurred.
    #[error("failed to read input file")]
    Io(#[from] io::Error),
    /// The file is not valid JSON.
    #[error("failed to parse input file as JSON")]
    Json(#[from] serde_json::Error),
    /// The file is not valid YAML.
    #[error("failed to parse input file as YAML")]
    Yaml(#[from] serde_yaml::Error),
    /// The top level of the file is not a mapping of identifier to record.
    #[error("expected a mapping of record identifiers to records, found {0}")]
    NotAMapping(&'static str),
}

/// Load every record from the file at `path`, in file order.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be read or parsed, or
/// if its top level is not a mapping.
#[instrument]
pub fn load(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let file = File::open(path).map_err(|io_error| match io_error.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io(io_error),
    })?;
    let reader = BufReader::new(file);

    let document: Value = match InputFormat::from_path(path) {
        InputFormat::Json => serde_json::from_reader(reader)?,
        InputFormat::Yaml => serde_yaml::from_reader(reader)?,
    };

    let records = into_records(document)?;
    tracing::info!(count = records.len(), "loaded input records");
    Ok(records)
}

/// Split a parsed document into its records.
///
/// # Errors
///
/// Returns an error if the document is not a mapping.
pub fn into_records(document: Value) -> Result<Vec<RawRecord>, LoadError> {
    match document {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(identifier, value)| RawRecord { identifier, value })
            .collect()),
        other => Err(LoadError::NotAMapping(kind_of(&other))),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}
