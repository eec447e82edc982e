//! Output path derivation.
//!
//! Both outputs are named after the input file's stem:
//!
//! - `issues.json` → `issues.csv` and `issues.bin`
//! - `data/issues.yaml` with an output directory of `out` → `out/issues.csv`
//!   and `out/issues.bin`
//!
//! Without an explicit output directory, outputs are written next to the
//! input.

use std::path::{Path, PathBuf};

/// Extension of the delimited-table output.
pub const TABLE_EXTENSION: &str = "csv";

/// Extension of the aggregate blob output.
pub const BLOB_EXTENSION: &str = "bin";

/// The file locations used by one extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// The input collection.
    pub input: PathBuf,
    /// Where the delimited table is written.
    pub table: PathBuf,
    /// Where the aggregate blob is written.
    pub blob: PathBuf,
}

impl Paths {
    /// Derive output paths from the input path.
    ///
    /// # Errors
    ///
    /// Returns an error if the input path has no usable file stem, or if
    /// either output would land on the input itself (for example an input
    /// named `issues.csv` written next to itself).
    pub fn from_input(input: PathBuf, output_dir: Option<&Path>) -> Result<Self, PathError> {
        let stem = input
            .file_stem()
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| PathError::NoStem(input.clone()))?
            .to_owned();

        let dir = output_dir.map_or_else(
            || {
                input
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_default()
            },
            Path::to_path_buf,
        );

        // `with_extension` would clobber dotted stems such as `v1.2`.
        let output = |extension: &str| {
            let mut name = stem.clone();
            name.push(".");
            name.push(extension);
            dir.join(name)
        };

        let table = output(TABLE_EXTENSION);
        let blob = output(BLOB_EXTENSION);
        if table == input || blob == input {
            return Err(PathError::OutputOverwritesInput(input));
        }

        Ok(Self { input, table, blob })
    }
}

/// Errors that can occur when deriving output paths.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PathError {
    /// The input path does not name a file.
    #[error("input path has no file name to derive outputs from: {}", .0.display())]
    NoStem(PathBuf),
    /// One of the derived outputs is the input file.
    #[error("output would overwrite the input file: {}", .0.display())]
    OutputOverwritesInput(PathBuf),
}
