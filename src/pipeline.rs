//! The end-to-end extraction run.
//!
//! A run loads the input collection, extracts one [`FlatRecord`] per record
//! in input order, and writes the resulting sequence once as a table and once
//! as a blob. A record that cannot be extracted is reported and skipped; it
//! never aborts the run. Failing to read the input or write an output does.

use std::io;

use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::{info, instrument, warn};

use crate::{
    domain::{Config, FlatRecord, RecordExtractor},
    storage::{blob, input, table, LoadError, Paths, RawRecord},
};

/// A record that was left out of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// The 1-based position the record had in the input.
    pub index: u64,
    /// The record's key in the input collection.
    pub identifier: String,
    /// Why the record could not be extracted.
    pub reason: String,
}

/// The outcome of extracting a whole collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Successfully extracted records, in input order.
    pub records: Vec<FlatRecord>,
    /// Records that were skipped, in input order.
    pub skipped: Vec<Skipped>,
}

/// A summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Where the run read from and wrote to.
    pub paths: Paths,
    /// Number of records in the input.
    pub loaded: usize,
    /// Number of rows written.
    pub extracted: usize,
    /// Records left out of the output.
    pub skipped: Vec<Skipped>,
}

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A configured keyword could not be turned into a pattern.
    #[error("invalid reference keyword")]
    Keyword(#[from] regex::Error),
    /// The input collection could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The table could not be written.
    #[error("failed to write table output")]
    Table(#[from] csv::Error),
    /// The blob could not be written.
    #[error("failed to write blob output")]
    Blob(#[source] io::Error),
}

/// Extracts collections of records according to a [`Config`].
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    extractor: RecordExtractor,
    parallel: bool,
}

impl Pipeline {
    /// Create a pipeline from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured keyword cannot be compiled.
    pub fn new(config: &Config) -> Result<Self, PipelineError> {
        Ok(Self {
            extractor: RecordExtractor::new(config.reference_detector()?),
            parallel: config.parallel,
        })
    }

    /// Extract every record, keeping input order.
    ///
    /// Each record's sequence index is its 1-based position in `records`,
    /// whether or not earlier records were skipped.
    #[instrument(skip_all, fields(records = records.len(), parallel = self.parallel))]
    pub fn extract_all(&self, records: Vec<RawRecord>) -> Extraction {
        let indexed: Vec<(u64, RawRecord)> = (1..).zip(records).collect();

        let extract = |(index, raw): (u64, RawRecord)| {
            self.extractor
                .extract_value(index, &raw.identifier, raw.value)
                .map_err(|error| Skipped {
                    index,
                    identifier: raw.identifier,
                    reason: error.to_string(),
                })
        };

        // indexed parallel iterators collect in input order
        let results: Vec<_> = if self.parallel {
            indexed.into_par_iter().map(extract).collect()
        } else {
            indexed.into_iter().map(extract).collect()
        };

        let mut extraction = Extraction::default();
        for result in results {
            match result {
                Ok(record) => extraction.records.push(record),
                Err(skipped) => {
                    warn!(
                        identifier = %skipped.identifier,
                        reason = %skipped.reason,
                        "skipping record"
                    );
                    extraction.skipped.push(skipped);
                }
            }
        }
        extraction
    }

    /// Run the pipeline: load, extract, and write both outputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be loaded or if either output
    /// cannot be written. Nothing is written if loading fails.
    #[instrument(skip(self))]
    pub fn run(&self, paths: &Paths) -> Result<Report, PipelineError> {
        let records = input::load(&paths.input)?;
        let loaded = records.len();

        let Extraction { records, skipped } = self.extract_all(records);

        table::save(&paths.table, &records)?;
        info!(path = %paths.table.display(), rows = records.len(), "wrote table");

        blob::save(&paths.blob, &records).map_err(PipelineError::Blob)?;
        info!(path = %paths.blob.display(), "wrote blob");

        Ok(Report {
            paths: paths.clone(),
            loaded,
            extracted: records.len(),
            skipped,
        })
    }
}

/// Load a blob written by a previous run.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn read_blob(paths: &Paths) -> io::Result<Vec<FlatRecord>> {
    blob::load(&paths.blob)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Pipeline;
    use crate::{domain::Config, storage::RawRecord};

    fn raw(identifier: &str, value: serde_json::Value) -> RawRecord {
        RawRecord {
            identifier: identifier.to_string(),
            value,
        }
    }

    fn collection() -> Vec<RawRecord> {
        vec![
            raw("100", json!({ "title": "first" })),
            raw("7", json!({ "title": "second", "comments": "oops" })),
            raw("55", json!({ "title": "third", "body": "fixes #1" })),
        ]
    }

    #[test]
    fn indices_follow_input_order_and_skips_leave_gaps() {
        let extraction = Pipeline::default().extract_all(collection());

        let rows: Vec<_> = extraction
            .records
            .iter()
            .map(|r| (r.index, r.identifier.as_str()))
            .collect();
        assert_eq!(rows, vec![(1, "100"), (3, "55")]);

        assert_eq!(extraction.skipped.len(), 1);
        assert_eq!(extraction.skipped[0].identifier, "7");
        assert_eq!(extraction.skipped[0].index, 2);
        assert!(extraction.skipped[0].reason.starts_with("unexpected record shape"));
    }

    #[test]
    fn parallel_matches_sequential() {
        let mut records = Vec::new();
        for i in 0..200 {
            let value = if i % 17 == 0 {
                json!({ "is_pr": "not a bool" })
            } else {
                json!({ "title": format!("record {i}"), "body": format!("closes #{i}") })
            };
            records.push(raw(&i.to_string(), value));
        }

        let sequential = Pipeline::default().extract_all(records.clone());

        let mut config = Config::default();
        config.parallel = true;
        let parallel = Pipeline::new(&config).unwrap().extract_all(records);

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn repeated_runs_are_stable() {
        let pipeline = Pipeline::default();
        assert_eq!(
            pipeline.extract_all(collection()),
            pipeline.extract_all(collection())
        );
    }
}
