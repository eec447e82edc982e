//! Issue and Pull-Request Flattening
//!
//! Issue and pull-request records, each with a discussion thread and a set of
//! commits, are flattened into fixed-width records ready for analysis, then
//! written out as a CSV table and as a borsh blob.

pub mod domain;
pub use domain::{
    Comment, CommitEntry, CommitSummary, Config, ConfigError, ExtractError, FlatRecord,
    RecordExtractor, Reference, ReferenceDetector, SourceRecord,
};

/// Loading the input collection and writing outputs.
pub mod storage;
pub use storage::{LoadError, PathError, Paths, RawRecord};

/// The end-to-end extraction run.
pub mod pipeline;
pub use pipeline::{Extraction, Pipeline, PipelineError, Report, Skipped};
