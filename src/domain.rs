//! Domain models and the extraction core.
//!
//! This module contains the input record types, the flat output schema, and
//! the components that map one onto the other: line-break normalization,
//! reference detection and commit aggregation.

/// Commit ordering and aggregation.
pub mod commit;
pub use commit::CommitSummary;

mod config;
pub use config::{Config, ConfigError};

/// Record extraction.
pub mod extract;
pub use extract::{ExtractError, RecordExtractor};

/// The flat output schema.
pub mod flat_record;
pub use flat_record::{FlatRecord, COLUMNS, LIST_DELIMITER};

/// Input record types.
pub mod record;
pub use record::{Comment, CommitEntry, SourceRecord};

/// Reference detection.
pub mod reference;
pub use reference::{Reference, ReferenceDetector};

/// Text normalization.
pub mod text;
