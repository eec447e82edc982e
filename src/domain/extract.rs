//! Projection of a nested [`SourceRecord`] into a [`FlatRecord`].

use tracing::instrument;

use crate::domain::{
    commit::{self, CommitSummary},
    flat_record::FlatRecord,
    record::SourceRecord,
    reference::ReferenceDetector,
    text::normalize,
};

/// The reason a single record could not be extracted.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The record does not have the expected structure.
    #[error("unexpected record shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Turns source records into flat records.
#[derive(Debug, Clone, Default)]
pub struct RecordExtractor {
    detector: ReferenceDetector,
}

impl RecordExtractor {
    /// Create an extractor using the given reference detector.
    #[must_use]
    pub const fn new(detector: ReferenceDetector) -> Self {
        Self { detector }
    }

    /// Extract a flat record from a typed source record.
    ///
    /// This never fails: any missing field becomes an empty value.
    #[must_use]
    pub fn extract(&self, index: u64, identifier: &str, record: &SourceRecord) -> FlatRecord {
        let body = normalize(record.body.as_deref());
        let (references, keywords) = self.detector.detect_split(&body);

        let comments = record
            .comments
            .iter()
            .map(|comment| normalize(comment.body.as_deref()))
            .collect();

        let CommitSummary {
            files,
            hashes,
            newest_hash,
            newest_author,
        } = commit::aggregate(&record.commits);

        FlatRecord {
            index,
            identifier: identifier.to_string(),
            is_pull_request: record.is_pr,
            references,
            keywords,
            title: normalize(record.title.as_deref()),
            body,
            created_at: normalize(record.created_at.as_deref()),
            closed_at: normalize(record.closed_at.as_deref()),
            submitter: normalize(record.userlogin.as_deref()),
            author_name: newest_author,
            comments,
            files_changed: files,
            commit_hashes: hashes,
            newest_commit_hash: newest_hash,
        }
    }

    /// Extract a flat record from a raw, untyped record.
    ///
    /// # Errors
    ///
    /// Returns an error if the raw value does not have the shape of a
    /// [`SourceRecord`]. Callers are expected to report and skip such
    /// records rather than abort.
    #[instrument(level = "trace", skip(self, raw))]
    pub fn extract_value(
        &self,
        index: u64,
        identifier: &str,
        raw: serde_json::Value,
    ) -> Result<FlatRecord, ExtractError> {
        let record: SourceRecord = serde_json::from_value(raw)?;
        Ok(self.extract(index, identifier, &record))
    }
}
