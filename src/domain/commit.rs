//! Aggregation of the commits attached to a record.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use tracing::debug;

use crate::domain::{record::CommitEntry, text::normalize};

/// The only accepted commit timestamp layout.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// The commit-derived fields of a flat record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitSummary {
    /// Changed files of every commit, concatenated in input order.
    ///
    /// Duplicates are kept and nothing is sorted.
    pub files: Vec<String>,
    /// Hashes of the commits with a parseable timestamp, newest first.
    pub hashes: Vec<String>,
    /// Hash of the newest commit, or empty if no timestamp parsed.
    pub newest_hash: String,
    /// Author of the newest commit, or empty if no timestamp parsed.
    pub newest_author: String,
}

/// Parse a commit timestamp of the exact form `YYYY-MM-DDTHH:MM:SSZ`.
///
/// chrono's parser tolerates padding, signed years, unpadded fields and leap
/// seconds, so the parsed value must also format back to `raw` unchanged.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()?;
    let canonical = naive.nanosecond() == 0 && naive.format(TIMESTAMP_FORMAT).to_string() == raw;
    canonical.then(|| naive.and_utc())
}

/// Aggregate a record's commits.
///
/// Commits whose timestamp is missing or malformed still contribute their
/// files, but can never be ordered or become the newest commit. Ties between
/// identical timestamps keep their input order.
#[must_use]
pub fn aggregate(commits: &[CommitEntry]) -> CommitSummary {
    let files = commits
        .iter()
        .flat_map(|commit| commit.files.iter().cloned())
        .collect();

    let mut dated: Vec<(DateTime<Utc>, &CommitEntry)> = commits
        .iter()
        .filter_map(|commit| {
            let raw = commit.timestamp.as_deref().unwrap_or_default();
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                debug!(
                    hash = %commit.hash.as_deref().unwrap_or_default(),
                    timestamp = raw,
                    "excluding commit with unparseable timestamp from ordering"
                );
            }
            parsed.map(|instant| (instant, commit))
        })
        .collect();

    // `sort_by` is stable, so equal instants keep their input order.
    dated.sort_by(|(a, _), (b, _)| b.cmp(a));

    let hashes: Vec<String> = dated
        .iter()
        .map(|(_, commit)| commit.hash.clone().unwrap_or_default())
        .collect();

    let (newest_hash, newest_author) = dated
        .first()
        .map(|(_, commit)| {
            (
                commit.hash.clone().unwrap_or_default(),
                normalize(commit.author_name.as_deref()),
            )
        })
        .unwrap_or_default();

    CommitSummary {
        files,
        hashes,
        newest_hash,
        newest_author,
    }
}
