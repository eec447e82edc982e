//! Input records: one issue or pull request with its thread and commits.
//!
//! In the input file, comments and commits are stored as mappings keyed by a
//! stringified position (`{"0": {...}, "1": {...}}`). Here they become ordered
//! sequences; the mapping's iteration order is the sequence order and the
//! keys are discarded.

use std::{fmt, marker::PhantomData};

use serde::{
    de::{MapAccess, SeqAccess, Visitor},
    Deserialize, Deserializer,
};

/// One issue or pull request, as read from the input collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SourceRecord {
    /// The issue or pull request title.
    #[serde(default)]
    pub title: Option<String>,
    /// The free-text description.
    #[serde(default)]
    pub body: Option<String>,
    /// Whether this record is a pull request rather than an issue.
    #[serde(default, alias = "is_pull_request")]
    pub is_pr: Option<bool>,
    /// When the record was opened.
    #[serde(default)]
    pub created_at: Option<String>,
    /// When the record was closed, if it has been.
    #[serde(default)]
    pub closed_at: Option<String>,
    /// Login of the user who opened the record.
    #[serde(default, alias = "submitter")]
    pub userlogin: Option<String>,
    /// The discussion thread, in input order.
    #[serde(default, deserialize_with = "keyed_sequence")]
    pub comments: Vec<Comment>,
    /// The attached commits, in input order.
    #[serde(default, deserialize_with = "keyed_sequence")]
    pub commits: Vec<CommitEntry>,
}

/// A single comment in a record's thread.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Comment {
    /// Login of the comment author.
    #[serde(default, alias = "author")]
    pub userlogin: Option<String>,
    /// The comment text.
    #[serde(default)]
    pub body: Option<String>,
}

/// A commit attached to a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommitEntry {
    /// The commit hash.
    #[serde(default, alias = "sha", alias = "commit_hash")]
    pub hash: Option<String>,
    /// The commit author's name.
    #[serde(default, alias = "author")]
    pub author_name: Option<String>,
    /// ISO-8601 UTC timestamp, expected as `YYYY-MM-DDTHH:MM:SSZ`.
    #[serde(default, alias = "date", alias = "committed_at")]
    pub timestamp: Option<String>,
    /// Paths changed by the commit.
    #[serde(
        default,
        alias = "files_changed",
        deserialize_with = "nullable_list"
    )]
    pub files: Vec<String>,
}

/// Deserialize either a keyed mapping or a plain sequence into a `Vec`,
/// keeping iteration order. `null` is treated as empty.
fn keyed_sequence<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct KeyedSequence<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for KeyedSequence<T> {
        type Value = Vec<T>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a mapping or a sequence of entries")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or_default());
            while let Some((_, entry)) = map.next_entry::<serde::de::IgnoredAny, T>()? {
                entries.push(entry);
            }
            Ok(entries)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(seq.size_hint().unwrap_or_default());
            while let Some(entry) = seq.next_element()? {
                entries.push(entry);
            }
            Ok(entries)
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(KeyedSequence(PhantomData))
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
