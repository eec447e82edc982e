use borsh::{BorshDeserialize, BorshSerialize};

/// Delimiter used wherever a list is flattened into a single text cell.
pub const LIST_DELIMITER: &str = " | ";

/// Number of columns in the flat schema.
pub const COLUMN_COUNT: usize = 15;

/// Column names of the flat schema, in positional order.
///
/// This is the single canonical schema. The blob form uses the same field
/// order, but keeps list-typed fields as lists.
pub const COLUMNS: [&str; COLUMN_COUNT] = [
    "Row #",
    "identifier",
    "is_pull_request",
    "references",
    "keywords",
    "title",
    "body",
    "created_at",
    "closed_at",
    "submitter",
    "author_name",
    "comments",
    "files_changed",
    "commit_hashes",
    "newest_commit_hash",
];

/// The single-level projection of one issue or pull request.
///
/// Every field is empty when the source record lacks the data; extraction
/// never fails because optional data is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct FlatRecord {
    /// 1-based position of the record in the input collection.
    pub index: u64,
    /// The record's key in the input collection.
    pub identifier: String,
    /// Whether the record is a pull request, if the source says.
    pub is_pull_request: Option<bool>,
    /// Detected references, parallel to `keywords`.
    pub references: Vec<String>,
    /// The keyword that introduced each entry of `references`.
    pub keywords: Vec<String>,
    /// Normalized title.
    pub title: String,
    /// Normalized body.
    pub body: String,
    /// Creation timestamp, as given.
    pub created_at: String,
    /// Closure timestamp, as given.
    pub closed_at: String,
    /// Login of the user who opened the record.
    pub submitter: String,
    /// Author of the newest commit.
    pub author_name: String,
    /// Normalized comment bodies, in thread order.
    pub comments: Vec<String>,
    /// Files changed across all commits, in commit order.
    pub files_changed: Vec<String>,
    /// Commit hashes, newest first.
    pub commit_hashes: Vec<String>,
    /// Hash of the newest commit.
    pub newest_commit_hash: String,
}

impl FlatRecord {
    /// The comment bodies joined into one cell.
    #[must_use]
    pub fn joined_comments(&self) -> String {
        self.comments.join(LIST_DELIMITER)
    }

    /// The changed files joined into one cell.
    #[must_use]
    pub fn joined_files(&self) -> String {
        self.files_changed.join(LIST_DELIMITER)
    }

    /// The commit hashes joined into one cell.
    #[must_use]
    pub fn joined_hashes(&self) -> String {
        self.commit_hashes.join(LIST_DELIMITER)
    }

    /// The record as one row of text cells, in [`COLUMNS`] order.
    #[must_use]
    pub fn to_row(&self) -> [String; COLUMN_COUNT] {
        [
            self.index.to_string(),
            self.identifier.clone(),
            self.is_pull_request.map(|pr| pr.to_string()).unwrap_or_default(),
            self.references.join(LIST_DELIMITER),
            self.keywords.join(LIST_DELIMITER),
            self.title.clone(),
            self.body.clone(),
            self.created_at.clone(),
            self.closed_at.clone(),
            self.submitter.clone(),
            self.author_name.clone(),
            self.joined_comments(),
            self.joined_files(),
            self.joined_hashes(),
            self.newest_commit_hash.clone(),
        ]
    }
}
