//! Keyword-adjacent cross-reference detection.
//!
//! A reference is introduced by one of a fixed, ordered vocabulary of
//! keywords ("closes", "fixes", ...) followed by a single space and either a
//! `#<digits>` issue number or a full GitHub issue/pull-request URL.

use regex::Regex;

/// The canonical reference-introducing vocabulary, in scan order.
pub const KEYWORDS: &[&str] = &[
    "closes",
    "fixes",
    "resolves",
    "in",
    "solves",
    "addresses",
    "completes",
    "connects",
    "related to",
    "reverts",
    "implements",
    "references",
    "incorporates",
    "updates",
    "handles",
    "patches",
    "adds",
    "modifies",
    "enhances",
    "improves",
    "adjusts",
];

const TARGET: &str = r"(#\d+|https://github\.com/[^\s/]+/[^\s/]+/(?:issues|pull)/\d+)";

/// A detected reference and the keyword that introduced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// The matched text, either `#<digits>` or a URL.
    pub text: String,
    /// The vocabulary keyword that triggered the match.
    pub keyword: String,
}

/// Scans text for references using an ordered keyword vocabulary.
#[derive(Debug, Clone)]
pub struct ReferenceDetector {
    patterns: Vec<(String, Regex)>,
}

impl Default for ReferenceDetector {
    fn default() -> Self {
        Self::new(KEYWORDS.iter().copied()).expect("canonical keywords always compile")
    }
}

impl ReferenceDetector {
    /// Build a detector for the given vocabulary.
    ///
    /// Keywords are matched literally and case-insensitively. The order of
    /// the vocabulary is the order in which matches are reported.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern cannot be compiled (for example, if a
    /// keyword is so long that the compiled regex exceeds the size limit).
    pub fn new<I, S>(keywords: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = keywords
            .into_iter()
            .map(|keyword| {
                let keyword = keyword.into();
                let pattern = format!("(?i){} {TARGET}", regex::escape(&keyword));
                Regex::new(&pattern).map(|regex| (keyword, regex))
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { patterns })
    }

    /// The vocabulary, in scan order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|(keyword, _)| keyword.as_str())
    }

    /// Find every reference in `body`.
    ///
    /// Results are grouped by keyword in vocabulary order, and within one
    /// keyword they appear in left-to-right order. The same literal reference
    /// is reported once per keyword that matches it.
    #[must_use]
    pub fn detect(&self, body: &str) -> Vec<Reference> {
        self.patterns
            .iter()
            .flat_map(|(keyword, regex)| {
                regex.captures_iter(body).map(move |captures| Reference {
                    text: captures[1].to_string(),
                    keyword: keyword.clone(),
                })
            })
            .collect()
    }

    /// Find every reference in `body`, split into parallel lists of matched
    /// text and triggering keyword.
    #[must_use]
    pub fn detect_split(&self, body: &str) -> (Vec<String>, Vec<String>) {
        self.detect(body)
            .into_iter()
            .map(|reference| (reference.text, reference.keyword))
            .unzip()
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::{ReferenceDetector, KEYWORDS};

    #[test]
    fn no_match_returns_empty_lists() {
        let detector = ReferenceDetector::default();
        let (references, keywords) = detector.detect_split("nothing to see here, #12 alone");

        assert!(references.is_empty());
        assert!(keywords.is_empty());
    }

    #[test]
    fn matches_follow_vocabulary_order() {
        let detector = ReferenceDetector::default();
        let (references, keywords) =
            detector.detect_split("fixes #12 and closes https://github.com/o/r/issues/34");

        assert_eq!(references, vec!["https://github.com/o/r/issues/34", "#12"]);
        assert_eq!(keywords, vec!["closes", "fixes"]);
    }

    #[test]
    fn matches_within_a_keyword_are_left_to_right() {
        let detector = ReferenceDetector::default();
        let (references, keywords) = detector.detect_split("fixes #1, fixes #2 and fixes #3");

        assert_eq!(references, vec!["#1", "#2", "#3"]);
        assert_eq!(keywords, vec!["fixes"; 3]);
    }

    #[test_case("Closes #7"; "capitalised")]
    #[test_case("CLOSES #7"; "upper case")]
    #[test_case("cLoSeS #7"; "mixed case")]
    fn keyword_match_is_case_insensitive(body: &str) {
        let detector = ReferenceDetector::default();
        let (references, keywords) = detector.detect_split(body);

        assert_eq!(references, vec!["#7"]);
        assert_eq!(keywords, vec!["closes"]);
    }

    #[test]
    fn multi_word_keyword() {
        let detector = ReferenceDetector::default();
        let (references, keywords) = detector.detect_split("this is related to #99");

        assert_eq!(references, vec!["#99"]);
        assert_eq!(keywords, vec!["related to"]);
    }

    #[test]
    fn pull_request_urls_are_references() {
        let detector = ReferenceDetector::default();
        let (references, _) = detector.detect_split("reverts https://github.com/o/r/pull/5");

        assert_eq!(references, vec!["https://github.com/o/r/pull/5"]);
    }

    #[test]
    fn keyword_requires_single_space_before_target() {
        let detector = ReferenceDetector::default();

        assert!(detector.detect("fixes: #12").is_empty());
        assert!(detector.detect("fixes  #12").is_empty());
        assert!(detector.detect("fixes #abc").is_empty());
        assert!(detector.detect("fixes https://example.com/o/r/issues/1").is_empty());
    }

    #[test]
    fn same_reference_is_reported_per_keyword() {
        // "within" ends in "in", so both "fixes" and "in" fire on separate
        // spans that point at the same issue.
        let detector = ReferenceDetector::default();
        let (references, keywords) = detector.detect_split("fixes #4, see within #4");

        assert_eq!(references, vec!["#4", "#4"]);
        assert_eq!(keywords, vec!["fixes", "in"]);
    }

    #[test]
    fn lists_always_have_equal_length() {
        let detector = ReferenceDetector::default();
        let body = "closes #1 fixes #2 resolves https://github.com/a/b/issues/3 in #4 adds #5";
        let (references, keywords) = detector.detect_split(body);

        assert_eq!(references.len(), keywords.len());
        assert_eq!(references.len(), 5);
    }

    #[test]
    fn custom_vocabulary_replaces_default() {
        let detector = ReferenceDetector::new(["supersedes"]).unwrap();

        assert_eq!(detector.keywords().collect::<Vec<_>>(), vec!["supersedes"]);
        assert!(detector.detect("fixes #1").is_empty());
        assert_eq!(detector.detect("supersedes #2")[0].text, "#2");
    }

    #[test]
    fn default_vocabulary_is_canonical() {
        let detector = ReferenceDetector::default();
        assert_eq!(detector.keywords().collect::<Vec<_>>(), KEYWORDS);
    }
}
