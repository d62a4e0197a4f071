//! Git commit types and operations

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Display format for commit dates, in the reader's local time zone
pub const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A commit as read from the repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The commit SHA (40 hex characters)
    pub sha: String,
    /// Full commit message
    pub message: String,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Authored timestamp
    pub timestamp: DateTime<Utc>,
}

impl Commit {
    /// Build a commit record from a libgit2 commit
    pub(crate) fn from_git2(git_commit: &git2::Commit<'_>) -> Self {
        let author = git_commit.author();
        let timestamp = DateTime::from_timestamp(author.when().seconds(), 0).unwrap_or_default();

        Self {
            sha: git_commit.id().to_string(),
            message: String::from_utf8_lossy(git_commit.message_bytes()).into_owned(),
            author: String::from_utf8_lossy(author.name_bytes()).into_owned(),
            author_email: String::from_utf8_lossy(author.email_bytes()).into_owned(),
            timestamp,
        }
    }

    /// Get the short SHA (first 7 characters)
    #[must_use]
    pub fn short_sha(&self) -> &str {
        &self.sha[..7.min(self.sha.len())]
    }

    /// Text before the first line break of the message
    #[must_use]
    pub fn subject(&self) -> &str {
        self.split_message().0
    }

    /// Text after the first line break, trimmed; `None` when nothing is left
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.split_message().1
    }

    /// Split the message into its summary line and optional detail body
    #[must_use]
    pub fn split_message(&self) -> (&str, Option<&str>) {
        match self.message.split_once('\n') {
            Some((summary, rest)) => {
                let detail = rest.trim();
                (
                    summary.strip_suffix('\r').unwrap_or(summary),
                    (!detail.is_empty()).then_some(detail),
                )
            }
            None => (self.message.as_str(), None),
        }
    }

    /// Authored time rendered in the local time zone
    #[must_use]
    pub fn local_timestamp(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format(LOCAL_TIME_FORMAT)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use similar_asserts::assert_eq;

    fn commit_with_message(message: &str) -> Commit {
        Commit {
            sha: "1945ab9c752534e733c38ba0109dc3b741f0a6eb".to_string(),
            message: message.to_string(),
            author: "Test Author".to_string(),
            author_email: "test@example.com".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 17, 2, 33, 6).unwrap(),
        }
    }

    #[test]
    fn test_commit_serialization_roundtrip() {
        let commit = commit_with_message("Fix bug\n\nDetails here");
        let json = serde_json::to_string(&commit).expect("serialize");
        let deserialized: Commit = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(commit, deserialized);
    }

    #[test]
    fn test_short_sha() {
        let commit = commit_with_message("x");
        assert_eq!(commit.short_sha(), "1945ab9");
    }

    #[test]
    fn test_split_summary_and_detail() {
        let commit = commit_with_message("Fix bug\n\nDetails here");
        assert_eq!(commit.split_message(), ("Fix bug", Some("Details here")));
    }

    #[test]
    fn test_split_single_line() {
        let commit = commit_with_message("Fix bug");
        assert_eq!(commit.split_message(), ("Fix bug", None));
    }

    #[test]
    fn test_split_trailing_newline_has_no_detail() {
        // Messages written by `git commit` end with a newline
        let commit = commit_with_message("Fix bug\n");
        assert_eq!(commit.subject(), "Fix bug");
        assert_eq!(commit.detail(), None);

        let commit = commit_with_message("Fix bug\n\n  \n");
        assert_eq!(commit.detail(), None);
    }

    #[test]
    fn test_split_keeps_inner_detail_lines() {
        let commit = commit_with_message("Summary\n\n  first\n\nsecond  \n");
        assert_eq!(commit.detail(), Some("first\n\nsecond"));
    }

    #[test]
    fn test_split_crlf_summary() {
        let commit = commit_with_message("Summary\r\n\r\nBody\r\n");
        assert_eq!(commit.split_message(), ("Summary", Some("Body")));
    }

    #[test]
    fn test_local_timestamp_format() {
        let commit = commit_with_message("x");
        let expected = commit
            .timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(commit.local_timestamp(), expected);
        assert_eq!(commit.local_timestamp().len(), 19);
    }
}
