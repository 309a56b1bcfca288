//! Magazine, Issue and Article domain models

use crate::types::Timestamp;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

macro_rules! numeric_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database id
            pub fn from_raw(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw database id
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id! {
    /// Unique identifier for a magazine (SQLite AUTOINCREMENT)
    MagazineId
}

numeric_id! {
    /// Unique identifier for an issue (SQLite AUTOINCREMENT)
    IssueId
}

numeric_id! {
    /// Unique identifier for an article (SQLite AUTOINCREMENT)
    ArticleId
}

/// A series-level grouping of issues, keyed by a unique filesystem path.
///
/// The path is either a real directory grouping the magazine's issues, or a
/// synthesized virtual path for standalone archives found at the library
/// root. Once assigned, the path key never changes; magazines are never
/// deleted by the scanner itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Magazine {
    pub id: MagazineId,
    /// Display title / series name
    pub series: String,
    /// Unique grouping path (real or virtual)
    pub path: PathBuf,
    pub last_updated: Timestamp,
}

/// One scanned unit: an archive file or an image-bearing folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    pub magazine_id: MagazineId,
    pub title: Option<String>,
    pub volume: Option<i64>,
    /// Kept as text: labels like "Special" are legal issue numbers
    pub issue_number: Option<String>,
    pub file_name: String,
    /// Globally unique source path; the scanner's idempotency key
    pub file_path: PathBuf,
    /// Count of recognized image entries at scan time
    pub page_count: i64,
    /// Custom cover override path, if a user set one
    pub cover: Option<PathBuf>,
    pub added_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

impl Issue {
    /// Returns true if `page` is a valid page index for this issue
    pub fn has_page(&self, page: usize) -> bool {
        (page as i64) < self.page_count
    }
}

/// Field set for inserting a new issue row during a scan.
#[derive(Debug, Clone)]
pub struct NewIssue {
    pub magazine_id: MagazineId,
    pub title: Option<String>,
    pub volume: Option<i64>,
    pub issue_number: Option<String>,
    pub file_name: String,
    pub file_path: PathBuf,
    pub page_count: i64,
}

/// An optional named sub-range of pages within one issue.
///
/// Articles are created by catalog editors, never by the scanner. Page
/// ranges are inclusive on both ends; `end_page` of `None` means a
/// single-page article. Ranges are not validated against the issue's page
/// count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub issue_id: IssueId,
    pub title: String,
    pub content: Option<String>,
    /// First page of the article, inclusive
    pub start_page: i64,
    /// Last page of the article, inclusive
    pub end_page: Option<i64>,
}

/// Field set for inserting a new article row.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub issue_id: IssueId,
    pub title: String,
    pub content: Option<String>,
    pub start_page: i64,
    pub end_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_issue(page_count: i64) -> Issue {
        Issue {
            id: IssueId::from_raw(1),
            magazine_id: MagazineId::from_raw(1),
            title: Some("Test Issue".to_string()),
            volume: Some(1),
            issue_number: Some("1".to_string()),
            file_name: "Test Issue #1.cbz".to_string(),
            file_path: PathBuf::from("/library/Test/Test Issue #1.cbz"),
            page_count,
            cover: None,
            added_at: Timestamp::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_has_page_bounds() {
        let issue = sample_issue(3);
        assert!(issue.has_page(0));
        assert!(issue.has_page(2));
        assert!(!issue.has_page(3));
        assert!(!issue.has_page(100));
    }

    #[test]
    fn test_has_page_empty_issue() {
        let issue = sample_issue(0);
        assert!(!issue.has_page(0));
    }

    #[test]
    fn test_id_roundtrip() {
        let id = IssueId::from_raw(99);
        assert_eq!(id.as_i64(), 99);
        assert_eq!(id, IssueId::from_raw(99));
    }

    #[test]
    fn test_issue_number_is_text() {
        let mut issue = sample_issue(1);
        issue.issue_number = Some("Special Edition".to_string());
        assert_eq!(issue.issue_number.as_deref(), Some("Special Edition"));
    }
}
