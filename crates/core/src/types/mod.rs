//! Domain types for Kiosk
//!
//! - `catalog`: Magazine, Issue and Article models with their id newtypes
//! - `common`: shared time handling

mod catalog;
mod common;

// Re-export all public types
pub use catalog::{Article, ArticleId, Issue, IssueId, Magazine, MagazineId, NewArticle, NewIssue};
pub use common::Timestamp;
