pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use types::{
    Article, ArticleId, Issue, IssueId, Magazine, MagazineId, NewArticle, NewIssue, Timestamp,
};
