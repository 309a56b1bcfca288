//! Database query operations organized by entity

pub mod articles;
pub mod issues;
pub mod magazines;

// Re-export commonly used query functions
pub use articles::{
    create_article, delete_article, get_article, list_issue_articles, update_article,
};
pub use issues::{
    create_issue, delete_issue, find_issue_by_path, get_issue, list_issues, update_issue,
    update_issue_page_count,
};
pub use magazines::{
    create_magazine, delete_magazine, find_magazine_by_path, get_magazine, list_magazines,
};
