//! Catalog facade over the query layer.
//!
//! Owns the connection pool and exposes the repository surface the rest of
//! the application works against. Components that need persistence receive a
//! `Catalog` (cloning is cheap, the pool is reference counted) instead of
//! reaching for a global connection.

use std::path::Path;

use kiosk_core::{
    AppError, Article, ArticleId, Issue, IssueId, Magazine, MagazineId, NewArticle, NewIssue,
};

use crate::connection::DbPool;
use crate::queries;

/// Repository handle for magazines, issues, and articles.
#[derive(Debug, Clone)]
pub struct Catalog {
    pool: DbPool,
}

impl Catalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    // Magazines

    pub async fn create_magazine(&self, series: &str, path: &Path) -> Result<Magazine, AppError> {
        queries::create_magazine(&self.pool, series, path).await
    }

    pub async fn find_magazine_by_path(&self, path: &Path) -> Result<Option<Magazine>, AppError> {
        queries::find_magazine_by_path(&self.pool, path).await
    }

    pub async fn get_magazine(&self, id: MagazineId) -> Result<Magazine, AppError> {
        queries::get_magazine(&self.pool, id).await
    }

    pub async fn list_magazines(&self) -> Result<Vec<Magazine>, AppError> {
        queries::list_magazines(&self.pool).await
    }

    pub async fn delete_magazine(&self, id: MagazineId) -> Result<(), AppError> {
        queries::delete_magazine(&self.pool, id).await
    }

    // Issues

    pub async fn create_issue(&self, new_issue: &NewIssue) -> Result<Issue, AppError> {
        queries::create_issue(&self.pool, new_issue).await
    }

    pub async fn find_issue_by_path(&self, path: &Path) -> Result<Option<Issue>, AppError> {
        queries::find_issue_by_path(&self.pool, path).await
    }

    pub async fn get_issue(&self, id: IssueId) -> Result<Issue, AppError> {
        queries::get_issue(&self.pool, id).await
    }

    pub async fn list_issues(&self, magazine_id: MagazineId) -> Result<Vec<Issue>, AppError> {
        queries::list_issues(&self.pool, magazine_id).await
    }

    pub async fn update_issue(&self, issue: &Issue) -> Result<(), AppError> {
        queries::update_issue(&self.pool, issue).await
    }

    pub async fn update_issue_page_count(&self, path: &Path, count: i64) -> Result<(), AppError> {
        queries::update_issue_page_count(&self.pool, path, count).await
    }

    pub async fn delete_issue(&self, id: IssueId) -> Result<(), AppError> {
        queries::delete_issue(&self.pool, id).await
    }

    // Articles

    pub async fn create_article(&self, new_article: &NewArticle) -> Result<Article, AppError> {
        queries::create_article(&self.pool, new_article).await
    }

    pub async fn get_article(&self, id: ArticleId) -> Result<Article, AppError> {
        queries::get_article(&self.pool, id).await
    }

    pub async fn list_issue_articles(&self, issue_id: IssueId) -> Result<Vec<Article>, AppError> {
        queries::list_issue_articles(&self.pool, issue_id).await
    }

    pub async fn update_article(&self, article: &Article) -> Result<(), AppError> {
        queries::update_article(&self.pool, article).await
    }

    pub async fn delete_article(&self, id: ArticleId) -> Result<(), AppError> {
        queries::delete_article(&self.pool, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::create_test_db;
    use crate::migrations::run_migrations;
    use std::path::PathBuf;

    async fn test_catalog() -> Catalog {
        let pool = create_test_db().await.expect("in-memory db");
        run_migrations(&pool).await.expect("migrations");
        Catalog::new(pool)
    }

    #[tokio::test]
    async fn facade_round_trip() {
        let catalog = test_catalog().await;

        let magazine = catalog
            .create_magazine("National Geographic", Path::new("/library/natgeo"))
            .await
            .unwrap();

        let new_issue = NewIssue {
            magazine_id: magazine.id,
            title: Some("National Geographic 2024-01".to_string()),
            volume: Some(245),
            issue_number: Some("1".to_string()),
            file_name: "natgeo-2024-01.cbz".to_string(),
            file_path: PathBuf::from("/library/natgeo/natgeo-2024-01.cbz"),
            page_count: 120,
        };
        let issue = catalog.create_issue(&new_issue).await.unwrap();

        let found = catalog
            .find_issue_by_path(Path::new("/library/natgeo/natgeo-2024-01.cbz"))
            .await
            .unwrap()
            .expect("issue should be found by path");
        assert_eq!(found.id, issue.id);
        assert_eq!(found.page_count, 120);

        let issues = catalog.list_issues(magazine.id).await.unwrap();
        assert_eq!(issues.len(), 1);

        catalog.delete_magazine(magazine.id).await.unwrap();
        let issues = catalog.list_issues(magazine.id).await.unwrap();
        assert!(issues.is_empty(), "cascade should remove issues");
    }

    #[tokio::test]
    async fn clone_shares_pool() {
        let catalog = test_catalog().await;
        let other = catalog.clone();

        catalog
            .create_magazine("Wired", Path::new("/library/wired"))
            .await
            .unwrap();

        let seen = other
            .find_magazine_by_path(Path::new("/library/wired"))
            .await
            .unwrap();
        assert!(seen.is_some());
    }
}
