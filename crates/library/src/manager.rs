use crate::error::LibraryResult;
use crate::resolver::PageResolver;
use crate::scanner::{LibraryScanner, ScanSummary};
pub use crate::LibraryConfig;
use kiosk_core::{Article, Issue, IssueId, Magazine, MagazineId};
use kiosk_database::{
    connection::{connect, DatabaseConfig},
    migrations::run_migrations,
    Catalog,
};
use kiosk_formats::PageImage;
use log::info;
use serde::Serialize;
use std::path::Path;

/// Library statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    pub magazine_count: usize,
    pub issue_count: usize,
    pub total_pages: i64,
}

/// High-level library management
pub struct LibraryManager {
    catalog: Catalog,
    config: LibraryConfig,
    scanner: LibraryScanner,
    resolver: PageResolver,
}

impl LibraryManager {
    /// Create a new library manager
    pub async fn new(config: LibraryConfig) -> LibraryResult<Self> {
        info!(
            "Initializing library with database: {}",
            config.database_path
        );

        // Connect to database
        let db_config = DatabaseConfig::new(&config.database_path);
        let pool = connect(db_config).await?;

        // Run migrations
        run_migrations(&pool).await?;

        let catalog = Catalog::new(pool);
        let scanner = LibraryScanner::new(catalog.clone());
        let resolver = PageResolver::new(catalog.clone());

        Ok(Self {
            catalog,
            config,
            scanner,
            resolver,
        })
    }

    /// Scan the configured library root and reconcile it into the catalog
    pub async fn scan(&self) -> LibraryResult<ScanSummary> {
        self.scanner.scan(Path::new(&self.config.library_root)).await
    }

    /// Resolve one page of an issue to image bytes
    pub async fn resolve_page(
        &self,
        issue_id: IssueId,
        page_index: usize,
    ) -> LibraryResult<Option<PageImage>> {
        self.resolver.resolve(issue_id, page_index).await
    }

    /// Get all magazines in the library
    pub async fn list_magazines(&self) -> LibraryResult<Vec<Magazine>> {
        Ok(self.catalog.list_magazines().await?)
    }

    /// Get all issues of a magazine
    pub async fn list_issues(&self, magazine_id: MagazineId) -> LibraryResult<Vec<Issue>> {
        Ok(self.catalog.list_issues(magazine_id).await?)
    }

    /// Get a specific issue by ID
    pub async fn get_issue(&self, id: IssueId) -> LibraryResult<Issue> {
        Ok(self.catalog.get_issue(id).await?)
    }

    /// Update an issue's editable fields
    pub async fn update_issue(&self, issue: &Issue) -> LibraryResult<()> {
        Ok(self.catalog.update_issue(issue).await?)
    }

    /// Delete a magazine and, by cascade, its issues and articles
    pub async fn delete_magazine(&self, id: MagazineId) -> LibraryResult<()> {
        Ok(self.catalog.delete_magazine(id).await?)
    }

    /// Delete a single issue
    pub async fn delete_issue(&self, id: IssueId) -> LibraryResult<()> {
        Ok(self.catalog.delete_issue(id).await?)
    }

    /// Get all articles of an issue
    pub async fn list_issue_articles(&self, issue_id: IssueId) -> LibraryResult<Vec<Article>> {
        Ok(self.catalog.list_issue_articles(issue_id).await?)
    }

    /// Get library statistics
    pub async fn stats(&self) -> LibraryResult<LibraryStats> {
        let magazines = self.catalog.list_magazines().await?;
        let mut stats = LibraryStats {
            magazine_count: magazines.len(),
            ..Default::default()
        };

        for magazine in &magazines {
            let issues = self.catalog.list_issues(magazine.id).await?;
            stats.issue_count += issues.len();
            stats.total_pages += issues.iter().map(|i| i.page_count).sum::<i64>();
        }

        Ok(stats)
    }
}
