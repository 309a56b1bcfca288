//! Article database operations
//!
//! Articles are named page-ranges created by catalog editors, never by the
//! scanner. Ranges are deliberately not validated against the owning
//! issue's page count.

use crate::DbPool;
use kiosk_core::{AppError, Article, ArticleId, IssueId, NewArticle};

/// Creates a new article
pub async fn create_article(pool: &DbPool, new_article: &NewArticle) -> Result<Article, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO articles (issue_id, title, content, start_page, end_page)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(new_article.issue_id.as_i64())
    .bind(&new_article.title)
    .bind(&new_article.content)
    .bind(new_article.start_page)
    .bind(new_article.end_page)
    .execute(pool)
    .await
    .map_err(|e| AppError::database("Failed to create article", e))?;

    Ok(Article {
        id: ArticleId::from_raw(result.last_insert_rowid()),
        issue_id: new_article.issue_id,
        title: new_article.title.clone(),
        content: new_article.content.clone(),
        start_page: new_article.start_page,
        end_page: new_article.end_page,
    })
}

/// Gets an article by ID
pub async fn get_article(pool: &DbPool, id: ArticleId) -> Result<Article, AppError> {
    let row = sqlx::query(
        "SELECT id, issue_id, title, content, start_page, end_page FROM articles WHERE id = ?",
    )
    .bind(id.as_i64())
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::database("Failed to fetch article", e))?
    .ok_or_else(|| AppError::not_found("Article", id))?;

    row_to_article(row)
}

/// Lists all articles of an issue, ordered by start page
pub async fn list_issue_articles(
    pool: &DbPool,
    issue_id: IssueId,
) -> Result<Vec<Article>, AppError> {
    let rows = sqlx::query(
        r#"
        SELECT id, issue_id, title, content, start_page, end_page
        FROM articles
        WHERE issue_id = ?
        ORDER BY start_page, id
        "#,
    )
    .bind(issue_id.as_i64())
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::database("Failed to list articles", e))?;

    rows.into_iter().map(row_to_article).collect()
}

/// Updates an existing article
pub async fn update_article(pool: &DbPool, article: &Article) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE articles SET title = ?, content = ?, start_page = ?, end_page = ?
        WHERE id = ?
        "#,
    )
    .bind(&article.title)
    .bind(&article.content)
    .bind(article.start_page)
    .bind(article.end_page)
    .bind(article.id.as_i64())
    .execute(pool)
    .await
    .map_err(|e| AppError::database("Failed to update article", e))?;

    Ok(())
}

/// Deletes an article
pub async fn delete_article(pool: &DbPool, id: ArticleId) -> Result<(), AppError> {
    sqlx::query("DELETE FROM articles WHERE id = ?")
        .bind(id.as_i64())
        .execute(pool)
        .await
        .map_err(|e| AppError::database("Failed to delete article", e))?;

    Ok(())
}

/// Converts a database row to an Article
pub(crate) fn row_to_article(row: sqlx::sqlite::SqliteRow) -> Result<Article, AppError> {
    use sqlx::Row;

    let id: i64 = row
        .try_get("id")
        .map_err(|e| AppError::database("Missing article ID", e))?;
    let issue_id: i64 = row
        .try_get("issue_id")
        .map_err(|e| AppError::database("Missing issue ID", e))?;
    let start_page: i64 = row
        .try_get("start_page")
        .map_err(|e| AppError::database("Missing start page", e))?;

    Ok(Article {
        id: ArticleId::from_raw(id),
        issue_id: IssueId::from_raw(issue_id),
        title: row
            .try_get("title")
            .map_err(|e| AppError::database("Missing title", e))?,
        // Option decode so NULL stays None instead of the zero value
        content: row
            .try_get("content")
            .map_err(|e| AppError::database("Invalid content", e))?,
        start_page,
        end_page: row
            .try_get("end_page")
            .map_err(|e| AppError::database("Invalid end page", e))?,
    })
}
