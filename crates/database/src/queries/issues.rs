//! Issue database operations

use crate::DbPool;
use kiosk_core::{AppError, Issue, IssueId, MagazineId, NewIssue, Timestamp};
use std::path::{Path, PathBuf};

/// Creates a new issue row from scan results
pub async fn create_issue(pool: &DbPool, new_issue: &NewIssue) -> Result<Issue, AppError> {
    let added_at = Timestamp::now();

    let result = sqlx::query(
        r#"
        INSERT INTO issues (
            magazine_id, title, volume, issue_number,
            file_name, file_path, page_count, added_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(new_issue.magazine_id.as_i64())
    .bind(&new_issue.title)
    .bind(new_issue.volume)
    .bind(&new_issue.issue_number)
    .bind(&new_issue.file_name)
    .bind(new_issue.file_path.to_str())
    .bind(new_issue.page_count)
    .bind(added_at.as_millis())
    .execute(pool)
    .await
    .map_err(|e| AppError::database("Failed to create issue", e))?;

    Ok(Issue {
        id: IssueId::from_raw(result.last_insert_rowid()),
        magazine_id: new_issue.magazine_id,
        title: new_issue.title.clone(),
        volume: new_issue.volume,
        issue_number: new_issue.issue_number.clone(),
        file_name: new_issue.file_name.clone(),
        file_path: new_issue.file_path.clone(),
        page_count: new_issue.page_count,
        cover: None,
        added_at,
        updated_at: None,
    })
}

/// Finds an issue by its unique source path (the scanner's idempotency key)
pub async fn find_issue_by_path(pool: &DbPool, path: &Path) -> Result<Option<Issue>, AppError> {
    let row = sqlx::query(
        r#"
        SELECT id, magazine_id, title, volume, issue_number,
               file_name, file_path, page_count, cover, added_at, updated_at
        FROM issues WHERE file_path = ?
        "#,
    )
    .bind(path.to_str())
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::database("Failed to fetch issue by path", e))?;

    row.map(row_to_issue).transpose()
}

/// Gets an issue by ID
pub async fn get_issue(pool: &DbPool, id: IssueId) -> Result<Issue, AppError> {
    let row = sqlx::query(
        r#"
        SELECT id, magazine_id, title, volume, issue_number,
               file_name, file_path, page_count, cover, added_at, updated_at
        FROM issues WHERE id = ?
        "#,
    )
    .bind(id.as_i64())
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::database("Failed to fetch issue", e))?
    .ok_or_else(|| AppError::not_found("Issue", id))?;

    row_to_issue(row)
}

/// Lists all issues belonging to a magazine
pub async fn list_issues(pool: &DbPool, magazine_id: MagazineId) -> Result<Vec<Issue>, AppError> {
    let rows = sqlx::query(
        r#"
        SELECT id, magazine_id, title, volume, issue_number,
               file_name, file_path, page_count, cover, added_at, updated_at
        FROM issues
        WHERE magazine_id = ?
        ORDER BY file_name, id
        "#,
    )
    .bind(magazine_id.as_i64())
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::database("Failed to list issues", e))?;

    rows.into_iter().map(row_to_issue).collect()
}

/// Updates an issue's editable fields, stamping `updated_at`
pub async fn update_issue(pool: &DbPool, issue: &Issue) -> Result<(), AppError> {
    let updated_at = Timestamp::now();

    sqlx::query(
        r#"
        UPDATE issues SET
            title = ?, volume = ?, issue_number = ?,
            page_count = ?, cover = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&issue.title)
    .bind(issue.volume)
    .bind(&issue.issue_number)
    .bind(issue.page_count)
    .bind(issue.cover.as_ref().and_then(|p| p.to_str()))
    .bind(updated_at.as_millis())
    .bind(issue.id.as_i64())
    .execute(pool)
    .await
    .map_err(|e| AppError::database("Failed to update issue", e))?;

    Ok(())
}

/// Overwrites the stored page count for an issue keyed by source path
pub async fn update_issue_page_count(
    pool: &DbPool,
    path: &Path,
    page_count: i64,
) -> Result<(), AppError> {
    sqlx::query("UPDATE issues SET page_count = ?, updated_at = ? WHERE file_path = ?")
        .bind(page_count)
        .bind(Timestamp::now().as_millis())
        .bind(path.to_str())
        .execute(pool)
        .await
        .map_err(|e| AppError::database("Failed to update issue page count", e))?;

    Ok(())
}

/// Deletes an issue from the catalog; the source file is left alone
pub async fn delete_issue(pool: &DbPool, id: IssueId) -> Result<(), AppError> {
    sqlx::query("DELETE FROM issues WHERE id = ?")
        .bind(id.as_i64())
        .execute(pool)
        .await
        .map_err(|e| AppError::database("Failed to delete issue", e))?;

    Ok(())
}

/// Converts a database row to an Issue
pub(crate) fn row_to_issue(row: sqlx::sqlite::SqliteRow) -> Result<Issue, AppError> {
    use sqlx::Row;

    let id: i64 = row
        .try_get("id")
        .map_err(|e| AppError::database("Missing issue ID", e))?;
    let magazine_id: i64 = row
        .try_get("magazine_id")
        .map_err(|e| AppError::database("Missing magazine ID", e))?;

    let file_path_str: String = row
        .try_get("file_path")
        .map_err(|e| AppError::database("Missing file path", e))?;
    let page_count: i64 = row
        .try_get("page_count")
        .map_err(|e| AppError::database("Missing page count", e))?;
    let added_at_ms: i64 = row
        .try_get("added_at")
        .map_err(|e| AppError::database("Missing added at", e))?;

    // Nullable columns must be decoded as Option; decoding them as the bare
    // type turns NULL into the type's zero value on SQLite.
    let cover_str: Option<String> = row
        .try_get("cover")
        .map_err(|e| AppError::database("Invalid cover", e))?;
    let updated_at_ms: Option<i64> = row
        .try_get("updated_at")
        .map_err(|e| AppError::database("Invalid updated at", e))?;

    Ok(Issue {
        id: IssueId::from_raw(id),
        magazine_id: MagazineId::from_raw(magazine_id),
        title: row
            .try_get("title")
            .map_err(|e| AppError::database("Invalid title", e))?,
        volume: row
            .try_get("volume")
            .map_err(|e| AppError::database("Invalid volume", e))?,
        issue_number: row
            .try_get("issue_number")
            .map_err(|e| AppError::database("Invalid issue number", e))?,
        file_name: row
            .try_get("file_name")
            .map_err(|e| AppError::database("Missing file name", e))?,
        file_path: PathBuf::from(file_path_str),
        page_count,
        cover: cover_str.map(PathBuf::from),
        added_at: Timestamp::from_millis(added_at_ms),
        updated_at: updated_at_ms.map(Timestamp::from_millis),
    })
}
