//! Magazine database operations

use crate::DbPool;
use kiosk_core::{AppError, Magazine, MagazineId, Timestamp};
use std::path::{Path, PathBuf};

/// Creates a new magazine keyed by its grouping path
pub async fn create_magazine(
    pool: &DbPool,
    series: &str,
    path: &Path,
) -> Result<Magazine, AppError> {
    let last_updated = Timestamp::now();

    let result = sqlx::query(
        r#"
        INSERT INTO magazines (series, path, last_updated)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(series)
    .bind(path.to_str())
    .bind(last_updated.as_millis())
    .execute(pool)
    .await
    .map_err(|e| AppError::database("Failed to create magazine", e))?;

    Ok(Magazine {
        id: MagazineId::from_raw(result.last_insert_rowid()),
        series: series.to_string(),
        path: path.to_path_buf(),
        last_updated,
    })
}

/// Finds a magazine by its unique grouping path
pub async fn find_magazine_by_path(
    pool: &DbPool,
    path: &Path,
) -> Result<Option<Magazine>, AppError> {
    let row = sqlx::query(
        "SELECT id, series, path, last_updated FROM magazines WHERE path = ?",
    )
    .bind(path.to_str())
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::database("Failed to fetch magazine by path", e))?;

    row.map(row_to_magazine).transpose()
}

/// Gets a magazine by ID
pub async fn get_magazine(pool: &DbPool, id: MagazineId) -> Result<Magazine, AppError> {
    let row = sqlx::query(
        "SELECT id, series, path, last_updated FROM magazines WHERE id = ?",
    )
    .bind(id.as_i64())
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::database("Failed to fetch magazine", e))?
    .ok_or_else(|| AppError::not_found("Magazine", id))?;

    row_to_magazine(row)
}

/// Lists all magazines, most recently updated first
pub async fn list_magazines(pool: &DbPool) -> Result<Vec<Magazine>, AppError> {
    let rows = sqlx::query(
        "SELECT id, series, path, last_updated FROM magazines ORDER BY last_updated DESC, id",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::database("Failed to list magazines", e))?;

    rows.into_iter().map(row_to_magazine).collect()
}

/// Deletes a magazine; its issues and their articles cascade
pub async fn delete_magazine(pool: &DbPool, id: MagazineId) -> Result<(), AppError> {
    sqlx::query("DELETE FROM magazines WHERE id = ?")
        .bind(id.as_i64())
        .execute(pool)
        .await
        .map_err(|e| AppError::database("Failed to delete magazine", e))?;

    Ok(())
}

/// Converts a database row to a Magazine
pub(crate) fn row_to_magazine(row: sqlx::sqlite::SqliteRow) -> Result<Magazine, AppError> {
    use sqlx::Row;

    let id: i64 = row
        .try_get("id")
        .map_err(|e| AppError::database("Missing magazine ID", e))?;

    let path_str: String = row
        .try_get("path")
        .map_err(|e| AppError::database("Missing magazine path", e))?;

    let last_updated_ms: i64 = row
        .try_get("last_updated")
        .map_err(|e| AppError::database("Missing last updated", e))?;

    Ok(Magazine {
        id: MagazineId::from_raw(id),
        series: row
            .try_get("series")
            .map_err(|e| AppError::database("Missing series", e))?,
        path: PathBuf::from(path_str),
        last_updated: Timestamp::from_millis(last_updated_ms),
    })
}
