use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::error;

use crate::domain::common::entities::app_errors::CoreError;

/// Whether a table exists in the connected SQLite database.
pub async fn table_exists(db: &DatabaseConnection, table: &str) -> Result<bool, CoreError> {
    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        r#"SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ? LIMIT 1"#,
        [table.into()],
    );

    let row = db.query_one(stmt).await.map_err(|e| {
        error!("Failed to probe for table {}: {}", table, e);
        CoreError::InternalServerError
    })?;

    Ok(row.is_some())
}

/// Column names of a table, or empty when the table cannot be inspected.
/// PRAGMA does not take bound parameters, so the identifier is quoted
/// inline.
pub async fn table_columns(db: &DatabaseConnection, table: &str) -> Result<Vec<String>, CoreError> {
    if !table_exists(db, table).await? {
        return Ok(Vec::new());
    }

    let identifier = table.replace('"', "\"\"");
    let stmt = Statement::from_string(
        DatabaseBackend::Sqlite,
        format!(r#"PRAGMA table_info("{identifier}")"#),
    );

    let rows = db.query_all(stmt).await.map_err(|e| {
        error!("Failed to list columns of table {}: {}", table, e);
        CoreError::InternalServerError
    })?;

    Ok(rows
        .iter()
        .filter_map(|row| row.try_get::<String>("", "name").ok())
        .collect())
}
