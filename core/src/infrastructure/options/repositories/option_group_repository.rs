use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::{debug, error};

use crate::domain::{
    common::entities::app_errors::CoreError,
    options::{
        ports::OptionGroupRepository,
        value_objects::{RawOptionGroupRow, RawOptionValueRow},
    },
};
use crate::infrastructure::schema_probe::{table_columns, table_exists};

/// Reader over the structured option tables. Deployments that predate the
/// option migration simply have no tables; that reads as zero rows, not as
/// an error.
#[derive(Debug, Clone)]
pub struct SqliteOptionGroupRepository {
    pub db: DatabaseConnection,
}

impl SqliteOptionGroupRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl OptionGroupRepository for SqliteOptionGroupRepository {
    async fn fetch_groups_for_item(
        &self,
        item_id: i64,
    ) -> Result<Vec<RawOptionGroupRow>, CoreError> {
        if !table_exists(&self.db, "item_options").await? {
            debug!("item_options table is absent; item {} has no structured groups", item_id);
            return Ok(Vec::new());
        }

        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            r#"SELECT id, item_id, name, type, required, min_select, max_select, sort_order
               FROM item_options
               WHERE item_id = ?
               ORDER BY sort_order, id"#,
            [item_id.into()],
        );
        let rows = self.db.query_all(stmt).await.map_err(|e| {
            error!("Failed to fetch option groups for item {}: {}", item_id, e);
            CoreError::InternalServerError
        })?;

        rows.iter()
            .map(|row| {
                Ok(RawOptionGroupRow {
                    id: row.try_get::<i64>("", "id").map_err(|e| {
                        error!("Malformed option group row: {}", e);
                        CoreError::InternalServerError
                    })?,
                    item_id: row.try_get::<i64>("", "item_id").map_err(|e| {
                        error!("Malformed option group row: {}", e);
                        CoreError::InternalServerError
                    })?,
                    name: row.try_get::<String>("", "name").map_err(|e| {
                        error!("Malformed option group row: {}", e);
                        CoreError::InternalServerError
                    })?,
                    kind: row
                        .try_get::<String>("", "type")
                        .unwrap_or_else(|_| "choice".to_string()),
                    required: row
                        .try_get::<i64>("", "required")
                        .map(|flag| flag != 0)
                        .unwrap_or(false),
                    min_select: row.try_get::<i64>("", "min_select").unwrap_or(0),
                    max_select: row.try_get::<i64>("", "max_select").unwrap_or(0),
                    sort_order: row.try_get::<i64>("", "sort_order").unwrap_or(0),
                })
            })
            .collect()
    }

    async fn fetch_values_for_item(
        &self,
        item_id: i64,
    ) -> Result<Vec<RawOptionValueRow>, CoreError> {
        if !table_exists(&self.db, "item_option_values").await?
            || !table_exists(&self.db, "item_options").await?
        {
            return Ok(Vec::new());
        }

        // A label column only exists on migrated stores.
        let has_label = table_columns(&self.db, "item_option_values")
            .await?
            .iter()
            .any(|c| c == "label");
        let label_column = if has_label { ", v.label" } else { "" };

        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!(
                "SELECT v.option_id, v.name, v.enabled, v.sort_order{label_column} \
                 FROM item_option_values v \
                 INNER JOIN item_options o ON o.id = v.option_id \
                 WHERE o.item_id = ? \
                 ORDER BY v.sort_order, v.name"
            ),
            [item_id.into()],
        );
        let rows = self.db.query_all(stmt).await.map_err(|e| {
            error!("Failed to fetch option values for item {}: {}", item_id, e);
            CoreError::InternalServerError
        })?;

        rows.iter()
            .map(|row| {
                Ok(RawOptionValueRow {
                    option_id: row.try_get::<i64>("", "option_id").map_err(|e| {
                        error!("Malformed option value row: {}", e);
                        CoreError::InternalServerError
                    })?,
                    name: row.try_get::<String>("", "name").map_err(|e| {
                        error!("Malformed option value row: {}", e);
                        CoreError::InternalServerError
                    })?,
                    label: row.try_get::<Option<String>>("", "label").ok().flatten(),
                    enabled: row
                        .try_get::<i64>("", "enabled")
                        .map(|flag| flag != 0)
                        .unwrap_or(false),
                    sort_order: row.try_get::<i64>("", "sort_order").unwrap_or(0),
                })
            })
            .collect()
    }
}
