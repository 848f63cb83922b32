use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::ActiveValue::Set;
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError, preferences::ports::PreferenceRepository,
};
use crate::entity::user_preferences::{
    ActiveModel as PreferenceActiveModel, Column as PreferenceColumn, Entity as PreferenceEntity,
};

/// Current-representation store: one JSON document per user, replaced
/// wholesale on save so concurrent saves stay last-write-wins.
#[derive(Debug, Clone)]
pub struct SqlitePreferenceRepository {
    pub db: DatabaseConnection,
}

impl SqlitePreferenceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl PreferenceRepository for SqlitePreferenceRepository {
    async fn get_document(&self, user_id: i64) -> Result<Option<String>, CoreError> {
        let record = PreferenceEntity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to read preferences for user {}: {}", user_id, e);
                CoreError::InternalServerError
            })?;

        Ok(record.map(|model| model.filters_json))
    }

    async fn upsert_document(&self, user_id: i64, document: String) -> Result<(), CoreError> {
        PreferenceEntity::insert(PreferenceActiveModel {
            user_id: Set(user_id),
            filters_json: Set(document),
            updated_at: Set(Utc::now().to_rfc3339()),
        })
        .on_conflict(
            OnConflict::column(PreferenceColumn::UserId)
                .update_columns([PreferenceColumn::FiltersJson, PreferenceColumn::UpdatedAt])
                .to_owned(),
        )
        .exec(&self.db)
        .await
        .map_err(|e| {
            error!("Failed to upsert preferences for user {}: {}", user_id, e);
            CoreError::InternalServerError
        })?;

        Ok(())
    }
}
