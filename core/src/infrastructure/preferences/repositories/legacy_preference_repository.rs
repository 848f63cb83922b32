use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    preferences::{ports::LegacyPreferenceRepository, value_objects::LegacyPreferenceRow},
};
use crate::entity::{user_filter_proteins, user_filter_settings};
use crate::infrastructure::preferences::mappers::legacy_row_from_models;

/// Read-only view over the pre-document preference tables. Writes always go
/// to the current representation; this store only feeds the resolution
/// fallback.
#[derive(Debug, Clone)]
pub struct SqliteLegacyPreferenceRepository {
    pub db: DatabaseConnection,
}

impl SqliteLegacyPreferenceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl LegacyPreferenceRepository for SqliteLegacyPreferenceRepository {
    async fn get_record(&self, user_id: i64) -> Result<Option<LegacyPreferenceRow>, CoreError> {
        let settings = user_filter_settings::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to read legacy settings for user {}: {}", user_id, e);
                CoreError::InternalServerError
            })?;

        let protein_slugs = user_filter_proteins::Entity::find()
            .filter(user_filter_proteins::Column::UserId.eq(user_id))
            .order_by_asc(user_filter_proteins::Column::ProteinSlug)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to read legacy proteins for user {}: {}", user_id, e);
                CoreError::InternalServerError
            })?
            .into_iter()
            .map(|model| model.protein_slug)
            .collect();

        Ok(legacy_row_from_models(settings, protein_slugs))
    }
}
