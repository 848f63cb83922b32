use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::{debug, error};

use crate::domain::{
    catalog::{
        entities::{Course, Protein},
        ports::CatalogReadRepository,
        value_objects::{CatalogSchema, RawItemRow, RawProteinEdge},
    },
    common::entities::app_errors::CoreError,
};
use crate::infrastructure::schema_probe::{table_columns, table_exists};

/// Schema-adaptive reader over the catalog tables. Probes what the store
/// actually has before selecting, so old and new deployments are served by
/// the same queries.
#[derive(Debug, Clone)]
pub struct SqliteCatalogReadRepository {
    pub db: DatabaseConnection,
}

impl SqliteCatalogReadRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_lookup(&self, table: &str) -> Result<Vec<(i64, String, String)>, CoreError> {
        if !table_exists(&self.db, table).await? {
            debug!("lookup table {} is absent; serving an empty enumeration", table);
            return Ok(Vec::new());
        }

        let stmt = Statement::from_string(
            DatabaseBackend::Sqlite,
            format!("SELECT id, slug, label FROM {table} ORDER BY label"),
        );
        let rows = self.db.query_all(stmt).await.map_err(|e| {
            error!("Failed to fetch {} lookup: {}", table, e);
            CoreError::InternalServerError
        })?;

        rows.iter()
            .map(|row| {
                Ok((
                    row.try_get::<i64>("", "id").map_err(|e| {
                        error!("Malformed {} row: {}", table, e);
                        CoreError::InternalServerError
                    })?,
                    row.try_get::<String>("", "slug").map_err(|e| {
                        error!("Malformed {} row: {}", table, e);
                        CoreError::InternalServerError
                    })?,
                    row.try_get::<String>("", "label").map_err(|e| {
                        error!("Malformed {} row: {}", table, e);
                        CoreError::InternalServerError
                    })?,
                ))
            })
            .collect()
    }
}

impl CatalogReadRepository for SqliteCatalogReadRepository {
    async fn probe_schema(&self) -> Result<CatalogSchema, CoreError> {
        let item_columns = table_columns(&self.db, "items").await?;
        let has = |column: &str| item_columns.iter().any(|c| c == column);

        let schema = CatalogSchema {
            has_description: has("description"),
            has_image_path: has("image_path"),
            has_base_spice: has("base_spice"),
            has_spice_range: has("min_spice") && has("max_spice"),
            has_noodle_encoding: has("noodle_types"),
            has_course_join: has("course_id") && table_exists(&self.db, "courses").await?,
            has_protein_edges: table_exists(&self.db, "item_allowed_proteins").await?
                && table_exists(&self.db, "proteins").await?,
            has_option_groups: table_exists(&self.db, "item_options").await?
                && table_exists(&self.db, "item_option_values").await?,
        };

        debug!(?schema, "probed catalog schema");
        Ok(schema)
    }

    async fn fetch_courses(&self) -> Result<Vec<Course>, CoreError> {
        Ok(self
            .fetch_lookup("courses")
            .await?
            .into_iter()
            .map(|(id, slug, label)| Course { id, slug, label })
            .collect())
    }

    async fn fetch_proteins(&self) -> Result<Vec<Protein>, CoreError> {
        Ok(self
            .fetch_lookup("proteins")
            .await?
            .into_iter()
            .map(|(id, slug, label)| Protein { id, slug, label })
            .collect())
    }

    async fn fetch_item_rows(&self, schema: CatalogSchema) -> Result<Vec<RawItemRow>, CoreError> {
        if !table_exists(&self.db, "items").await? {
            debug!("items table is absent; serving an empty catalog");
            return Ok(Vec::new());
        }

        let mut columns = vec!["i.id", "i.name", "i.enabled"];
        if schema.has_description {
            columns.push("i.description");
        }
        if schema.has_image_path {
            columns.push("i.image_path");
        }
        if schema.has_base_spice {
            columns.push("i.base_spice");
        }
        if schema.has_spice_range {
            columns.push("i.min_spice");
            columns.push("i.max_spice");
        }
        if schema.has_noodle_encoding {
            columns.push("i.noodle_types");
        }
        if schema.has_course_join {
            columns.push("c.slug AS course_slug");
            columns.push("c.label AS course_label");
        }

        let mut sql = format!("SELECT {} FROM items i", columns.join(", "));
        if schema.has_course_join {
            sql.push_str(" LEFT JOIN courses c ON c.id = i.course_id");
        }
        sql.push_str(" ORDER BY i.name");

        let rows = self
            .db
            .query_all(Statement::from_string(DatabaseBackend::Sqlite, sql))
            .await
            .map_err(|e| {
                error!("Failed to fetch item rows: {}", e);
                CoreError::InternalServerError
            })?;

        rows.iter()
            .map(|row| {
                Ok(RawItemRow {
                    id: row.try_get::<i64>("", "id").map_err(|e| {
                        error!("Malformed item row: {}", e);
                        CoreError::InternalServerError
                    })?,
                    name: row.try_get::<String>("", "name").map_err(|e| {
                        error!("Malformed item row: {}", e);
                        CoreError::InternalServerError
                    })?,
                    enabled: row
                        .try_get::<i64>("", "enabled")
                        .map(|flag| flag != 0)
                        .unwrap_or(false),
                    description: row.try_get::<Option<String>>("", "description").ok().flatten(),
                    image_path: row.try_get::<Option<String>>("", "image_path").ok().flatten(),
                    base_spice: row.try_get::<Option<i64>>("", "base_spice").ok().flatten(),
                    min_spice: row.try_get::<Option<i64>>("", "min_spice").ok().flatten(),
                    max_spice: row.try_get::<Option<i64>>("", "max_spice").ok().flatten(),
                    course_slug: row.try_get::<Option<String>>("", "course_slug").ok().flatten(),
                    course_label: row
                        .try_get::<Option<String>>("", "course_label")
                        .ok()
                        .flatten(),
                    noodle_encoding: row
                        .try_get::<Option<String>>("", "noodle_types")
                        .ok()
                        .flatten(),
                })
            })
            .collect()
    }

    async fn fetch_protein_edges(
        &self,
        schema: CatalogSchema,
    ) -> Result<Vec<RawProteinEdge>, CoreError> {
        if !schema.has_protein_edges {
            debug!("protein edge tables are absent; items carry no edges");
            return Ok(Vec::new());
        }

        let stmt = Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT iap.item_id, p.slug, p.label \
             FROM item_allowed_proteins iap \
             INNER JOIN proteins p ON p.id = iap.protein_id"
                .to_string(),
        );
        let rows = self.db.query_all(stmt).await.map_err(|e| {
            error!("Failed to fetch protein edges: {}", e);
            CoreError::InternalServerError
        })?;

        rows.iter()
            .map(|row| {
                Ok(RawProteinEdge {
                    item_id: row.try_get::<i64>("", "item_id").map_err(|e| {
                        error!("Malformed protein edge row: {}", e);
                        CoreError::InternalServerError
                    })?,
                    slug: row.try_get::<String>("", "slug").map_err(|e| {
                        error!("Malformed protein edge row: {}", e);
                        CoreError::InternalServerError
                    })?,
                    label: row.try_get::<String>("", "label").map_err(|e| {
                        error!("Malformed protein edge row: {}", e);
                        CoreError::InternalServerError
                    })?,
                })
            })
            .collect()
    }
}
