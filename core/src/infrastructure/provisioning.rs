use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing::{error, info};

use crate::domain::common::entities::app_errors::CoreError;

/// Idempotent table creation plus lookup seeding. Safe to run on every
/// startup; existing tables and seed rows are left untouched.
pub async fn provision_database(db: &DatabaseConnection) -> Result<(), CoreError> {
    let statements = [
        r#"CREATE TABLE IF NOT EXISTS courses (
            id     INTEGER PRIMARY KEY AUTOINCREMENT,
            slug   TEXT NOT NULL UNIQUE CHECK (slug IN ('mains','appetisers')),
            label  TEXT NOT NULL
        )"#,
        r#"CREATE TABLE IF NOT EXISTS proteins (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            slug  TEXT NOT NULL UNIQUE CHECK (slug IN ('vegan','vegetarian','pork','seafood','chicken','beef')),
            label TEXT NOT NULL
        )"#,
        r#"CREATE TABLE IF NOT EXISTS items (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            description TEXT,
            course_id   INTEGER NOT NULL,
            base_spice  INTEGER NOT NULL DEFAULT 0 CHECK (base_spice BETWEEN 0 AND 5),
            min_spice   INTEGER NOT NULL DEFAULT 0 CHECK (min_spice BETWEEN 0 AND 5),
            max_spice   INTEGER NOT NULL DEFAULT 0 CHECK (max_spice BETWEEN 0 AND 5),
            image_path  TEXT,
            enabled     INTEGER NOT NULL DEFAULT 1 CHECK (enabled IN (0,1)),
            created_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at  TEXT,
            FOREIGN KEY (course_id) REFERENCES courses(id) ON DELETE RESTRICT
        )"#,
        r#"CREATE INDEX IF NOT EXISTS idx_items_course_enabled ON items(course_id, enabled)"#,
        r#"CREATE TABLE IF NOT EXISTS item_allowed_proteins (
            item_id    INTEGER NOT NULL,
            protein_id INTEGER NOT NULL,
            PRIMARY KEY (item_id, protein_id),
            FOREIGN KEY (item_id)    REFERENCES items(id)    ON DELETE CASCADE,
            FOREIGN KEY (protein_id) REFERENCES proteins(id) ON DELETE RESTRICT
        )"#,
        r#"CREATE TABLE IF NOT EXISTS item_options (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            item_id    INTEGER NOT NULL,
            name       TEXT NOT NULL,
            type       TEXT NOT NULL DEFAULT 'choice',
            required   INTEGER NOT NULL DEFAULT 0 CHECK (required IN (0,1)),
            min_select INTEGER NOT NULL DEFAULT 0,
            max_select INTEGER NOT NULL DEFAULT 1,
            sort_order INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY (item_id) REFERENCES items(id) ON DELETE CASCADE
        )"#,
        r#"CREATE TABLE IF NOT EXISTS item_option_values (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            option_id  INTEGER NOT NULL,
            name       TEXT NOT NULL,
            enabled    INTEGER NOT NULL DEFAULT 1 CHECK (enabled IN (0,1)),
            sort_order INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY (option_id) REFERENCES item_options(id) ON DELETE CASCADE
        )"#,
        r#"CREATE TABLE IF NOT EXISTS user_preferences (
            user_id      INTEGER PRIMARY KEY,
            filters_json TEXT NOT NULL,
            updated_at   TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )"#,
        r#"CREATE TABLE IF NOT EXISTS user_filter_settings (
            user_id         INTEGER PRIMARY KEY,
            course_slug     TEXT,
            spice_tolerance INTEGER
        )"#,
        r#"CREATE TABLE IF NOT EXISTS user_filter_proteins (
            user_id      INTEGER NOT NULL,
            protein_slug TEXT NOT NULL,
            PRIMARY KEY (user_id, protein_slug)
        )"#,
        r#"INSERT OR IGNORE INTO courses(slug,label) VALUES ('mains','Mains'),('appetisers','Appetisers')"#,
        r#"INSERT OR IGNORE INTO proteins(slug,label) VALUES
            ('vegan','Vegan'),
            ('vegetarian','Vegetarian'),
            ('pork','Pork'),
            ('seafood','Seafood'),
            ('chicken','Chicken'),
            ('beef','Beef')"#,
    ];

    for sql in statements {
        db.execute_unprepared(sql).await.map_err(|e| {
            error!("Provisioning statement failed: {}", e);
            CoreError::InternalServerError
        })?;
    }

    info!("database provisioned");
    Ok(())
}
