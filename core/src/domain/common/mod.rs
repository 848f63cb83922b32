pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct DishRouletteConfig {
    pub database: DatabaseConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    /// Filesystem path of the SQLite database file.
    pub path: String,
}

impl DatabaseConfig {
    pub fn connection_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.path)
    }
}
