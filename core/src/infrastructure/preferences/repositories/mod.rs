pub mod legacy_preference_repository;
pub mod preference_repository;

pub use legacy_preference_repository::SqliteLegacyPreferenceRepository;
pub use preference_repository::SqlitePreferenceRepository;
