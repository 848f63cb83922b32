pub mod user_filter_proteins;
pub mod user_filter_settings;
pub mod user_preferences;
