use std::future::Future;
use std::time::Duration;

use crate::domain::{
    common::entities::app_errors::CoreError,
    preferences::{
        entities::PreferenceRecord,
        value_objects::{
            DinerIdentity, LegacyPreferenceRow, PreferenceSummary, PreferencesDocument,
        },
    },
};

/// Current-representation account store: one JSON document per user,
/// replaced wholesale on save.
#[cfg_attr(test, mockall::automock)]
pub trait PreferenceRepository: Send + Sync {
    fn get_document(
        &self,
        user_id: i64,
    ) -> impl Future<Output = Result<Option<String>, CoreError>> + Send;

    fn upsert_document(
        &self,
        user_id: i64,
        document: String,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Read-only fallback over the legacy account representation.
#[cfg_attr(test, mockall::automock)]
pub trait LegacyPreferenceRepository: Send + Sync {
    fn get_record(
        &self,
        user_id: i64,
    ) -> impl Future<Output = Result<Option<LegacyPreferenceRow>, CoreError>> + Send;
}

/// Client-side token transport (a cookie jar, in practice). The core never
/// sees how the token travels.
#[cfg_attr(test, mockall::automock)]
pub trait ClientPreferenceStore: Send + Sync {
    fn load_token(&self) -> impl Future<Output = Result<Option<String>, CoreError>> + Send;

    fn store_token(
        &self,
        token: String,
        ttl: Duration,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Opaque encoding of the preference document for the client-side token.
/// Decoding failures are resolution misses, so `decode` has no error
/// channel.
pub trait PreferenceTokenCodec: Send + Sync {
    fn encode(&self, document: &PreferencesDocument) -> Result<String, CoreError>;

    fn decode(&self, token: &str) -> Option<PreferencesDocument>;
}

/// Service trait for preference resolution and persistence.
pub trait PreferenceService: Send + Sync {
    fn resolve_preferences(
        &self,
        identity: DinerIdentity,
    ) -> impl Future<Output = Result<PreferenceRecord, CoreError>> + Send;

    fn persist_preferences(
        &self,
        identity: DinerIdentity,
        candidate: PreferencesDocument,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn preference_summary(
        &self,
        identity: DinerIdentity,
    ) -> impl Future<Output = Result<PreferenceSummary, CoreError>> + Send;
}
