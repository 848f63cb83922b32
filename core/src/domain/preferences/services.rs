use tracing::{error, warn};

use crate::domain::{
    catalog::{
        entities::{Course, Protein},
        ports::CatalogReadRepository,
    },
    common::{entities::app_errors::CoreError, services::Service},
    options::ports::OptionGroupRepository,
    preferences::{
        entities::PreferenceRecord,
        helpers::{document_from_legacy, record_to_document, sanitize_document, summarize},
        ports::{
            ClientPreferenceStore, LegacyPreferenceRepository, PreferenceRepository,
            PreferenceService, PreferenceTokenCodec,
        },
        value_objects::{
            DinerIdentity, PreferenceSummary, PreferencesDocument, PREFERENCE_TOKEN_TTL,
        },
    },
};

impl<CA, OG, PF, LP, CS, TC> Service<CA, OG, PF, LP, CS, TC>
where
    CA: CatalogReadRepository,
    OG: OptionGroupRepository,
    PF: PreferenceRepository,
    LP: LegacyPreferenceRepository,
    CS: ClientPreferenceStore,
    TC: PreferenceTokenCodec,
{
    async fn lookup_enumerations(&self) -> Result<(Vec<Course>, Vec<Protein>), CoreError> {
        let courses = self.catalog_repository.fetch_courses().await?;
        let proteins = self.catalog_repository.fetch_proteins().await?;
        Ok((courses, proteins))
    }

    /// Walk the source ladder for an identity. Every miss (absent record,
    /// malformed document, storage error) falls through to the next rung.
    async fn resolve_sanitized(
        &self,
        identity: DinerIdentity,
        courses: &[Course],
        proteins: &[Protein],
    ) -> PreferenceRecord {
        if let DinerIdentity::Account(user_id) = identity {
            match self.preference_repository.get_document(user_id).await {
                Ok(Some(raw)) => {
                    match serde_json::from_str::<PreferencesDocument>(&raw) {
                        Ok(document) => return sanitize_document(&document, courses, proteins),
                        Err(err) => {
                            warn!(user_id, %err, "stored preference document is malformed")
                        }
                    }
                }
                Ok(None) => {}
                Err(err) => warn!(user_id, %err, "preference store read failed, falling back"),
            }

            match self.legacy_preference_repository.get_record(user_id).await {
                Ok(Some(legacy)) => {
                    return sanitize_document(&document_from_legacy(&legacy), courses, proteins);
                }
                Ok(None) => {}
                Err(err) => warn!(user_id, %err, "legacy preference read failed, falling back"),
            }
        }

        match self.client_preference_store.load_token().await {
            Ok(Some(token)) => {
                if let Some(document) = self.token_codec.decode(&token) {
                    return sanitize_document(&document, courses, proteins);
                }
            }
            Ok(None) => {}
            Err(err) => warn!(%err, "client preference token read failed, falling back"),
        }

        PreferenceRecord::defaults()
    }
}

impl<CA, OG, PF, LP, CS, TC> PreferenceService for Service<CA, OG, PF, LP, CS, TC>
where
    CA: CatalogReadRepository,
    OG: OptionGroupRepository,
    PF: PreferenceRepository,
    LP: LegacyPreferenceRepository,
    CS: ClientPreferenceStore,
    TC: PreferenceTokenCodec,
{
    async fn resolve_preferences(
        &self,
        identity: DinerIdentity,
    ) -> Result<PreferenceRecord, CoreError> {
        let (courses, proteins) = match self.lookup_enumerations().await {
            Ok(lookups) => lookups,
            Err(err) => {
                warn!(%err, "lookup enumerations unavailable, serving default preferences");
                return Ok(PreferenceRecord::defaults());
            }
        };

        Ok(self.resolve_sanitized(identity, &courses, &proteins).await)
    }

    async fn persist_preferences(
        &self,
        identity: DinerIdentity,
        candidate: PreferencesDocument,
    ) -> Result<(), CoreError> {
        let (courses, proteins) = self.lookup_enumerations().await.map_err(|err| {
            error!(%err, "cannot sanitize preferences without lookup enumerations");
            CoreError::SaveFailed
        })?;

        let record = sanitize_document(&candidate, &courses, &proteins);
        let document = record_to_document(&record, &courses, &proteins);

        match identity {
            DinerIdentity::Account(user_id) => {
                let json = serde_json::to_string(&document).map_err(|err| {
                    error!(%err, "failed to encode preference document");
                    CoreError::SaveFailed
                })?;
                self.preference_repository
                    .upsert_document(user_id, json)
                    .await
                    .map_err(|err| {
                        error!(user_id, %err, "preference upsert failed");
                        CoreError::SaveFailed
                    })
            }
            DinerIdentity::Anonymous => {
                let token = self.token_codec.encode(&document)?;
                self.client_preference_store
                    .store_token(token, PREFERENCE_TOKEN_TTL)
                    .await
                    .map_err(|err| {
                        error!(%err, "client preference token write failed");
                        CoreError::SaveFailed
                    })
            }
        }
    }

    async fn preference_summary(
        &self,
        identity: DinerIdentity,
    ) -> Result<PreferenceSummary, CoreError> {
        let (courses, proteins) = self.lookup_enumerations().await.unwrap_or_default();
        let record = self.resolve_sanitized(identity, &courses, &proteins).await;
        Ok(summarize(&record, &courses, &proteins))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::domain::{
        catalog::value_objects::{CatalogSchema, RawItemRow, RawProteinEdge},
        options::value_objects::{RawOptionGroupRow, RawOptionValueRow},
        preferences::entities::SlugSelection,
        preferences::value_objects::LegacyPreferenceRow,
    };

    struct FakeCatalogRepository;

    impl CatalogReadRepository for FakeCatalogRepository {
        async fn probe_schema(&self) -> Result<CatalogSchema, CoreError> {
            Ok(CatalogSchema::default())
        }

        async fn fetch_courses(&self) -> Result<Vec<Course>, CoreError> {
            Ok(vec![
                Course {
                    id: 1,
                    slug: "mains".into(),
                    label: "Mains".into(),
                },
                Course {
                    id: 2,
                    slug: "appetisers".into(),
                    label: "Appetisers".into(),
                },
            ])
        }

        async fn fetch_proteins(&self) -> Result<Vec<Protein>, CoreError> {
            Ok(vec![
                Protein {
                    id: 1,
                    slug: "beef".into(),
                    label: "Beef".into(),
                },
                Protein {
                    id: 2,
                    slug: "vegan".into(),
                    label: "Vegan".into(),
                },
            ])
        }

        async fn fetch_item_rows(
            &self,
            _schema: CatalogSchema,
        ) -> Result<Vec<RawItemRow>, CoreError> {
            Ok(vec![])
        }

        async fn fetch_protein_edges(
            &self,
            _schema: CatalogSchema,
        ) -> Result<Vec<RawProteinEdge>, CoreError> {
            Ok(vec![])
        }
    }

    struct FakeOptionRepository;

    impl OptionGroupRepository for FakeOptionRepository {
        async fn fetch_groups_for_item(
            &self,
            _item_id: i64,
        ) -> Result<Vec<RawOptionGroupRow>, CoreError> {
            Ok(vec![])
        }

        async fn fetch_values_for_item(
            &self,
            _item_id: i64,
        ) -> Result<Vec<RawOptionValueRow>, CoreError> {
            Ok(vec![])
        }
    }

    #[derive(Default)]
    struct FakePreferenceRepository {
        document: Mutex<Option<String>>,
        fail_reads: bool,
        fail_writes: bool,
    }

    impl PreferenceRepository for FakePreferenceRepository {
        async fn get_document(&self, _user_id: i64) -> Result<Option<String>, CoreError> {
            if self.fail_reads {
                return Err(CoreError::InternalServerError);
            }
            Ok(self.document.lock().unwrap().clone())
        }

        async fn upsert_document(&self, _user_id: i64, document: String) -> Result<(), CoreError> {
            if self.fail_writes {
                return Err(CoreError::InternalServerError);
            }
            *self.document.lock().unwrap() = Some(document);
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeLegacyRepository {
        record: Option<LegacyPreferenceRow>,
    }

    impl LegacyPreferenceRepository for FakeLegacyRepository {
        async fn get_record(&self, _user_id: i64) -> Result<Option<LegacyPreferenceRow>, CoreError> {
            Ok(self.record.clone())
        }
    }

    #[derive(Default)]
    struct FakeClientStore {
        token: Mutex<Option<String>>,
    }

    impl ClientPreferenceStore for FakeClientStore {
        async fn load_token(&self) -> Result<Option<String>, CoreError> {
            Ok(self.token.lock().unwrap().clone())
        }

        async fn store_token(&self, token: String, _ttl: Duration) -> Result<(), CoreError> {
            *self.token.lock().unwrap() = Some(token);
            Ok(())
        }
    }

    struct JsonCodec;

    impl PreferenceTokenCodec for JsonCodec {
        fn encode(&self, document: &PreferencesDocument) -> Result<String, CoreError> {
            serde_json::to_string(document).map_err(|_| CoreError::SaveFailed)
        }

        fn decode(&self, token: &str) -> Option<PreferencesDocument> {
            serde_json::from_str(token).ok()
        }
    }

    type TestService = Service<
        FakeCatalogRepository,
        FakeOptionRepository,
        FakePreferenceRepository,
        FakeLegacyRepository,
        FakeClientStore,
        JsonCodec,
    >;

    fn service(
        preferences: FakePreferenceRepository,
        legacy: FakeLegacyRepository,
        client: FakeClientStore,
    ) -> TestService {
        Service::new(
            FakeCatalogRepository,
            FakeOptionRepository,
            preferences,
            legacy,
            client,
            JsonCodec,
        )
    }

    #[tokio::test]
    async fn current_representation_wins_over_legacy_and_token() {
        let preferences = FakePreferenceRepository {
            document: Mutex::new(Some(
                json!({"courses": ["mains"], "proteins": ["beef"], "max_spice": 2}).to_string(),
            )),
            ..Default::default()
        };
        let legacy = FakeLegacyRepository {
            record: Some(LegacyPreferenceRow {
                course_slug: Some("appetisers".into()),
                spice_tolerance: Some(1),
                protein_slugs: vec!["vegan".into()],
            }),
        };
        let svc = service(preferences, legacy, FakeClientStore::default());

        let record = svc
            .resolve_preferences(DinerIdentity::Account(7))
            .await
            .unwrap();
        assert_eq!(record.courses, SlugSelection::Only(vec!["mains".into()]));
        assert_eq!(record.max_spice, 2);
    }

    #[tokio::test]
    async fn legacy_representation_fills_in_when_current_is_absent() {
        let legacy = FakeLegacyRepository {
            record: Some(LegacyPreferenceRow {
                course_slug: Some("appetisers".into()),
                spice_tolerance: Some(1),
                protein_slugs: vec!["vegan".into()],
            }),
        };
        let svc = service(FakePreferenceRepository::default(), legacy, FakeClientStore::default());

        let record = svc
            .resolve_preferences(DinerIdentity::Account(7))
            .await
            .unwrap();
        assert_eq!(
            record.courses,
            SlugSelection::Only(vec!["appetisers".into()])
        );
        assert_eq!(record.proteins, SlugSelection::Only(vec!["vegan".into()]));
        assert_eq!(record.max_spice, 1);
    }

    #[tokio::test]
    async fn storage_error_falls_through_instead_of_failing() {
        let preferences = FakePreferenceRepository {
            fail_reads: true,
            ..Default::default()
        };
        let legacy = FakeLegacyRepository {
            record: Some(LegacyPreferenceRow {
                course_slug: Some("mains".into()),
                spice_tolerance: Some(3),
                protein_slugs: vec![],
            }),
        };
        let svc = service(preferences, legacy, FakeClientStore::default());

        let record = svc
            .resolve_preferences(DinerIdentity::Account(7))
            .await
            .unwrap();
        assert_eq!(record.courses, SlugSelection::Only(vec!["mains".into()]));
        assert_eq!(record.max_spice, 3);
    }

    #[tokio::test]
    async fn malformed_document_is_a_miss_not_an_error() {
        let preferences = FakePreferenceRepository {
            document: Mutex::new(Some("not json at all".into())),
            ..Default::default()
        };
        let svc = service(
            preferences,
            FakeLegacyRepository::default(),
            FakeClientStore::default(),
        );

        let record = svc
            .resolve_preferences(DinerIdentity::Account(7))
            .await
            .unwrap();
        assert_eq!(record, PreferenceRecord::defaults());
    }

    #[tokio::test]
    async fn anonymous_identity_resolves_from_client_token() {
        let client = FakeClientStore {
            token: Mutex::new(Some(
                json!({"courses": ["appetisers"], "proteins": [], "max_spice": 4}).to_string(),
            )),
        };
        let svc = service(
            FakePreferenceRepository::default(),
            FakeLegacyRepository::default(),
            client,
        );

        let record = svc
            .resolve_preferences(DinerIdentity::Anonymous)
            .await
            .unwrap();
        assert_eq!(
            record.courses,
            SlugSelection::Only(vec!["appetisers".into()])
        );
        assert!(record.proteins.is_all());
        assert_eq!(record.max_spice, 4);
    }

    #[tokio::test]
    async fn nothing_stored_resolves_to_defaults() {
        let svc = service(
            FakePreferenceRepository::default(),
            FakeLegacyRepository::default(),
            FakeClientStore::default(),
        );

        let record = svc
            .resolve_preferences(DinerIdentity::Anonymous)
            .await
            .unwrap();
        assert_eq!(record, PreferenceRecord::defaults());
    }

    #[tokio::test]
    async fn persist_sanitizes_before_writing() {
        let svc = service(
            FakePreferenceRepository::default(),
            FakeLegacyRepository::default(),
            FakeClientStore::default(),
        );

        svc.persist_preferences(
            DinerIdentity::Account(7),
            PreferencesDocument {
                courses: vec!["mains".into(), "desserts".into()],
                proteins: vec!["tofu".into()],
                max_spice: json!("extra hot"),
            },
        )
        .await
        .unwrap();

        let stored = svc
            .preference_repository
            .document
            .lock()
            .unwrap()
            .clone()
            .unwrap();
        let parsed: PreferencesDocument = serde_json::from_str(&stored).unwrap();
        assert_eq!(parsed.courses, vec!["mains".to_string()]);
        // Emptied protein selection is stored open, as the full enumeration.
        assert_eq!(
            parsed.proteins,
            vec!["beef".to_string(), "vegan".to_string()]
        );
        assert_eq!(parsed.max_spice, json!(5));
    }

    #[tokio::test]
    async fn persist_failure_surfaces_as_save_failed() {
        let preferences = FakePreferenceRepository {
            fail_writes: true,
            ..Default::default()
        };
        let svc = service(
            preferences,
            FakeLegacyRepository::default(),
            FakeClientStore::default(),
        );

        let result = svc
            .persist_preferences(
                DinerIdentity::Account(7),
                PreferencesDocument {
                    courses: vec![],
                    proteins: vec![],
                    max_spice: json!(5),
                },
            )
            .await;
        assert_eq!(result, Err(CoreError::SaveFailed));
    }

    #[tokio::test]
    async fn anonymous_persist_round_trips_through_the_token() {
        let svc = service(
            FakePreferenceRepository::default(),
            FakeLegacyRepository::default(),
            FakeClientStore::default(),
        );

        svc.persist_preferences(
            DinerIdentity::Anonymous,
            PreferencesDocument {
                courses: vec!["appetisers".into()],
                proteins: vec!["beef".into()],
                max_spice: json!(1),
            },
        )
        .await
        .unwrap();

        let record = svc
            .resolve_preferences(DinerIdentity::Anonymous)
            .await
            .unwrap();
        assert_eq!(
            record.courses,
            SlugSelection::Only(vec!["appetisers".into()])
        );
        assert_eq!(record.proteins, SlugSelection::Only(vec!["beef".into()]));
        assert_eq!(record.max_spice, 1);
    }

    #[tokio::test]
    async fn summary_labels_follow_the_resolved_record() {
        let preferences = FakePreferenceRepository {
            document: Mutex::new(Some(
                json!({"courses": ["mains"], "proteins": ["beef"], "max_spice": 3}).to_string(),
            )),
            ..Default::default()
        };
        let svc = service(
            preferences,
            FakeLegacyRepository::default(),
            FakeClientStore::default(),
        );

        let summary = svc
            .preference_summary(DinerIdentity::Account(7))
            .await
            .unwrap();
        assert_eq!(summary.course_labels, vec!["Mains"]);
        assert_eq!(summary.protein_labels, vec!["Beef"]);
        assert_eq!(summary.max_spice, 3);
    }
}
