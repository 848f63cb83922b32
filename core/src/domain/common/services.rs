/// Aggregate service owning every collaborator port. Each domain implements
/// its service trait for this one struct, so a fully wired core is a single
/// value.
#[derive(Debug, Clone)]
pub struct Service<CA, OG, PF, LP, CS, TC> {
    pub catalog_repository: CA,
    pub option_repository: OG,
    pub preference_repository: PF,
    pub legacy_preference_repository: LP,
    pub client_preference_store: CS,
    pub token_codec: TC,
}

impl<CA, OG, PF, LP, CS, TC> Service<CA, OG, PF, LP, CS, TC> {
    pub fn new(
        catalog_repository: CA,
        option_repository: OG,
        preference_repository: PF,
        legacy_preference_repository: LP,
        client_preference_store: CS,
        token_codec: TC,
    ) -> Self {
        Self {
            catalog_repository,
            option_repository,
            preference_repository,
            legacy_preference_repository,
            client_preference_store,
            token_codec,
        }
    }
}
