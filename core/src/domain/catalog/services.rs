use crate::domain::{
    catalog::{
        entities::NormalizedCatalog,
        ports::{CatalogReadRepository, CatalogService},
        projector::project_catalog,
    },
    common::{entities::app_errors::CoreError, services::Service},
    options::ports::OptionGroupRepository,
    preferences::ports::{
        ClientPreferenceStore, LegacyPreferenceRepository, PreferenceRepository,
        PreferenceTokenCodec,
    },
};

impl<CA, OG, PF, LP, CS, TC> CatalogService for Service<CA, OG, PF, LP, CS, TC>
where
    CA: CatalogReadRepository,
    OG: OptionGroupRepository,
    PF: PreferenceRepository,
    LP: LegacyPreferenceRepository,
    CS: ClientPreferenceStore,
    TC: PreferenceTokenCodec,
{
    async fn load_catalog(&self) -> Result<NormalizedCatalog, CoreError> {
        let schema = self.catalog_repository.probe_schema().await?;
        let courses = self.catalog_repository.fetch_courses().await?;
        let proteins = self.catalog_repository.fetch_proteins().await?;
        let rows = self.catalog_repository.fetch_item_rows(schema).await?;
        let edges = self.catalog_repository.fetch_protein_edges(schema).await?;

        Ok(project_catalog(&schema, courses, proteins, rows, edges))
    }
}
