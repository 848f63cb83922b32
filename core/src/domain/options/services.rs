use crate::domain::{
    catalog::{entities::CatalogItem, ports::CatalogReadRepository},
    common::{entities::app_errors::CoreError, services::Service},
    options::{
        entities::OptionGroup,
        ports::{OptionGroupRepository, OptionService},
        resolver::resolve_option_groups,
    },
    preferences::ports::{
        ClientPreferenceStore, LegacyPreferenceRepository, PreferenceRepository,
        PreferenceTokenCodec,
    },
};

impl<CA, OG, PF, LP, CS, TC> OptionService for Service<CA, OG, PF, LP, CS, TC>
where
    CA: CatalogReadRepository,
    OG: OptionGroupRepository,
    PF: PreferenceRepository,
    LP: LegacyPreferenceRepository,
    CS: ClientPreferenceStore,
    TC: PreferenceTokenCodec,
{
    async fn resolve_options(&self, item: CatalogItem) -> Result<Vec<OptionGroup>, CoreError> {
        let groups = self.option_repository.fetch_groups_for_item(item.id).await?;
        let values = self.option_repository.fetch_values_for_item(item.id).await?;

        Ok(resolve_option_groups(
            item.noodle_encoding.as_deref(),
            groups,
            values,
        ))
    }
}
