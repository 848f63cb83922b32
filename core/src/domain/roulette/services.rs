use tracing::debug;

use crate::domain::{
    catalog::ports::{CatalogReadRepository, CatalogService},
    common::{entities::app_errors::CoreError, services::Service},
    draw::{
        services::{draw_item, draw_options, draw_protein},
        value_objects::DishPick,
    },
    filtering::{services::filter_pool, value_objects::EligibleItem},
    options::ports::{OptionGroupRepository, OptionService},
    preferences::{
        ports::{
            ClientPreferenceStore, LegacyPreferenceRepository, PreferenceRepository,
            PreferenceService, PreferenceTokenCodec,
        },
        value_objects::DinerIdentity,
    },
    roulette::ports::RouletteService,
};

impl<CA, OG, PF, LP, CS, TC> RouletteService for Service<CA, OG, PF, LP, CS, TC>
where
    CA: CatalogReadRepository,
    OG: OptionGroupRepository,
    PF: PreferenceRepository,
    LP: LegacyPreferenceRepository,
    CS: ClientPreferenceStore,
    TC: PreferenceTokenCodec,
{
    async fn eligible_pool(
        &self,
        identity: DinerIdentity,
    ) -> Result<Vec<EligibleItem>, CoreError> {
        let catalog = self.load_catalog().await?;
        let preferences = self.resolve_preferences(identity).await?;
        Ok(filter_pool(&catalog, &preferences))
    }

    async fn pick_dish(&self, identity: DinerIdentity) -> Result<DishPick, CoreError> {
        let pool = self.eligible_pool(identity).await?;

        // thread_rng is not Send, so each draw borrows it inside its own
        // scope rather than across the option fetch.
        let picked = {
            let mut rng = rand::thread_rng();
            draw_item(&pool, &mut rng)?.clone()
        };

        let groups = self.resolve_options(picked.item.clone()).await?;

        let (protein, options) = {
            let mut rng = rand::thread_rng();
            (
                draw_protein(&picked, &mut rng),
                draw_options(&groups, &mut rng),
            )
        };

        debug!(
            item = %picked.item.name,
            protein = ?protein.as_ref().map(|p| p.slug.as_str()),
            groups = options.len(),
            "dish drawn"
        );

        Ok(DishPick {
            item: picked,
            protein,
            options,
        })
    }
}
