use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    draw::value_objects::DishPick,
    filtering::value_objects::EligibleItem,
    preferences::value_objects::DinerIdentity,
};

/// Service trait for the headline flow: what can this diner be served, and
/// pick one dish for them.
pub trait RouletteService: Send + Sync {
    /// The catalog filtered by the diner's resolved preferences, in the
    /// stable order the carousel lays out.
    fn eligible_pool(
        &self,
        identity: DinerIdentity,
    ) -> impl Future<Output = Result<Vec<EligibleItem>, CoreError>> + Send;

    /// Draw a dish with its protein and option sub-draws. Callers gate the
    /// spin trigger on a non-empty pool; an empty pool here surfaces as
    /// [`CoreError::EmptyPool`].
    fn pick_dish(
        &self,
        identity: DinerIdentity,
    ) -> impl Future<Output = Result<DishPick, CoreError>> + Send;
}
