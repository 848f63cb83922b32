use std::future::Future;

use crate::domain::{
    catalog::entities::CatalogItem,
    common::entities::app_errors::CoreError,
    options::{
        entities::OptionGroup,
        value_objects::{RawOptionGroupRow, RawOptionValueRow},
    },
};

/// Read boundary over the structured option tables. Both tables may be
/// absent from older deployments; adapters report that as zero rows, never
/// as an error.
#[cfg_attr(test, mockall::automock)]
pub trait OptionGroupRepository: Send + Sync {
    fn fetch_groups_for_item(
        &self,
        item_id: i64,
    ) -> impl Future<Output = Result<Vec<RawOptionGroupRow>, CoreError>> + Send;

    fn fetch_values_for_item(
        &self,
        item_id: i64,
    ) -> impl Future<Output = Result<Vec<RawOptionValueRow>, CoreError>> + Send;
}

/// Service trait for per-item option resolution.
pub trait OptionService: Send + Sync {
    fn resolve_options(
        &self,
        item: CatalogItem,
    ) -> impl Future<Output = Result<Vec<OptionGroup>, CoreError>> + Send;
}
