use std::future::Future;

use crate::domain::{
    catalog::{
        entities::{Course, NormalizedCatalog, Protein},
        value_objects::{CatalogSchema, RawItemRow, RawProteinEdge},
    },
    common::entities::app_errors::CoreError,
};

/// Read boundary over the catalog store. Implementations must probe before
/// they select; the item schema differs between deployments and no column
/// beyond id/name/enabled can be assumed.
#[cfg_attr(test, mockall::automock)]
pub trait CatalogReadRepository: Send + Sync {
    fn probe_schema(&self) -> impl Future<Output = Result<CatalogSchema, CoreError>> + Send;

    fn fetch_courses(&self) -> impl Future<Output = Result<Vec<Course>, CoreError>> + Send;

    fn fetch_proteins(&self) -> impl Future<Output = Result<Vec<Protein>, CoreError>> + Send;

    fn fetch_item_rows(
        &self,
        schema: CatalogSchema,
    ) -> impl Future<Output = Result<Vec<RawItemRow>, CoreError>> + Send;

    fn fetch_protein_edges(
        &self,
        schema: CatalogSchema,
    ) -> impl Future<Output = Result<Vec<RawProteinEdge>, CoreError>> + Send;
}

/// Service trait for catalog projection.
pub trait CatalogService: Send + Sync {
    fn load_catalog(&self) -> impl Future<Output = Result<NormalizedCatalog, CoreError>> + Send;
}
