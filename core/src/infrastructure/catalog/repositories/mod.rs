pub mod catalog_read_repository;

pub use catalog_read_repository::SqliteCatalogReadRepository;
