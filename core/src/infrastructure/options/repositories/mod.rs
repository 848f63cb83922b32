pub mod option_group_repository;

pub use option_group_repository::SqliteOptionGroupRepository;
