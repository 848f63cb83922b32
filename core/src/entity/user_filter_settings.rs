use sea_orm::entity::prelude::*;

/// Legacy preference representation: one course choice and one spice
/// tolerance per user. Read-only; superseded by `user_preferences`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_filter_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    pub course_slug: Option<String>,
    pub spice_tolerance: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
