//! Key/value settings, currently only the maintenance flag.

use sea_orm::entity::prelude::*;

/// Key of the global maintenance flag; value is `"true"` or `"false"`.
pub const MAINTENANCE_MODE_KEY: &str = "maintenance_mode";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "system_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub value: String,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
