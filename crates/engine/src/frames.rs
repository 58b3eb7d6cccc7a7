//! Cosmetic avatar frames sold alongside games.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "frames")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub image_url: String,
    pub price_cents: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_frames::Entity")]
    UserFrames,
}

impl Related<super::user_frames::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserFrames.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
