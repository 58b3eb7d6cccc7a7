//! The module contains the definition of a store user.
//!
//! `balance_cents` is store credit in integer cents and must be >= 0 at
//! rest; the purchase/adjustment operations in `ops` enforce this with
//! conditional updates.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub role: String,
    pub balance_cents: i64,
    pub is_banned: bool,
    pub is_verified: bool,
    pub time_spent_hours: i32,
    pub active_frame_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::game_purchases::Entity")]
    GamePurchases,
    #[sea_orm(has_many = "super::user_frames::Entity")]
    UserFrames,
}

impl Related<super::game_purchases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GamePurchases.def()
    }
}

impl Related<super::user_frames::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserFrames.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
