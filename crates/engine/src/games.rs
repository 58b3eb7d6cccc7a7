//! Game catalog entity and the moderation status lifecycle.

use sea_orm::entity::prelude::*;

use crate::EngineError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub age_rating: Option<String>,
    pub price_cents: i64,
    pub logo_url: Option<String>,
    pub file_url: Option<String>,
    pub contact_email: Option<String>,
    pub engine_type: Option<String>,
    pub status: String,
    pub created_by: Option<i32>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::game_purchases::Entity")]
    GamePurchases,
}

impl Related<super::game_purchases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GamePurchases.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Moderation status of a submitted game.
///
/// Submissions start `Pending`; only `Approved` games show up in the public
/// catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Pending,
    Approved,
    Rejected,
}

impl GameStatus {
    /// Returns the canonical status string stored in the database.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl TryFrom<&str> for GameStatus {
    type Error = EngineError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        match raw {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(EngineError::InvalidRequest(format!(
                "unknown game status: {other}"
            ))),
        }
    }
}
