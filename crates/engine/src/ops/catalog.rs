//! Catalog operations: game submissions and moderation, frame creation.

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{EngineError, GameStatus, MoneyCents, ResultEngine, frames, games};

use super::Engine;

/// A game submitted for moderation.
#[derive(Clone, Debug, Default)]
pub struct GameSubmission {
    pub title: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub age_rating: Option<String>,
    pub price: MoneyCents,
    pub logo_url: Option<String>,
    pub file_url: Option<String>,
    pub contact_email: Option<String>,
    pub engine_type: Option<String>,
    pub created_by: Option<i32>,
}

impl Engine {
    /// Lists games with the given moderation status, newest first.
    pub async fn list_games(&self, status: GameStatus) -> ResultEngine<Vec<games::Model>> {
        Ok(games::Entity::find()
            .filter(games::Column::Status.eq(status.as_str()))
            .order_by_desc(games::Column::CreatedAt)
            .all(&self.database)
            .await?)
    }

    /// Stores a submission with `Pending` status and returns its id.
    pub async fn submit_game(&self, submission: GameSubmission) -> ResultEngine<i32> {
        if submission.title.trim().is_empty() {
            return Err(EngineError::InvalidRequest(
                "title must not be empty".to_string(),
            ));
        }
        if submission.price.is_negative() {
            return Err(EngineError::InvalidAmount(
                "price must not be negative".to_string(),
            ));
        }

        let game = games::ActiveModel {
            title: ActiveValue::Set(submission.title),
            description: ActiveValue::Set(submission.description),
            genre: ActiveValue::Set(submission.genre),
            age_rating: ActiveValue::Set(submission.age_rating),
            price_cents: ActiveValue::Set(submission.price.cents()),
            logo_url: ActiveValue::Set(submission.logo_url),
            file_url: ActiveValue::Set(submission.file_url),
            contact_email: ActiveValue::Set(submission.contact_email),
            engine_type: ActiveValue::Set(submission.engine_type),
            status: ActiveValue::Set(GameStatus::Pending.as_str().to_string()),
            created_by: ActiveValue::Set(submission.created_by),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.database)
        .await?;

        Ok(game.id)
    }

    /// Moves a game through moderation (approve / reject / back to pending).
    pub async fn set_game_status(&self, game_id: i32, status: GameStatus) -> ResultEngine<()> {
        let game = games::Entity::find_by_id(game_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("game not exists".to_string()))?;

        let mut game: games::ActiveModel = game.into();
        game.status = ActiveValue::Set(status.as_str().to_string());
        game.update(&self.database).await?;

        Ok(())
    }

    /// The frame catalog, oldest first.
    pub async fn list_frames(&self) -> ResultEngine<Vec<frames::Model>> {
        Ok(frames::Entity::find()
            .order_by_asc(frames::Column::Id)
            .all(&self.database)
            .await?)
    }

    /// Adds a frame to the catalog and returns its id.
    pub async fn create_frame(
        &self,
        name: &str,
        image_url: &str,
        price: MoneyCents,
    ) -> ResultEngine<i32> {
        if price.is_negative() {
            return Err(EngineError::InvalidAmount(
                "price must not be negative".to_string(),
            ));
        }

        let frame = frames::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            image_url: ActiveValue::Set(image_url.to_string()),
            price_cents: ActiveValue::Set(price.cents()),
            ..Default::default()
        }
        .insert(&self.database)
        .await?;

        Ok(frame.id)
    }
}
