//! Account operations: credentials, registration, profile fields.

use sea_orm::{ActiveValue, QueryFilter, prelude::*};

use crate::{EngineError, ResultEngine, user_frames, users};

use super::{Engine, require_user};

impl Engine {
    /// Checks credentials and returns the account.
    ///
    /// Banned accounts authenticate but are refused with `Forbidden`.
    pub async fn login(&self, email: &str, password: &str) -> ResultEngine<users::Model> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .filter(users::Column::Password.eq(password))
            .one(&self.database)
            .await?
            .ok_or(EngineError::InvalidCredentials)?;

        if user.is_banned {
            return Err(EngineError::Forbidden("account is banned".to_string()));
        }

        Ok(user)
    }

    /// Creates an account with an empty balance and the default role.
    ///
    /// Email addresses are unique; a second registration is a conflict.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> ResultEngine<users::Model> {
        if users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.database)
            .await?
            .is_some()
        {
            return Err(EngineError::ExistingKey(email.to_string()));
        }

        let user = users::ActiveModel {
            email: ActiveValue::Set(email.to_string()),
            password: ActiveValue::Set(password.to_string()),
            username: ActiveValue::Set(username.to_string()),
            role: ActiveValue::Set("user".to_string()),
            balance_cents: ActiveValue::Set(0),
            is_banned: ActiveValue::Set(false),
            is_verified: ActiveValue::Set(false),
            time_spent_hours: ActiveValue::Set(0),
            ..Default::default()
        }
        .insert(&self.database)
        .await?;

        Ok(user)
    }

    /// Updates the profile fields that were provided; absent fields stay.
    pub async fn update_profile(
        &self,
        user_id: i32,
        username: Option<String>,
        avatar_url: Option<String>,
    ) -> ResultEngine<()> {
        if username.is_none() && avatar_url.is_none() {
            return Ok(());
        }

        let user = require_user(&self.database, user_id).await?;
        let mut user: users::ActiveModel = user.into();
        if let Some(username) = username {
            user.username = ActiveValue::Set(username);
        }
        if let Some(avatar_url) = avatar_url {
            user.avatar_url = ActiveValue::Set(Some(avatar_url));
        }
        user.update(&self.database).await?;

        Ok(())
    }

    /// Sets the frame shown on the profile; the frame must be owned.
    pub async fn set_active_frame(&self, user_id: i32, frame_id: i32) -> ResultEngine<()> {
        user_frames::Entity::find_by_id((user_id, frame_id))
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("frame not owned".to_string()))?;

        let user = require_user(&self.database, user_id).await?;
        let mut user: users::ActiveModel = user.into();
        user.active_frame_id = ActiveValue::Set(Some(frame_id));
        user.update(&self.database).await?;

        Ok(())
    }
}
