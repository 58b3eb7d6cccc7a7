//! Moderation console operations: user management, balance adjustments,
//! the maintenance flag.

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, MoneyCents, ResultEngine, system_settings, users};

use super::{Engine, apply_balance_delta, require_user};

impl Engine {
    /// Lists accounts for the moderation console, verified accounts first.
    ///
    /// `search` filters by username substring.
    pub async fn list_users(&self, search: Option<&str>) -> ResultEngine<Vec<users::Model>> {
        let mut query = users::Entity::find();
        if let Some(search) = search {
            query = query.filter(users::Column::Username.contains(search));
        }

        Ok(query
            .order_by_desc(users::Column::IsVerified)
            .order_by_asc(users::Column::Username)
            .all(&self.database)
            .await?)
    }

    pub async fn ban_user(&self, user_id: i32, banned: bool) -> ResultEngine<()> {
        let user = require_user(&self.database, user_id).await?;
        let mut user: users::ActiveModel = user.into();
        user.is_banned = ActiveValue::Set(banned);
        user.update(&self.database).await?;
        Ok(())
    }

    pub async fn verify_user(&self, user_id: i32, verified: bool) -> ResultEngine<()> {
        let user = require_user(&self.database, user_id).await?;
        let mut user: users::ActiveModel = user.into();
        user.is_verified = ActiveValue::Set(verified);
        user.update(&self.database).await?;
        Ok(())
    }

    /// Overwrites the balance with an absolute value.
    pub async fn set_balance(&self, user_id: i32, balance: MoneyCents) -> ResultEngine<()> {
        if balance.is_negative() {
            return Err(EngineError::BalanceUnderflow(format!(
                "cannot set balance to {balance}"
            )));
        }

        let user = require_user(&self.database, user_id).await?;
        let mut user: users::ActiveModel = user.into();
        user.balance_cents = ActiveValue::Set(balance.cents());
        user.update(&self.database).await?;

        Ok(())
    }

    /// Applies a relative adjustment and returns the resulting balance.
    ///
    /// A delta that would drive the balance negative is rejected and nothing
    /// changes.
    pub async fn add_balance(&self, user_id: i32, delta: MoneyCents) -> ResultEngine<MoneyCents> {
        let db_tx = self.database.begin().await?;
        require_user(&db_tx, user_id).await?;

        if !apply_balance_delta(&db_tx, user_id, delta).await? {
            return Err(EngineError::BalanceUnderflow(format!(
                "cannot apply {delta}"
            )));
        }

        let user = require_user(&db_tx, user_id).await?;
        db_tx.commit().await?;

        Ok(MoneyCents::new(user.balance_cents))
    }

    /// Reads the maintenance flag; an absent row means off.
    pub async fn maintenance_status(&self) -> ResultEngine<bool> {
        let setting = system_settings::Entity::find_by_id(system_settings::MAINTENANCE_MODE_KEY)
            .one(&self.database)
            .await?;

        Ok(setting.is_some_and(|s| s.value == "true"))
    }

    /// Upserts the maintenance flag.
    pub async fn set_maintenance(&self, enabled: bool) -> ResultEngine<()> {
        let value = if enabled { "true" } else { "false" };
        let db_tx = self.database.begin().await?;

        match system_settings::Entity::find_by_id(system_settings::MAINTENANCE_MODE_KEY)
            .one(&db_tx)
            .await?
        {
            Some(setting) => {
                let mut setting: system_settings::ActiveModel = setting.into();
                setting.value = ActiveValue::Set(value.to_string());
                setting.updated_at = ActiveValue::Set(Utc::now());
                setting.update(&db_tx).await?;
            }
            None => {
                system_settings::ActiveModel {
                    key: ActiveValue::Set(system_settings::MAINTENANCE_MODE_KEY.to_string()),
                    value: ActiveValue::Set(value.to_string()),
                    updated_at: ActiveValue::Set(Utc::now()),
                }
                .insert(&db_tx)
                .await?;
            }
        }

        db_tx.commit().await?;
        Ok(())
    }
}
