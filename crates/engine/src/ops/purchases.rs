//! Purchase and revoke operations for games and frames.
//!
//! Both item kinds follow the same entitlement rules: one row per
//! (user, item), debit only when the row is actually inserted, refunds from
//! the recorded purchase price.

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    EngineError, MoneyCents, PurchaseOutcome, ResultEngine, entitlements, frames, game_purchases,
    games, user_frames, users,
};

use super::{Engine, apply_balance_delta, require_user};

impl Engine {
    /// Grants a game entitlement to `user_id`, debiting the catalog price.
    ///
    /// An already-owned game is `AlreadyOwned`: no second debit, no error.
    /// The debit is conditional on the balance covering the price; when it
    /// fails the entitlement insert rolls back with it.
    pub async fn purchase_game(&self, user_id: i32, game_id: i32) -> ResultEngine<PurchaseOutcome> {
        let db_tx = self.database.begin().await?;

        let game = games::Entity::find_by_id(game_id)
            .one(&db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("game not exists".to_string()))?;
        require_user(&db_tx, user_id).await?;

        if game_purchases::Entity::find_by_id((user_id, game_id))
            .one(&db_tx)
            .await?
            .is_some()
        {
            return Ok(PurchaseOutcome::AlreadyOwned);
        }

        let price = MoneyCents::new(game.price_cents);
        game_purchases::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            game_id: ActiveValue::Set(game_id),
            price_paid_cents: ActiveValue::Set(price.cents()),
            purchased_at: ActiveValue::Set(Utc::now()),
        }
        .insert(&db_tx)
        .await?;

        if !apply_balance_delta(&db_tx, user_id, -price).await? {
            return Err(EngineError::InsufficientFunds(format!(
                "balance does not cover {price}"
            )));
        }

        db_tx.commit().await?;
        Ok(PurchaseOutcome::Purchased)
    }

    /// Removes a game from the library, crediting 90% of the recorded
    /// purchase price. Returns the refund for caller display.
    pub async fn revoke_game(&self, user_id: i32, game_id: i32) -> ResultEngine<MoneyCents> {
        let db_tx = self.database.begin().await?;

        let purchase = game_purchases::Entity::find_by_id((user_id, game_id))
            .one(&db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("entitlement not exists".to_string()))?;

        let refund = entitlements::refund_amount(MoneyCents::new(purchase.price_paid_cents));
        purchase.delete(&db_tx).await?;
        if !apply_balance_delta(&db_tx, user_id, refund).await? {
            return Err(EngineError::KeyNotFound("user not exists".to_string()));
        }

        db_tx.commit().await?;
        Ok(refund)
    }

    /// Grants a frame entitlement, debiting the catalog price.
    ///
    /// Same rules as [`purchase_game`](Self::purchase_game).
    pub async fn purchase_frame(
        &self,
        user_id: i32,
        frame_id: i32,
    ) -> ResultEngine<PurchaseOutcome> {
        let db_tx = self.database.begin().await?;

        let frame = frames::Entity::find_by_id(frame_id)
            .one(&db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("frame not exists".to_string()))?;
        require_user(&db_tx, user_id).await?;

        if user_frames::Entity::find_by_id((user_id, frame_id))
            .one(&db_tx)
            .await?
            .is_some()
        {
            return Ok(PurchaseOutcome::AlreadyOwned);
        }

        let price = MoneyCents::new(frame.price_cents);
        user_frames::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            frame_id: ActiveValue::Set(frame_id),
            price_paid_cents: ActiveValue::Set(price.cents()),
            purchased_at: ActiveValue::Set(Utc::now()),
        }
        .insert(&db_tx)
        .await?;

        if !apply_balance_delta(&db_tx, user_id, -price).await? {
            return Err(EngineError::InsufficientFunds(format!(
                "balance does not cover {price}"
            )));
        }

        db_tx.commit().await?;
        Ok(PurchaseOutcome::Purchased)
    }

    /// Uninstalls a frame, crediting 90% of the recorded purchase price.
    ///
    /// An uninstalled frame that was the active one stops being referenced.
    pub async fn revoke_frame(&self, user_id: i32, frame_id: i32) -> ResultEngine<MoneyCents> {
        let db_tx = self.database.begin().await?;

        let entitlement = user_frames::Entity::find_by_id((user_id, frame_id))
            .one(&db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("entitlement not exists".to_string()))?;

        let refund = entitlements::refund_amount(MoneyCents::new(entitlement.price_paid_cents));
        entitlement.delete(&db_tx).await?;
        if !apply_balance_delta(&db_tx, user_id, refund).await? {
            return Err(EngineError::KeyNotFound("user not exists".to_string()));
        }

        let user = require_user(&db_tx, user_id).await?;
        if user.active_frame_id == Some(frame_id) {
            let mut user: users::ActiveModel = user.into();
            user.active_frame_id = ActiveValue::Set(None);
            user.update(&db_tx).await?;
        }

        db_tx.commit().await?;
        Ok(refund)
    }

    /// Games in the user's library, newest purchase first.
    pub async fn owned_games(&self, user_id: i32) -> ResultEngine<Vec<games::Model>> {
        let rows = game_purchases::Entity::find()
            .filter(game_purchases::Column::UserId.eq(user_id))
            .order_by_desc(game_purchases::Column::PurchasedAt)
            .find_also_related(games::Entity)
            .all(&self.database)
            .await?;

        Ok(rows.into_iter().filter_map(|(_, game)| game).collect())
    }

    /// Ids of the frames the user owns.
    pub async fn owned_frame_ids(&self, user_id: i32) -> ResultEngine<Vec<i32>> {
        Ok(user_frames::Entity::find()
            .filter(user_frames::Column::UserId.eq(user_id))
            .order_by_asc(user_frames::Column::FrameId)
            .all(&self.database)
            .await?
            .into_iter()
            .map(|row| row.frame_id)
            .collect())
    }
}
