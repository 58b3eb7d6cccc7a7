//! Moderation console endpoints.

use api_types::{
    Created,
    admin::{
        AdminCreate, AdminLookup, AdminQuery, AdminUpdate, AdminUserView, MaintenanceStatus,
        NewBalance,
    },
    games::PendingGameView,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use engine::{GameStatus, MoneyCents};

use crate::{ServerError, games, server::ServerState};

fn admin_user_view(user: engine::users::Model) -> AdminUserView {
    AdminUserView {
        id: user.id,
        email: user.email,
        username: user.username,
        avatar_url: user.avatar_url,
        role: user.role,
        balance_cents: user.balance_cents,
        is_banned: user.is_banned,
        is_verified: user.is_verified,
    }
}

/// `GET /admin`: user listing/search, moderation queue, maintenance flag.
pub async fn lookup(
    State(state): State<ServerState>,
    Query(query): Query<AdminQuery>,
) -> Result<Response, ServerError> {
    match query.action {
        AdminLookup::Users => {
            let users = state.engine.list_users(query.search.as_deref()).await?;
            let views: Vec<AdminUserView> = users.into_iter().map(admin_user_view).collect();
            Ok(Json(views).into_response())
        }
        AdminLookup::PendingGames => {
            let games = state.engine.list_games(GameStatus::Pending).await?;
            let views: Vec<PendingGameView> =
                games.into_iter().map(games::pending_view).collect();
            Ok(Json(views).into_response())
        }
        AdminLookup::MaintenanceStatus => {
            let maintenance_mode = state.engine.maintenance_status().await?;
            Ok(Json(MaintenanceStatus { maintenance_mode }).into_response())
        }
    }
}

/// `PUT /admin`: moderation and balance updates.
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<AdminUpdate>,
) -> Result<Response, ServerError> {
    match payload {
        AdminUpdate::BanUser { user_id, is_banned } => {
            state.engine.ban_user(user_id, is_banned).await?;
        }
        AdminUpdate::VerifyUser {
            user_id,
            is_verified,
        } => {
            state.engine.verify_user(user_id, is_verified).await?;
        }
        AdminUpdate::UpdateBalance {
            user_id,
            balance_cents,
        } => {
            state
                .engine
                .set_balance(user_id, MoneyCents::new(balance_cents))
                .await?;
        }
        AdminUpdate::AddBalance {
            user_id,
            amount_cents,
        } => {
            let new_balance = state
                .engine
                .add_balance(user_id, MoneyCents::new(amount_cents))
                .await?;
            return Ok(Json(NewBalance {
                new_balance_cents: new_balance.cents(),
            })
            .into_response());
        }
        AdminUpdate::ToggleMaintenance { enabled } => {
            state.engine.set_maintenance(enabled).await?;
        }
    }

    Ok(StatusCode::OK.into_response())
}

/// `POST /admin`: catalog additions (frames).
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AdminCreate>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    match payload {
        AdminCreate::CreateFrame {
            name,
            image_url,
            price_cents,
        } => {
            let id = state
                .engine
                .create_frame(&name, &image_url, MoneyCents::new(price_cents))
                .await?;
            Ok((StatusCode::CREATED, Json(Created { id })))
        }
    }
}
