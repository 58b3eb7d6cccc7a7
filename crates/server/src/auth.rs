//! Account API endpoints: credentials, library/frame lookups, profile
//! updates and frame uninstalls.

use api_types::{
    RefundResponse,
    auth::{AuthLookup, AuthQuery, AuthRequest, FrameUninstall, ProfileUpdate, UserProfile},
    frames::FrameView,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{ServerError, games, server::ServerState};

fn profile_view(user: engine::users::Model) -> UserProfile {
    UserProfile {
        id: user.id,
        email: user.email,
        username: user.username,
        avatar_url: user.avatar_url,
        role: user.role,
        balance_cents: user.balance_cents,
        is_verified: user.is_verified,
        time_spent_hours: user.time_spent_hours,
        active_frame_id: user.active_frame_id,
    }
}

fn frame_view(frame: engine::frames::Model) -> FrameView {
    FrameView {
        id: frame.id,
        name: frame.name,
        image_url: frame.image_url,
        price_cents: frame.price_cents,
    }
}

fn require_user_id(user_id: Option<i32>) -> Result<i32, ServerError> {
    user_id.ok_or_else(|| ServerError::Generic("user_id is required".to_string()))
}

/// `POST /auth`: login, register, or buy a frame.
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<AuthRequest>,
) -> Result<Response, ServerError> {
    match payload {
        AuthRequest::Login { email, password } => {
            let user = state.engine.login(&email, &password).await?;
            Ok(Json(profile_view(user)).into_response())
        }
        AuthRequest::Register {
            email,
            password,
            username,
        } => {
            let user = state.engine.register(&email, &password, &username).await?;
            Ok(Json(profile_view(user)).into_response())
        }
        AuthRequest::PurchaseFrame { user_id, frame_id } => {
            state.engine.purchase_frame(user_id, frame_id).await?;
            Ok(StatusCode::OK.into_response())
        }
    }
}

/// `GET /auth`: library, frame catalog, or owned frame ids.
pub async fn lookup(
    State(state): State<ServerState>,
    Query(query): Query<AuthQuery>,
) -> Result<Response, ServerError> {
    match query.action {
        AuthLookup::Library => {
            let user_id = require_user_id(query.user_id)?;
            let library = state.engine.owned_games(user_id).await?;
            let views = library
                .into_iter()
                .map(games::game_view)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Json(views).into_response())
        }
        AuthLookup::Frames => {
            let frames = state.engine.list_frames().await?;
            let views: Vec<FrameView> = frames.into_iter().map(frame_view).collect();
            Ok(Json(views).into_response())
        }
        AuthLookup::UserFrames => {
            let user_id = require_user_id(query.user_id)?;
            let frame_ids = state.engine.owned_frame_ids(user_id).await?;
            Ok(Json(frame_ids).into_response())
        }
    }
}

/// `PUT /auth`: profile fields or the active frame.
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<ProfileUpdate>,
) -> Result<StatusCode, ServerError> {
    match payload {
        ProfileUpdate::UpdateProfile {
            user_id,
            username,
            avatar_url,
        } => {
            state
                .engine
                .update_profile(user_id, username, avatar_url)
                .await?;
        }
        ProfileUpdate::SetFrame { user_id, frame_id } => {
            state.engine.set_active_frame(user_id, frame_id).await?;
        }
    }

    Ok(StatusCode::OK)
}

/// `DELETE /auth`: uninstall a frame for a 90% refund.
pub async fn uninstall_frame(
    State(state): State<ServerState>,
    Json(payload): Json<FrameUninstall>,
) -> Result<Json<RefundResponse>, ServerError> {
    let refund = state
        .engine
        .revoke_frame(payload.user_id, payload.frame_id)
        .await?;

    Ok(Json(RefundResponse {
        refund_cents: refund.cents(),
    }))
}
