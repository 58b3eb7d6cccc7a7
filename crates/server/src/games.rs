//! Game API endpoints: catalog listing, submission, purchase, moderation
//! status and library revokes.

use api_types::{
    Created, GameStatus as ApiStatus, RefundResponse,
    games::{GameRequest, GameRevoke, GameStatusUpdate, GameView, GamesQuery, PendingGameView},
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use engine::{EngineError, GameSubmission, MoneyCents};

use crate::{ServerError, server::ServerState};

pub(crate) fn map_status(status: ApiStatus) -> engine::GameStatus {
    match status {
        ApiStatus::Pending => engine::GameStatus::Pending,
        ApiStatus::Approved => engine::GameStatus::Approved,
        ApiStatus::Rejected => engine::GameStatus::Rejected,
    }
}

fn map_status_api(status: engine::GameStatus) -> ApiStatus {
    match status {
        engine::GameStatus::Pending => ApiStatus::Pending,
        engine::GameStatus::Approved => ApiStatus::Approved,
        engine::GameStatus::Rejected => ApiStatus::Rejected,
    }
}

pub(crate) fn game_view(game: engine::games::Model) -> Result<GameView, EngineError> {
    let status = map_status_api(engine::GameStatus::try_from(game.status.as_str())?);

    Ok(GameView {
        id: game.id,
        title: game.title,
        description: game.description,
        genre: game.genre,
        age_rating: game.age_rating,
        price_cents: game.price_cents,
        logo_url: game.logo_url,
        file_url: game.file_url,
        status,
        created_by: game.created_by,
    })
}

pub(crate) fn pending_view(game: engine::games::Model) -> PendingGameView {
    PendingGameView {
        id: game.id,
        title: game.title,
        description: game.description,
        genre: game.genre,
        age_rating: game.age_rating,
        price_cents: game.price_cents,
        logo_url: game.logo_url,
        file_url: game.file_url,
        contact_email: game.contact_email,
        engine_type: game.engine_type,
        created_by: game.created_by,
    }
}

/// `GET /games`: catalog filtered by moderation status (approved by
/// default).
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<GamesQuery>,
) -> Result<Json<Vec<GameView>>, ServerError> {
    let status = query.status.unwrap_or(ApiStatus::Approved);
    let games = state.engine.list_games(map_status(status)).await?;
    let views = games
        .into_iter()
        .map(game_view)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(views))
}

/// `POST /games`: submit for moderation or purchase.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<GameRequest>,
) -> Result<Response, ServerError> {
    match payload {
        GameRequest::Submit {
            title,
            description,
            genre,
            age_rating,
            price_cents,
            logo_url,
            file_url,
            contact_email,
            engine_type,
            user_id,
        } => {
            let id = state
                .engine
                .submit_game(GameSubmission {
                    title,
                    description,
                    genre,
                    age_rating,
                    price: MoneyCents::new(price_cents),
                    logo_url,
                    file_url,
                    contact_email,
                    engine_type,
                    created_by: user_id,
                })
                .await?;
            Ok((StatusCode::CREATED, Json(Created { id })).into_response())
        }
        GameRequest::Purchase { user_id, game_id } => {
            state.engine.purchase_game(user_id, game_id).await?;
            Ok(StatusCode::OK.into_response())
        }
    }
}

/// `PUT /games`: moderation decision.
pub async fn set_status(
    State(state): State<ServerState>,
    Json(payload): Json<GameStatusUpdate>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .set_game_status(payload.game_id, map_status(payload.status))
        .await?;

    Ok(StatusCode::OK)
}

/// `DELETE /games`: remove from the library for a 90% refund.
pub async fn revoke(
    State(state): State<ServerState>,
    Json(payload): Json<GameRevoke>,
) -> Result<Json<RefundResponse>, ServerError> {
    let refund = state
        .engine
        .revoke_game(payload.user_id, payload.game_id)
        .await?;

    Ok(Json(RefundResponse {
        refund_cents: refund.cents(),
    }))
}
