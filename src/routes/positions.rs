use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Extension, Json, Router};
use tracing::{error, info};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::Position;
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/:ticker", get(get_position))
}

pub async fn get_position(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(ticker): Path<String>,
) -> Result<Json<Position>, AppError> {
    info!("GET /positions/{} - Computing position for user {}", ticker, user.id);
    let position = services::position_service::compute_position(&state.pool, user.id, &ticker)
        .await
        .map_err(|e| {
            error!("Failed to compute position in {} for user {}: {}", ticker, user.id, e);
            e
        })?;
    Ok(Json(position))
}
