use axum::extract::{Path, State};
use axum::routing::{delete, get, post, put};
use axum::{Extension, Json, Router};
use http::StatusCode;
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{CreateTransaction, Transaction, UpdateTransaction};
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/buy", post(record_buy))
        .route("/sell", post(record_sell))
        .route("/", get(list_history))
        .route("/:id", put(update_transaction))
        .route("/:id", delete(delete_transaction))
}

#[axum::debug_handler]
pub async fn record_buy(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(data): Json<CreateTransaction>,
) -> Result<Json<Transaction>, AppError> {
    info!("POST /transactions/buy - Recording buy for user {}", user.id);
    let created = services::transaction_service::record_buy(&state.pool, user.id, data)
        .await
        .map_err(|e| {
            error!("Failed to record buy for user {}: {}", user.id, e);
            e
        })?;
    Ok(Json(created))
}

pub async fn record_sell(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(data): Json<CreateTransaction>,
) -> Result<Json<Transaction>, AppError> {
    info!("POST /transactions/sell - Recording sell for user {}", user.id);
    let created =
        services::transaction_service::record_sell(&state.pool, &state.sell_locks, user.id, data)
            .await
            .map_err(|e| {
                error!("Failed to record sell for user {}: {}", user.id, e);
                e
            })?;
    Ok(Json(created))
}

pub async fn list_history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    info!("GET /transactions - Listing history for user {}", user.id);
    let transactions = services::transaction_service::history(&state.pool, user.id)
        .await
        .map_err(|e| {
            error!("Failed to list history for user {}: {}", user.id, e);
            e
        })?;
    Ok(Json(transactions))
}

pub async fn update_transaction(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateTransaction>,
) -> Result<Json<Transaction>, AppError> {
    info!("PUT /transactions/{} - Updating transaction", id);
    let updated = services::transaction_service::edit(&state.pool, user.id, id, update)
        .await
        .map_err(|e| {
            error!("Failed to update transaction {}: {}", id, e);
            e
        })?;
    Ok(Json(updated))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /transactions/{} - Deleting transaction", id);
    services::transaction_service::remove(&state.pool, user.id, id)
        .await
        .map_err(|e| {
            error!("Failed to delete transaction {}: {}", id, e);
            e
        })?;
    Ok(StatusCode::NO_CONTENT)
}
