use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::db::listing_queries;
use crate::errors::AppError;
use crate::models::ListedAsset;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_listed_assets))
}

// Open catalog endpoint: the trade form needs it before login.
pub async fn list_listed_assets(
    State(state): State<AppState>,
) -> Result<Json<Vec<ListedAsset>>, AppError> {
    info!("GET /listings - Listing B3 catalog");
    let assets = listing_queries::fetch_all(&state.pool).await.map_err(|e| {
        error!("Failed to fetch B3 catalog: {}", e);
        AppError::Db(e)
    })?;
    Ok(Json(assets))
}
