use axum::extract::State;
use axum::routing::get;
use axum::{Extension, Json, Router};
use tracing::{error, info};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::PortfolioValuation;
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/valuation", get(get_valuation))
}

pub async fn get_valuation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<PortfolioValuation>, AppError> {
    info!("GET /portfolio/valuation - Valuing portfolio of user {}", user.id);
    let valuation =
        services::valuation_service::portfolio_valuation(&state.pool, &*state.quotes, user.id)
            .await
            .map_err(|e| {
                error!("Failed to value portfolio of user {}: {}", user.id, e);
                e
            })?;
    Ok(Json(valuation))
}
