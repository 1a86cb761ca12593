use sqlx::PgPool;
use uuid::Uuid;

use crate::db::transaction_queries;
use crate::errors::AppError;
use crate::models::Position;
use crate::services::transaction_service::normalize_ticker;

/// Net held quantity for one asset, recomputed from history. An asset the
/// owner never traded reports quantity 0, not an error.
pub async fn compute_position(
    pool: &PgPool,
    user_id: Uuid,
    ticker: &str,
) -> Result<Position, AppError> {
    let ticker = normalize_ticker(ticker)?;
    let holdings = transaction_queries::fetch_holdings(pool, user_id, &ticker).await?;
    Ok(Position {
        ticker,
        quantity: holdings.available(),
    })
}

pub async fn net_positions(pool: &PgPool, user_id: Uuid) -> Result<Vec<Position>, AppError> {
    let positions = transaction_queries::fetch_net_positions(pool, user_id).await?;
    Ok(positions)
}
