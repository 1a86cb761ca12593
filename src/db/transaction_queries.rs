use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::{Holdings, Position, Transaction, UpdateTransaction};

// Insert and the holdings aggregate take any executor so the sell path can
// run both on one transaction; everything else reads straight off the pool.

pub async fn insert(
    executor: impl PgExecutor<'_>,
    transaction: &Transaction,
) -> Result<Transaction, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        "INSERT INTO transactions (id, user_id, asset_name, ticker, side, price, quantity, executed_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING id, user_id, asset_name, ticker, side, price, quantity, executed_at, created_at",
    )
    .bind(transaction.id)
    .bind(transaction.user_id)
    .bind(&transaction.asset_name)
    .bind(&transaction.ticker)
    .bind(&transaction.side)
    .bind(&transaction.price)
    .bind(&transaction.quantity)
    .bind(transaction.executed_at)
    .fetch_one(executor)
    .await
}

pub async fn fetch_history(pool: &PgPool, user_id: Uuid) -> Result<Vec<Transaction>, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        "SELECT id, user_id, asset_name, ticker, side, price, quantity, executed_at, created_at
         FROM transactions
         WHERE user_id = $1
         ORDER BY executed_at DESC, created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Summed BUY and SELL quantities for one (owner, ticker). `SUM` over zero
/// rows is NULL, so a missing BUY sum means the owner never bought the asset.
pub async fn fetch_holdings(
    executor: impl PgExecutor<'_>,
    user_id: Uuid,
    ticker: &str,
) -> Result<Holdings, sqlx::Error> {
    sqlx::query_as::<_, Holdings>(
        "SELECT SUM(quantity) FILTER (WHERE side = 'BUY')  AS bought,
                SUM(quantity) FILTER (WHERE side = 'SELL') AS sold
         FROM transactions
         WHERE user_id = $1 AND ticker = $2",
    )
    .bind(user_id)
    .bind(ticker)
    .fetch_one(executor)
    .await
}

pub async fn fetch_net_positions(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Position>, sqlx::Error> {
    sqlx::query_as::<_, Position>(
        "SELECT ticker,
                SUM(CASE WHEN side = 'BUY' THEN quantity ELSE -quantity END) AS quantity
         FROM transactions
         WHERE user_id = $1
         GROUP BY ticker
         ORDER BY ticker",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Field-restricted partial update scoped to the owner. Absent fields bind
/// NULL and COALESCE keeps the stored value.
pub async fn update_fields(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    update: &UpdateTransaction,
) -> Result<Option<Transaction>, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        "UPDATE transactions
         SET ticker   = COALESCE($3, ticker),
             price    = COALESCE($4, price),
             quantity = COALESCE($5, quantity)
         WHERE id = $1 AND user_id = $2
         RETURNING id, user_id, asset_name, ticker, side, price, quantity, executed_at, created_at",
    )
    .bind(id)
    .bind(user_id)
    .bind(&update.ticker)
    .bind(&update.price)
    .bind(&update.quantity)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM transactions WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
