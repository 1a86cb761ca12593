use sqlx::PgPool;

use crate::models::ListedAsset;

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<ListedAsset>, sqlx::Error> {
    sqlx::query_as::<_, ListedAsset>(
        "SELECT ticker, company_name
         FROM listed_assets
         ORDER BY ticker",
    )
    .fetch_all(pool)
    .await
}
