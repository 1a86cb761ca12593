use sqlx::PgPool;

/// Starter catalog for a fresh database. The trade form offers exactly
/// these, so every ticker listed here must also pass trade validation.
pub(crate) const SEED_LISTINGS: &[(&str, &str)] = &[
    ("PETR4", "Petrobras PN"),
    ("VALE3", "Vale ON"),
    ("ITUB4", "Itaú Unibanco PN"),
    ("BBDC4", "Bradesco PN"),
    ("ABEV3", "Ambev ON"),
    ("BBAS3", "Banco do Brasil ON"),
    ("WEGE3", "WEG ON"),
    ("MGLU3", "Magazine Luiza ON"),
    ("B3SA3", "B3 ON"),
    ("SUZB3", "Suzano ON"),
    ("RENT3", "Localiza ON"),
    ("LREN3", "Lojas Renner ON"),
    ("EMBR3", "Embraer ON"),
    ("GGBR4", "Gerdau PN"),
    ("SANB11", "Santander Brasil UNT"),
];

/// Brings the database up to the schema this service expects. Every
/// statement is idempotent, so running it on every boot is safe.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS transactions (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL,
            asset_name TEXT NOT NULL,
            ticker TEXT NOT NULL,
            side TEXT NOT NULL CHECK (side IN ('BUY', 'SELL')),
            price NUMERIC NOT NULL CHECK (price > 0),
            quantity NUMERIC NOT NULL CHECK (quantity > 0),
            executed_at DATE NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_transactions_user_ticker
        ON transactions (user_id, ticker)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_transactions_user_executed_at
        ON transactions (user_id, executed_at)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS listed_assets (
            ticker TEXT PRIMARY KEY,
            company_name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    seed_listed_assets(pool).await
}

/// Seeds the starter set; rows added or edited by operators are never
/// overwritten.
async fn seed_listed_assets(pool: &PgPool) -> Result<(), sqlx::Error> {
    for &(ticker, company_name) in SEED_LISTINGS {
        sqlx::query(
            "INSERT INTO listed_assets (ticker, company_name)
             VALUES ($1, $2)
             ON CONFLICT (ticker) DO NOTHING",
        )
        .bind(ticker)
        .bind(company_name)
        .execute(pool)
        .await?;
    }
    Ok(())
}
