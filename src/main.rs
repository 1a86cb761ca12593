use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::info;

use carteira_backend::app::create_app;
use carteira_backend::auth::AuthConfig;
use carteira_backend::db::schema;
use carteira_backend::external::brapi::BrapiProvider;
use carteira_backend::external::mock::MockQuoteProvider;
use carteira_backend::external::quote_provider::QuoteProvider;
use carteira_backend::logging::{self, LoggingConfig};
use carteira_backend::services::sell_locks::SellLocks;
use carteira_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    logging::init(LoggingConfig::from_env())?;

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;
    info!("✅ Connected to Postgres");

    schema::ensure_schema(&pool)
        .await
        .context("failed to ensure database schema")?;
    info!("✅ Database schema ready");

    let provider_name =
        std::env::var("QUOTE_PROVIDER").unwrap_or_else(|_| "brapi".to_string());
    let quotes: Arc<dyn QuoteProvider> = match provider_name.to_lowercase().as_str() {
        "brapi" => {
            info!("📈 Quote provider: brapi.dev");
            Arc::new(BrapiProvider::from_env())
        }
        "mock" => {
            info!("📈 Quote provider: mock (offline)");
            Arc::new(MockQuoteProvider::new())
        }
        other => anyhow::bail!("unknown QUOTE_PROVIDER {other:?}, expected brapi or mock"),
    };

    let state = AppState {
        pool,
        quotes,
        auth: AuthConfig::from_env()?,
        sell_locks: SellLocks::new(),
    };

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .context("PORT must be a number")?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("🚀 Carteira backend listening on http://{}/", addr);

    axum::serve(listener, create_app(state)).await?;
    Ok(())
}
