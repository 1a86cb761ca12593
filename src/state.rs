use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::AuthConfig;
use crate::external::quote_provider::QuoteProvider;
use crate::services::sell_locks::SellLocks;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub quotes: Arc<dyn QuoteProvider>,
    pub auth: AuthConfig,
    pub sell_locks: SellLocks,
}
