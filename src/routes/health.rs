use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

// Liveness check. Stays out of the request logs.
async fn health_check() -> &'static str {
    "OK"
}
