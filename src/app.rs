use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::auth;
use crate::routes::{health, listings, portfolio, positions, transactions};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    // Everything under /api requires a bearer token except the B3 catalog,
    // which the trade form needs before login.
    let protected = Router::new()
        .nest("/api/transactions", transactions::router())
        .nest("/api/positions", positions::router())
        .nest("/api/portfolio", portfolio::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .nest("/health", health::router())
        .nest("/api/listings", listings::router())
        .merge(protected)
        // The SPA frontend is served from another origin.
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}
