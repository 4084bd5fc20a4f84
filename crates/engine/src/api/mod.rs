//! API layer - HTTP entry points.

pub mod cors;
pub mod http;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::app::App;

/// Assemble the full router: routes, request tracing and the CORS policy.
pub fn router(app: Arc<App>, allowed_origins: &[String]) -> Router {
    let mut router = http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    match cors::cors_layer(allowed_origins) {
        Some(cors) => router = router.layer(cors),
        None => tracing::warn!("No CORS origins configured; cross-origin requests will be refused"),
    }

    router
}
