//! Router configuration for the HTTP API.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, AppState};

/// Create the application router with all routes and middleware.
///
/// Every response, including 404/405, carries a JSON `{"message": ...}` body.
/// Only GET is served: HEAD is routed explicitly since axum would otherwise
/// answer it with the GET handler.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/health",
            get(handlers::health)
                .head(handlers::method_not_allowed)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/weatherbycep/",
            get(handlers::missing_cep)
                .head(handlers::method_not_allowed)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/weatherbycep/*cep",
            get(handlers::weather_by_cep)
                .head(handlers::method_not_allowed)
                .fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::endpoint_not_found)
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
