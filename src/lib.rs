pub mod config;
pub mod db;
pub mod envelope;
pub mod error;
pub mod metadata;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod validation;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::DocumentStore;
use crate::error::AppError;
use crate::middleware::error_envelope::wrap_framework_errors;
use crate::state::{AppState, SharedState};

pub fn build_app(store: Arc<dyn DocumentStore>, config: Config) -> Router {
    let cors = cors_layer(&config.cors_origins);
    let max_body_size = config.max_body_size;

    let state: SharedState = Arc::new(AppState { store, config });

    Router::new()
        .nest("/api", routes::api_routes())
        .route("/health", axum::routing::get(health))
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(wrap_framework_errors))
                .layer(RequestBodyLimitLayer::new(max_body_size))
                .layer(cors)
                .layer(DefaultBodyLimit::disable()),
        )
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

fn cors_layer(origins: &[HeaderValue]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins.iter().cloned())
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

async fn health() -> &'static str {
    "ok"
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
