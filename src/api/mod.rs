//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP API endpoints of the CMS backend.
//! It includes:
//! - Page endpoints (landing, team, about us, footer, code of conduct, collaborators)
//! - Event listing and event filter endpoints
//! - The uniform error envelope

pub mod cms;
pub mod common;
pub mod events;
pub mod middleware;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{ApiError, AppState, ErrorResponse};

/// Prefix every CMS route is served under
pub const API_PREFIX: &str = "/api/cms/v1";

/// Build the CMS API router
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .merge(cms::router())
        .merge(events::router())
        .method_not_allowed_fallback(middleware::method_not_allowed_fallback)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .nest(API_PREFIX, build_api_router())
        .fallback(middleware::not_found_fallback)
        .layer(axum_middleware::from_fn(middleware::error_details))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
