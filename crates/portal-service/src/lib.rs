//! # portal-service
//!
//! HTTP JSON API for the Silver knowledge portal. Exposes the portal-query
//! operations over axum, with input validation, per-IP rate limiting, and
//! permissive CORS for the dashboard frontend.

#![warn(missing_docs)]

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use portal_query::PortalSource;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;

pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod validate;

pub use error::ApiError;
pub use rate_limit::RateLimiter;

/// Shared state for all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The portal data source handlers query.
    pub source: Arc<dyn PortalSource>,
    /// The per-IP request limiter.
    pub limiter: Arc<RateLimiter>,
}

/// Content-Security-Policy applied to every response.
const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; script-src 'self' 'unsafe-inline'; \
     style-src 'self' 'unsafe-inline'; img-src 'self' data: https:; font-src 'self' data:;";

/// Builds the API router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/index", get(routes::get_index))
        .route("/api/concepts", get(routes::get_concepts))
        .route("/api/pmid", post(routes::post_pmids))
        .route("/api/study", post(routes::post_study))
        .route("/api/type_population", post(routes::post_type_population))
        .route("/api/extradata/:table", post(routes::post_extradata))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::enforce,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
