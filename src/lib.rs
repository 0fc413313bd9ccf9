//! Trackline Backend Library
//!
//! Issue-tracker REST backend: registration/login with bcrypt-hashed
//! credentials, JWT session tokens, and a gated protected surface.
//! Exposes the modules and router for use by the binary and tests.

pub mod api;
pub mod auth;
pub mod config;
pub mod middleware;

use auth::{auth_middleware, AuthState};
use axum::{
    middleware as axum_middleware,
    routing::{any, get, post},
    Router,
};
use tower_http::cors::CorsLayer;

/// Assemble the API router.
///
/// Public: register, login, status. Everything else sits behind the
/// token gate via `route_layer`, so unauthenticated requests are
/// rejected before the handler runs.
pub fn app(state: AuthState) -> Router {
    let public = Router::new()
        .route("/api/register", post(auth::api::register))
        .route("/api/login", post(auth::api::login))
        .route("/api/status", get(api::status));

    let protected = Router::new()
        .route("/api/protected", get(api::protected))
        .route_layer(axum_middleware::from_fn_with_state(
            state.jwt_handler.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .route("/api/*rest", any(api::not_found))
        .with_state(state)
        .layer(axum_middleware::from_fn(middleware::request_logging))
        .layer(CorsLayer::permissive())
}
