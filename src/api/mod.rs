//! Public API handlers outside the auth core.

use crate::auth::{api::AuthApiError, middleware::extract_claims};
use axum::{extract::Request, http::StatusCode, Json};
use serde_json::{json, Value};

/// Liveness probe - GET /api/status
pub async fn status() -> Json<Value> {
    Json(json!({ "status": "Server is running" }))
}

/// Protected probe - GET /api/protected
///
/// Runs behind the auth gate; echoes the identity the gate attached.
pub async fn protected(req: Request) -> Result<Json<Value>, AuthApiError> {
    let claims = extract_claims(&req).ok_or(AuthApiError::MissingToken)?;

    Ok(Json(json!({
        "message": "Access granted to protected route",
        "user": claims,
    })))
}

/// Catch-all for unknown /api paths, so they 404 as JSON instead of
/// falling through to the SPA page.
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}
