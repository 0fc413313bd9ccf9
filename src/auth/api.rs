//! Authentication API Endpoints
//! Mission: Provide registration and login endpoints

use crate::auth::{
    jwt::JwtHandler,
    models::{AuthResponse, LoginRequest, RegisterRequest, User, UserRole, UserView},
    user_store::{StoreError, UserStore},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tokio::task;
use tracing::{error, info, warn};

/// Shared auth state: the store and signing handler are injected once
/// at startup, never read from ambient globals.
#[derive(Clone)]
pub struct AuthState {
    pub user_store: Arc<UserStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AuthState {
    pub fn new(user_store: Arc<UserStore>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            user_store,
            jwt_handler,
        }
    }
}

/// Register endpoint - POST /api/register
pub async fn register(
    State(state): State<AuthState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthApiError> {
    let username = payload.username.unwrap_or_default();
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();
    let role_tag = payload.role.unwrap_or_default();

    if username.trim().is_empty()
        || email.trim().is_empty()
        || password.is_empty()
        || role_tag.trim().is_empty()
    {
        return Err(AuthApiError::Validation("all fields are required"));
    }

    let role =
        UserRole::from_str(&role_tag).ok_or(AuthApiError::Validation("unknown role"))?;

    info!("Registration attempt: {}", email);

    // Pre-check for an existing account. The UNIQUE constraint at insert
    // time remains the final authority under concurrent registrations.
    let store = state.user_store.clone();
    let lookup_email = email.clone();
    let existing = task::spawn_blocking(move || store.find_by_email(&lookup_email))
        .await
        .map_err(|e| AuthApiError::Internal(e.into()))?
        .map_err(AuthApiError::from)?;

    if existing.is_some() {
        warn!("Registration rejected, email taken: {}", email);
        return Err(AuthApiError::Conflict);
    }

    // bcrypt derives a fresh per-user salt internally
    let plaintext = password;
    let password_hash = task::spawn_blocking(move || hash(&plaintext, DEFAULT_COST))
        .await
        .map_err(|e| AuthApiError::Internal(e.into()))?
        .map_err(|e| AuthApiError::Internal(e.into()))?;

    let store = state.user_store.clone();
    let insert_username = username.clone();
    let insert_email = email.clone();
    let stored_hash = password_hash.clone();
    let id = task::spawn_blocking(move || {
        store.insert_user(&insert_username, &insert_email, &stored_hash, role)
    })
    .await
    .map_err(|e| AuthApiError::Internal(e.into()))?
    .map_err(AuthApiError::from)?;

    let user = User {
        id,
        username,
        email,
        password_hash,
        role,
        created_at: Utc::now().to_rfc3339(),
    };

    let token = state
        .jwt_handler
        .generate_token(&user)
        .map_err(AuthApiError::Internal)?;

    info!("Registered user: {} (id {})", user.email, user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserView::from_user(&user),
        }),
    ))
}

/// Login endpoint - POST /api/login
pub async fn login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthApiError> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthApiError::Validation("email and password are required"));
    }

    info!("Login attempt: {}", email);

    let store = state.user_store.clone();
    let lookup_email = email.clone();
    let user = task::spawn_blocking(move || store.find_by_email(&lookup_email))
        .await
        .map_err(|e| AuthApiError::Internal(e.into()))?
        .map_err(AuthApiError::from)?;

    // Unknown email and wrong password must be indistinguishable
    let user = match user {
        Some(user) => user,
        None => {
            warn!("Failed login attempt: {}", email);
            return Err(AuthApiError::InvalidCredentials);
        }
    };

    let stored_hash = user.password_hash.clone();
    let valid = task::spawn_blocking(move || verify(&password, &stored_hash))
        .await
        .map_err(|e| AuthApiError::Internal(e.into()))?
        .map_err(|e| AuthApiError::Internal(e.into()))?;

    if !valid {
        warn!("Failed login attempt: {}", email);
        return Err(AuthApiError::InvalidCredentials);
    }

    let token = state
        .jwt_handler
        .generate_token(&user)
        .map_err(AuthApiError::Internal)?;

    info!("Login successful: {} ({})", user.email, user.role.as_str());

    Ok(Json(AuthResponse {
        token,
        user: UserView::from_user(&user),
    }))
}

/// Auth API errors
#[derive(Debug)]
pub enum AuthApiError {
    Validation(&'static str),
    Conflict,
    InvalidCredentials,
    MissingToken,
    InvalidToken,
    Store(anyhow::Error),
    Internal(anyhow::Error),
}

impl From<StoreError> for AuthApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => AuthApiError::Conflict,
            StoreError::Backend(e) => AuthApiError::Store(e),
        }
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AuthApiError::Conflict => (StatusCode::CONFLICT, "user already exists"),
            AuthApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid credentials"),
            AuthApiError::MissingToken => (StatusCode::UNAUTHORIZED, "no token provided"),
            AuthApiError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid token"),
            AuthApiError::Store(e) => {
                // Detail stays in the server log, never in the body
                error!("Store failure: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
            AuthApiError::Internal(e) => {
                error!("Internal failure: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
