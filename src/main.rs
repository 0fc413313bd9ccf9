//! Trackline - Issue Tracker Backend
//! Mission: JSON REST API with JWT authentication plus the static frontend

use anyhow::{Context, Result};
use chrono::Duration;
use std::{fs, path::Path, sync::Arc};
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trackline_backend::{
    app,
    auth::{AuthState, JwtHandler, UserStore},
    config::Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    if let Some(parent) = Path::new(&config.database_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("Failed to create database directory")?;
        }
    }

    let user_store = Arc::new(UserStore::new(&config.database_path)?);
    let jwt_handler = Arc::new(JwtHandler::with_ttl(
        config.jwt_secret.clone(),
        Duration::hours(config.token_ttl_hours),
    ));
    let auth_state = AuthState::new(user_store, jwt_handler);
    info!("Connected to SQLite database at {}", config.database_path);

    // Non-API paths serve the frontend, unknown files fall back to the
    // login page (SPA behavior)
    let login_page = Path::new(&config.frontend_dir).join("login.html");
    let frontend = ServeDir::new(&config.frontend_dir)
        .not_found_service(ServeFile::new(login_page));

    let app = app(auth_state).fallback_service(frontend);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server is running on port {}", config.port);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
