//! Server configuration loaded from the environment.

use anyhow::Result;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub jwt_secret: String,
    pub frontend_dir: String,
    pub token_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .unwrap_or(8000);

        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "./db/tracker.db".to_string());

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using insecure development default");
            "dev-secret-change-me".to_string()
        });

        let frontend_dir =
            std::env::var("FRONTEND_DIR").unwrap_or_else(|_| "./frontend".to_string());

        let token_ttl_hours = std::env::var("TOKEN_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|&v| v > 0)
            .unwrap_or(24);

        Ok(Self {
            port,
            database_path,
            jwt_secret,
            frontend_dir,
            token_ttl_hours,
        })
    }
}
