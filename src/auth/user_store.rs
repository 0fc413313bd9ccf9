//! User Storage
//! Mission: Securely store and manage user accounts with SQLite

use crate::auth::models::{User, UserRole};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode};
use std::fmt;
use tracing::info;

/// Store failure split the API layer cares about: a uniqueness
/// violation is the client's problem, everything else is ours.
#[derive(Debug)]
pub enum StoreError {
    /// UNIQUE constraint hit on insert (email or username taken)
    Conflict,
    /// Connectivity/query failure
    Backend(anyhow::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Conflict => write!(f, "unique constraint violation"),
            StoreError::Backend(e) => write!(f, "store backend error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(e, _) = &err {
            if e.code == ErrorCode::ConstraintViolation {
                return StoreError::Conflict;
            }
        }
        StoreError::Backend(err.into())
    }
}

/// User storage with SQLite backend
pub struct UserStore {
    db_path: String,
}

impl UserStore {
    /// Create a new user store and initialize the tracker schema
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    /// Initialize database schema.
    ///
    /// Creates the full issue-tracker schema. Only `users` is touched by
    /// the auth layer; the remaining tables back the tracker's CRUD
    /// endpoints and are created here so a fresh database is complete.
    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS projects (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT,
                created_by INTEGER,
                created_at TEXT DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (created_by) REFERENCES users (id)
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS sprints (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                project_id INTEGER,
                start_date TEXT,
                end_date TEXT,
                status TEXT NOT NULL,
                FOREIGN KEY (project_id) REFERENCES projects (id)
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS issues (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                status TEXT NOT NULL,
                project_id INTEGER,
                assignee_id INTEGER,
                sprint_id INTEGER,
                created_at TEXT DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (project_id) REFERENCES projects (id),
                FOREIGN KEY (assignee_id) REFERENCES users (id),
                FOREIGN KEY (sprint_id) REFERENCES sprints (id)
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS comments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                issue_id INTEGER,
                user_id INTEGER,
                comment_text TEXT NOT NULL,
                created_at TEXT DEFAULT CURRENT_TIMESTAMP,
                parent_comment_id INTEGER,
                FOREIGN KEY (issue_id) REFERENCES issues (id),
                FOREIGN KEY (user_id) REFERENCES users (id),
                FOREIGN KEY (parent_comment_id) REFERENCES comments (id)
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS notifications (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER,
                type TEXT NOT NULL,
                message TEXT NOT NULL,
                read_status INTEGER DEFAULT 0,
                created_at TEXT DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (user_id) REFERENCES users (id)
            )",
            [],
        )?;

        Ok(())
    }

    /// Look up a user by email (the login key)
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let conn = Connection::open(&self.db_path)
            .context("Failed to open database")
            .map_err(StoreError::Backend)?;

        let mut stmt = conn.prepare(
            "SELECT id, username, email, password_hash, role, created_at
             FROM users WHERE email = ?1",
        )?;

        let user_result = stmt.query_row(params![email], |row| {
            let role_str: String = row.get(4)?;
            Ok(User {
                id: row.get(0)?,
                username: row.get(1)?,
                email: row.get(2)?,
                password_hash: row.get(3)?,
                role: UserRole::from_str(&role_str).unwrap_or(UserRole::Developer),
                created_at: row.get(5)?,
            })
        });

        match user_result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert a new user and return the assigned id.
    ///
    /// The UNIQUE constraints on email/username are the final authority
    /// under concurrent registrations; a violation here surfaces as
    /// `StoreError::Conflict`, never as a generic backend failure.
    pub fn insert_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<i64, StoreError> {
        let conn = Connection::open(&self.db_path)
            .context("Failed to open database")
            .map_err(StoreError::Backend)?;

        conn.execute(
            "INSERT INTO users (username, email, password_hash, role, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                username,
                email,
                password_hash,
                role.as_str(),
                Utc::now().to_rfc3339(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        info!("Created user: {} ({})", username, role.as_str());

        Ok(id)
    }
}
