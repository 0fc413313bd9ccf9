//! Authentication Models
//! Mission: Define secure user and authentication data structures

use serde::{Deserialize, Serialize};

/// User account row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub role: UserRole,
    pub created_at: String,
}

/// User roles for the issue tracker
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserRole {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "manager")]
    Manager, // Project/sprint ownership
    #[serde(rename = "developer")]
    Developer,
    #[serde(rename = "tester")]
    Tester,
}

impl UserRole {
    pub fn as_str(&self) -> &str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Developer => "developer",
            UserRole::Tester => "tester",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(UserRole::Admin),
            "manager" => Some(UserRole::Manager),
            "developer" => Some(UserRole::Developer),
            "tester" => Some(UserRole::Tester),
            _ => None,
        }
    }
}

/// JWT Claims payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: i64,
    pub email: String,
    pub role: UserRole,
    pub exp: usize, // expiration timestamp (seconds since epoch)
}

/// Registration request body.
///
/// Fields are optional at the serde layer so an absent field reports
/// as a validation error (400), not a body-shape rejection.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Login request body
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Register/login success response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserView,
}

/// Public user view (sanitized - no hash)
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

impl UserView {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_serialization() {
        let admin = UserRole::Admin;
        let json = serde_json::to_string(&admin).unwrap();
        assert_eq!(json, r#""admin""#);

        let dev: UserRole = serde_json::from_str(r#""developer""#).unwrap();
        assert_eq!(dev, UserRole::Developer);
    }

    #[test]
    fn test_user_role_string_conversion() {
        assert_eq!(UserRole::Manager.as_str(), "manager");
        assert_eq!(UserRole::from_str("TESTER"), Some(UserRole::Tester));
        assert_eq!(UserRole::from_str("superuser"), None);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User {
            id: 7,
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            role: UserRole::Developer,
            created_at: "2025-01-01T00:00:00Z".to_string(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("$2b$"));
    }

    #[test]
    fn test_claims_wire_format_is_camel_case() {
        let claims = Claims {
            user_id: 42,
            email: "a@x.com".to_string(),
            role: UserRole::Tester,
            exp: 1_900_000_000,
        };

        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains(r#""userId":42"#));
        assert!(json.contains(r#""role":"tester""#));
    }
}
