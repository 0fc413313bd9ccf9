//! JWT Token Handler
//! Mission: Generate and validate JWT tokens securely

use crate::auth::models::{Claims, User};
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

/// JWT Handler for token operations
pub struct JwtHandler {
    secret: String,
    ttl: Duration,
}

impl JwtHandler {
    /// Create a new JWT handler with secret key (24-hour tokens)
    pub fn new(secret: String) -> Self {
        Self::with_ttl(secret, Duration::hours(24))
    }

    /// Create a handler with a custom token lifetime
    pub fn with_ttl(secret: String, ttl: Duration) -> Self {
        Self { secret, ttl }
    }

    /// Generate a signed token carrying the user's identity at issuance time
    pub fn generate_token(&self, user: &User) -> Result<String> {
        let expiration = Utc::now()
            .checked_add_signed(self.ttl)
            .context("Invalid timestamp")?
            .timestamp() as usize;

        let claims = Claims {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: expiration,
        };

        debug!(
            "Generating JWT for user {} ({}), expires at {}",
            user.email, user.id, expiration
        );

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to generate JWT")
    }

    /// Validate a token's signature and expiration and extract claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .context("Invalid or expired token")?;

        debug!("Validated JWT for user {}", decoded.claims.email);

        Ok(decoded.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::UserRole;

    fn create_test_user() -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::Developer,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    #[test]
    fn test_jwt_generation_and_validation() {
        let handler = JwtHandler::new("test-secret-key-12345".to_string());
        let user = create_test_user();

        let token = handler.generate_token(&user).unwrap();
        assert!(!token.is_empty());

        let claims = handler.validate_token(&token).unwrap();
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, user.role);
        assert!(claims.exp > Utc::now().timestamp() as usize);
    }

    #[test]
    fn test_invalid_token_rejected() {
        let handler = JwtHandler::new("test-secret-key-12345".to_string());

        let result = handler.validate_token("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let handler = JwtHandler::new("test-secret-key-12345".to_string());
        let token = handler.generate_token(&create_test_user()).unwrap();

        // Flip a character in the signature segment
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(handler.validate_token(&tampered).is_err());
    }

    #[test]
    fn test_different_secrets_reject() {
        let handler1 = JwtHandler::new("secret1".to_string());
        let handler2 = JwtHandler::new("secret2".to_string());

        let token = handler1.generate_token(&create_test_user()).unwrap();
        assert!(handler2.validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative TTL mints a token that is already past its exp
        let handler =
            JwtHandler::with_ttl("test-secret-key-12345".to_string(), Duration::hours(-1));
        let token = handler.generate_token(&create_test_user()).unwrap();

        assert!(handler.validate_token(&token).is_err());
    }
}
