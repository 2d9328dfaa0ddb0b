use crate::error::{AppError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub exp: i64,
}

/// Create a session token for an authenticated user.
pub fn create_jwt(user_id: Uuid, email: &str, secret: &str, expiration_hours: i64) -> Result<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(expiration_hours))
        .ok_or(AppError::InternalError)?
        .timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AppError::Authentication("Failed to create token".to_string()))
}

/// Create a password-reset token (short-lived, 15 minutes).
pub fn create_reset_token(user_id: Uuid, email: &str, secret: &str) -> Result<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::minutes(15))
        .ok_or(AppError::InternalError)?
        .timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AppError::Authentication("Failed to create reset token".to_string()))
}

/// Verify JWT token and extract claims
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_round_trip() {
        let user_id = Uuid::new_v4();
        let token = create_jwt(user_id, "test@example.com", "mysecretkey", 24).unwrap();
        let claims = verify_jwt(&token, "mysecretkey").unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "test@example.com");
    }

    #[test]
    fn test_jwt_rejects_wrong_secret() {
        let token = create_jwt(Uuid::new_v4(), "test@example.com", "mysecretkey", 24).unwrap();
        assert!(verify_jwt(&token, "othersecret").is_err());
    }

    #[test]
    fn test_reset_token_verifies() {
        let user_id = Uuid::new_v4();
        let token = create_reset_token(user_id, "test@example.com", "mysecretkey").unwrap();
        let claims = verify_jwt(&token, "mysecretkey").unwrap();
        assert_eq!(claims.sub, user_id.to_string());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = create_jwt(Uuid::new_v4(), "test@example.com", "mysecretkey", -1).unwrap();
        assert!(verify_jwt(&token, "mysecretkey").is_err());
    }
}
