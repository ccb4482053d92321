use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    error::{AppError, Result},
    models::{User, UserRole},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub role: UserRole,
    pub exp: usize,
}

pub fn generate_token(config: &AuthConfig, user: &User) -> Result<String> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(config.token_ttl_hours))
        .ok_or_else(|| AppError::InternalError("Failed to calculate expiration".to_string()))?
        .timestamp();

    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        role: user.role,
        exp: usize::try_from(expiration)
            .map_err(|_| AppError::InternalError("Token expiration out of range".to_string()))?,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalError(format!("Token generation failed: {}", e)))
}

pub fn verify_token(config: &AuthConfig, token: &str) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::warn!("Rejected bearer token: {}", e);
        AppError::Unauthorized("Invalid or expired token".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            token_ttl_hours: 1,
        }
    }

    fn seller() -> User {
        User {
            id: Uuid::new_v4(),
            username: "seller".to_string(),
            email: "seller@example.com".to_string(),
            password: String::new(),
            role: UserRole::Seller,
            registered_at: Utc::now(),
        }
    }

    #[test]
    fn round_trips_identity_and_role() {
        let user = seller();
        let token = generate_token(&config("secret"), &user).unwrap();
        let claims = verify_token(&config("secret"), &token).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.username, "seller");
        assert_eq!(claims.role, UserRole::Seller);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = generate_token(&config("secret"), &seller()).unwrap();
        let err = verify_token(&config("another"), &token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn rejects_expired_token() {
        let expired = AuthConfig {
            jwt_secret: "secret".to_string(),
            token_ttl_hours: -2,
        };
        let token = generate_token(&expired, &seller()).unwrap();
        assert!(verify_token(&expired, &token).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(verify_token(&config("secret"), "not.a.token").is_err());
    }
}
