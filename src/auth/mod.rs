use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config;

pub mod password;

/// Claims embedded in the session token. Validity is purely
/// cryptographic/time-based; nothing is stored server-side.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(id: i32, email: String) -> Self {
        let now = Utc::now();
        let ttl = config::config().security.token_ttl_secs;
        let exp = (now + Duration::seconds(ttl)).timestamp();

        Self {
            id,
            email,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

pub fn generate_jwt(claims: Claims) -> Result<String, JwtError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, &claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    #[test]
    fn claims_expire_after_configured_ttl() {
        let claims = Claims::new(7, "user@example.com".to_string());
        let ttl = config::config().security.token_ttl_secs;
        assert_eq!(claims.exp - claims.iat, ttl);
    }

    #[test]
    fn generated_token_decodes_with_same_secret() {
        let token = generate_jwt(Claims::new(42, "a@b.com".to_string())).expect("token");

        let secret = &config::config().security.jwt_secret;
        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .expect("decode");

        assert_eq!(decoded.claims.id, 42);
        assert_eq!(decoded.claims.email, "a@b.com");
    }

    #[test]
    fn tampered_token_fails_to_decode() {
        let token = generate_jwt(Claims::new(1, "a@b.com".to_string())).expect("token");
        let mut tampered = token.clone();
        tampered.push('x');

        let secret = &config::config().security.jwt_secret;
        let result = decode::<Claims>(
            &tampered,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
