use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::ServiceError;

/// Payload of both token kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// Stateless signing and verification of access and refresh tokens.
///
/// Access and refresh tokens are signed with distinct keys so one can never
/// be replayed as the other. Persistence of refresh tokens is a separate
/// concern, handled by the refresh-token repository.
#[derive(Clone)]
pub struct TokenManager {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
}

impl TokenManager {
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.access_token_key.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_token_key.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_token_key.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_token_key.as_bytes()),
            access_ttl_seconds: config.access_token_ttl_seconds,
            refresh_ttl_seconds: config.refresh_token_ttl_seconds,
        }
    }

    /// Mint a short-lived access token. Not persisted anywhere; any holder of
    /// a token with a valid signature is trusted until it expires.
    pub fn generate_access_token(&self, user_id: &str) -> Result<String, ServiceError> {
        sign(user_id, &self.access_encoding, self.access_ttl_seconds)
    }

    /// Mint a long-lived refresh token. The caller is responsible for
    /// persisting it so it can be revoked.
    pub fn generate_refresh_token(&self, user_id: &str) -> Result<String, ServiceError> {
        sign(user_id, &self.refresh_encoding, self.refresh_ttl_seconds)
    }

    /// Decode a refresh token and check its signature and expiry. Malformed,
    /// expired and tampered tokens all collapse into one generic error so the
    /// caller cannot distinguish which check failed.
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(
            token,
            &self.refresh_decoding,
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|_| ServiceError::invariant("refresh token is not valid"))
    }

    /// Decode an access token. All failure modes collapse into one generic
    /// authentication error.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(
            token,
            &self.access_decoding,
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|_| ServiceError::authentication("access token is not valid"))
    }
}

fn sign(user_id: &str, key: &EncodingKey, ttl_seconds: i64) -> Result<String, ServiceError> {
    let now = Utc::now().timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + ttl_seconds,
        iat: now,
    };

    encode(&Header::new(Algorithm::HS256), &claims, key)
        .map_err(|e| ServiceError::internal(format!("failed to sign token: {e}")))
}
