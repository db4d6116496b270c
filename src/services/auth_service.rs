//! Domain service for the login/refresh/logout flows.

use serde::Serialize;

use crate::error::ServiceError;

/// Both tokens handed out by a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Composes the credential store and the token service.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials, stamps the login time, mints both tokens and
    /// persists the refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Authentication`] when the credentials do not
    /// match, without revealing whether the username or the password failed.
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ServiceError>;

    /// Mints a new access token from a still-valid refresh token. The refresh
    /// token must pass both the signature check and the persisted-row check;
    /// it is not reissued.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Invariant`] when either check fails.
    async fn refresh(&self, refresh_token: &str) -> Result<String, ServiceError>;

    /// Revokes a refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Invariant`] when the token is not currently
    /// persisted.
    async fn logout(&self, refresh_token: &str) -> Result<(), ServiceError>;
}
