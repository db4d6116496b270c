//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::error::ServiceError;
use crate::services::auth_service::{AuthService, TokenPair};
use crate::services::token_manager::TokenManager;

pub struct SeaOrmAuthService {
    store: Store,
    tokens: TokenManager,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, tokens: TokenManager) -> Self {
        Self { store, tokens }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ServiceError> {
        let user_id = self.store.verify_credential(username, password).await?;

        self.store.touch_last_login(&user_id).await?;

        let access_token = self.tokens.generate_access_token(&user_id)?;
        let refresh_token = self.tokens.generate_refresh_token(&user_id)?;

        self.store.add_refresh_token(&refresh_token).await?;

        tracing::info!(user_id = %user_id, "user logged in");

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, ServiceError> {
        let claims = self.tokens.verify_refresh_token(refresh_token)?;

        // A valid signature is not enough: the persisted row must still
        // exist, otherwise the token has been revoked.
        self.store.verify_refresh_token_exists(refresh_token).await?;

        self.tokens.generate_access_token(&claims.sub)
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), ServiceError> {
        self.store.delete_refresh_token(refresh_token).await
    }
}
