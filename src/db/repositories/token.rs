use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::generate_id;
use crate::entities::{authentications, prelude::*};
use crate::error::ServiceError;

/// Persistence side of the refresh-token lifecycle. Signature verification
/// lives in the token manager; both checks must pass for a refresh token to
/// be accepted, which is what makes immediate revocation possible.
pub struct RefreshTokenRepository {
    conn: DatabaseConnection,
}

impl RefreshTokenRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, token: &str) -> Result<String, ServiceError> {
        let id = generate_id("auth");

        let row = authentications::ActiveModel {
            id: Set(id.clone()),
            token: Set(token.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        };
        row.insert(&self.conn).await?;

        Ok(id)
    }

    pub async fn verify_exists(&self, token: &str) -> Result<(), ServiceError> {
        let found = Authentications::find()
            .filter(authentications::Column::Token.eq(token))
            .one(&self.conn)
            .await?;

        if found.is_none() {
            return Err(ServiceError::invariant("refresh token is not valid"));
        }

        Ok(())
    }

    /// Revoke a token by deleting its row. Fails if the token was never
    /// persisted or is already revoked.
    pub async fn delete(&self, token: &str) -> Result<(), ServiceError> {
        let result = Authentications::delete_many()
            .filter(authentications::Column::Token.eq(token))
            .exec(&self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::invariant("refresh token is not valid"));
        }

        Ok(())
    }
}
