//! Domain service for admin-gated user management.

use crate::db::{ActivityPage, MutationReceipt, NewUser, UserListQuery, UserPage, UserUpdate};
use crate::error::ServiceError;

/// Thin composition over the credential store. Every mutating call is gated
/// behind an admin check on the acting user; listing only requires an
/// authenticated caller.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Creates a user account.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Authorization`] if the actor is not an admin,
    /// [`ServiceError::Invariant`] if the username is already taken.
    async fn create_user(
        &self,
        actor_id: &str,
        new_user: NewUser,
    ) -> Result<MutationReceipt, ServiceError>;

    /// Lists active users with optional position/role filters.
    async fn list_users(&self, query: UserListQuery) -> Result<UserPage, ServiceError>;

    /// Edits a user account.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Invariant`] if the target does not exist.
    async fn edit_user(
        &self,
        actor_id: &str,
        id: &str,
        update: UserUpdate,
    ) -> Result<MutationReceipt, ServiceError>;

    /// Deletes a user account.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Invariant`] if the target does not exist.
    async fn delete_user(&self, actor_id: &str, id: &str)
    -> Result<MutationReceipt, ServiceError>;

    /// Returns the activity log, newest first.
    async fn get_activity(
        &self,
        actor_id: &str,
        page: u64,
        limit: u64,
    ) -> Result<ActivityPage, ServiceError>;
}
