//! `SeaORM` implementation of the `UserService` trait.

use async_trait::async_trait;

use crate::db::{
    ActivityPage, MutationReceipt, NewUser, Store, UserListQuery, UserPage, UserUpdate,
};
use crate::error::ServiceError;
use crate::services::user_service::UserService;

pub struct SeaOrmUserService {
    store: Store,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn create_user(
        &self,
        actor_id: &str,
        new_user: NewUser,
    ) -> Result<MutationReceipt, ServiceError> {
        self.store.verify_admin(actor_id).await?;

        let receipt = self.store.create_user(new_user).await?;

        tracing::info!(actor_id, user_id = %receipt.user_id, "user created");

        Ok(receipt)
    }

    async fn list_users(&self, query: UserListQuery) -> Result<UserPage, ServiceError> {
        self.store.list_users(query).await
    }

    async fn edit_user(
        &self,
        actor_id: &str,
        id: &str,
        update: UserUpdate,
    ) -> Result<MutationReceipt, ServiceError> {
        self.store.verify_admin(actor_id).await?;

        let receipt = self.store.edit_user(actor_id, id, update).await?;

        tracing::info!(actor_id, user_id = %receipt.user_id, "user edited");

        Ok(receipt)
    }

    async fn delete_user(
        &self,
        actor_id: &str,
        id: &str,
    ) -> Result<MutationReceipt, ServiceError> {
        self.store.verify_admin(actor_id).await?;

        let receipt = self.store.delete_user(actor_id, id).await?;

        tracing::info!(actor_id, user_id = %receipt.user_id, "user deleted");

        Ok(receipt)
    }

    async fn get_activity(
        &self,
        actor_id: &str,
        page: u64,
        limit: u64,
    ) -> Result<ActivityPage, ServiceError> {
        self.store.verify_admin(actor_id).await?;

        self.store.list_activity(page, limit).await
    }
}
