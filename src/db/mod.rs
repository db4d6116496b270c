use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::users::Role;
use crate::error::ServiceError;

pub mod migrator;
pub mod repositories;

pub use repositories::activity::{ActivityEntry, ActivityPage};
pub use repositories::generate_id;
pub use repositories::user::{MutationReceipt, NewUser, User, UserListQuery, UserPage, UserUpdate};

/// Facade over the connection pool and the repositories. Cheap to clone; the
/// underlying pool is shared.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if db_url.starts_with("sqlite:") && !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        if db_url.contains(":memory:") {
            // sqlite keeps one in-memory database per connection; a single
            // long-lived connection keeps schema and data alive.
            opt.max_connections(1).min_connections(1);
        } else {
            opt.max_connections(max_connections)
                .min_connections(min_connections);
        }
        opt.connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn activity_repo(&self) -> repositories::activity::ActivityLogRepository {
        repositories::activity::ActivityLogRepository::new(self.conn.clone())
    }

    fn token_repo(&self) -> repositories::token::RefreshTokenRepository {
        repositories::token::RefreshTokenRepository::new(self.conn.clone())
    }

    pub async fn create_user(&self, new_user: NewUser) -> Result<MutationReceipt, ServiceError> {
        self.user_repo().create(new_user).await
    }

    pub async fn verify_credential(
        &self,
        username: &str,
        password: &str,
    ) -> Result<String, ServiceError> {
        self.user_repo().verify_credential(username, password).await
    }

    pub async fn verify_admin(&self, actor_id: &str) -> Result<Role, ServiceError> {
        self.user_repo().verify_admin(actor_id).await
    }

    pub async fn touch_last_login(&self, id: &str) -> Result<(), ServiceError> {
        self.user_repo().touch_last_login(id).await
    }

    pub async fn list_users(&self, query: UserListQuery) -> Result<UserPage, ServiceError> {
        self.user_repo().list(query).await
    }

    pub async fn edit_user(
        &self,
        actor_id: &str,
        id: &str,
        update: UserUpdate,
    ) -> Result<MutationReceipt, ServiceError> {
        self.user_repo().edit(actor_id, id, update).await
    }

    pub async fn delete_user(
        &self,
        actor_id: &str,
        id: &str,
    ) -> Result<MutationReceipt, ServiceError> {
        self.user_repo().delete(actor_id, id).await
    }

    pub async fn list_activity(&self, page: u64, limit: u64) -> Result<ActivityPage, ServiceError> {
        self.activity_repo().list(page, limit).await
    }

    pub async fn add_refresh_token(&self, token: &str) -> Result<String, ServiceError> {
        self.token_repo().add(token).await
    }

    pub async fn verify_refresh_token_exists(&self, token: &str) -> Result<(), ServiceError> {
        self.token_repo().verify_exists(token).await
    }

    pub async fn delete_refresh_token(&self, token: &str) -> Result<(), ServiceError> {
        self.token_repo().delete(token).await
    }
}
