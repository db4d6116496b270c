use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use tokio::task;

use super::generate_id;
use crate::entities::users::{self, Role};
use crate::entities::{active_logs, prelude::*};
use crate::error::ServiceError;

/// User data returned from the repository (without the password hash).
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub position: String,
    pub username: String,
    pub role: Role,
    pub is_active: bool,
    pub last_login: Option<String>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            position: model.position,
            username: model.username,
            role: model.role,
            is_active: model.is_active,
            last_login: model.last_login,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub position: String,
    pub username: String,
    pub password: String,
    pub role: Role,
    pub is_active: bool,
    pub last_login: Option<String>,
}

/// Fields replaced by an edit. The password is re-hashed and overwritten on
/// every edit; there is no unchanged-password detection.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub name: String,
    pub position: String,
    pub username: String,
    pub password: String,
}

/// Ids of the mutated user row and the activity-log row written with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationReceipt {
    pub user_id: String,
    pub log_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub page: u64,
    pub limit: u64,
    pub position: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Clone)]
pub struct UserPage {
    pub data: Vec<User>,
    pub page: u64,
    pub limit: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Create a user and its `create` activity-log row in one transaction.
    ///
    /// The username pre-check closes the common case; the unique constraint
    /// closes the race between two concurrent creates, and its violation is
    /// reported as the same invariant error.
    pub async fn create(&self, new_user: NewUser) -> Result<MutationReceipt, ServiceError> {
        let existing = Users::find()
            .filter(users::Column::Username.eq(new_user.username.as_str()))
            .one(&self.conn)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::invariant("username is already in use"));
        }

        let hashed_password = hash_password_blocking(new_user.password).await?;

        let user_id = generate_id("user");
        let log_id = generate_id("log");
        let now = chrono::Utc::now().to_rfc3339();

        let txn = self.conn.begin().await?;

        let user = users::ActiveModel {
            id: Set(user_id.clone()),
            name: Set(new_user.name),
            position: Set(new_user.position),
            username: Set(new_user.username),
            hashed_password: Set(hashed_password),
            role: Set(new_user.role),
            is_active: Set(new_user.is_active),
            last_login: Set(new_user.last_login),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
        };

        let inserted = user.insert(&txn).await.map_err(map_unique_violation)?;

        let log = active_logs::ActiveModel {
            id: Set(log_id.clone()),
            user_id: Set(inserted.id.clone()),
            action: Set("create".to_string()),
            target_table: Set("users".to_string()),
            target_id: Set(inserted.id),
            created_at: Set(now),
        };
        log.insert(&txn).await?;

        txn.commit().await?;

        Ok(MutationReceipt { user_id, log_id })
    }

    /// Verify a username/password pair and return the user id.
    ///
    /// Unknown username and wrong password produce the same generic error so
    /// the response does not reveal which check failed.
    pub async fn verify_credential(
        &self,
        username: &str,
        password: &str,
    ) -> Result<String, ServiceError> {
        let user = Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await?
            .ok_or_else(invalid_credentials)?;

        let hashed_password = user.hashed_password;
        let password = password.to_string();

        // Argon2 verification is CPU-bound; keep it off the async runtime.
        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&hashed_password)
                .map_err(|e| ServiceError::internal(format!("invalid password hash format: {e}")))?;

            Ok::<bool, ServiceError>(
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .map_err(|e| ServiceError::internal(format!("password verification task panicked: {e}")))??;

        if !is_valid {
            return Err(invalid_credentials());
        }

        Ok(user.id)
    }

    /// Check that the actor exists and holds the admin role.
    pub async fn verify_admin(&self, actor_id: &str) -> Result<Role, ServiceError> {
        let user = Users::find_by_id(actor_id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| ServiceError::invariant("user record not found"))?;

        if user.role != Role::Admin {
            return Err(ServiceError::authorization(
                "you are not allowed to access this resource",
            ));
        }

        Ok(user.role)
    }

    pub async fn touch_last_login(&self, id: &str) -> Result<(), ServiceError> {
        let user = Users::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| ServiceError::invariant("user record not found"))?;

        let mut active: users::ActiveModel = user.into();
        active.last_login = Set(Some(chrono::Utc::now().to_rfc3339()));
        active.update(&self.conn).await?;

        Ok(())
    }

    /// List active users ordered by name. The paginator derives its count
    /// query from the same filter as the page query, so `total_pages` is
    /// always `ceil(total_items / limit)` over the filtered set.
    pub async fn list(&self, query: UserListQuery) -> Result<UserPage, ServiceError> {
        let mut find = Users::find().filter(users::Column::IsActive.eq(true));

        if let Some(position) = &query.position {
            find = find.filter(users::Column::Position.eq(position.as_str()));
        }
        if let Some(role) = query.role {
            find = find.filter(users::Column::Role.eq(role));
        }

        let paginator = find
            .order_by_asc(users::Column::Name)
            .paginate(&self.conn, query.limit);

        let totals = paginator.num_items_and_pages().await?;
        let items = paginator.fetch_page(query.page - 1).await?;

        Ok(UserPage {
            data: items.into_iter().map(User::from).collect(),
            page: query.page,
            limit: query.limit,
            total_items: totals.number_of_items,
            total_pages: totals.number_of_pages,
        })
    }

    /// Apply an edit and its `edit` activity-log row in one transaction.
    pub async fn edit(
        &self,
        actor_id: &str,
        id: &str,
        update: UserUpdate,
    ) -> Result<MutationReceipt, ServiceError> {
        let hashed_password = hash_password_blocking(update.password).await?;

        let log_id = generate_id("log");
        let now = chrono::Utc::now().to_rfc3339();

        let txn = self.conn.begin().await?;

        let user = Users::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::invariant("user record not found, nothing to edit"))?;

        let mut active: users::ActiveModel = user.into();
        active.name = Set(update.name);
        active.position = Set(update.position);
        active.username = Set(update.username);
        active.hashed_password = Set(hashed_password);
        active.updated_at = Set(now.clone());

        let updated = active.update(&txn).await.map_err(map_unique_violation)?;

        let log = active_logs::ActiveModel {
            id: Set(log_id.clone()),
            user_id: Set(actor_id.to_string()),
            action: Set("edit".to_string()),
            target_table: Set("users".to_string()),
            target_id: Set(updated.id.clone()),
            created_at: Set(now),
        };
        log.insert(&txn).await?;

        txn.commit().await?;

        Ok(MutationReceipt {
            user_id: updated.id,
            log_id,
        })
    }

    /// Delete a user and write its `delete` activity-log row in one
    /// transaction.
    pub async fn delete(&self, actor_id: &str, id: &str) -> Result<MutationReceipt, ServiceError> {
        let log_id = generate_id("log");
        let now = chrono::Utc::now().to_rfc3339();

        let txn = self.conn.begin().await?;

        let user = Users::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::invariant("user record not found, nothing to delete"))?;

        let user_id = user.id.clone();
        user.delete(&txn).await?;

        let log = active_logs::ActiveModel {
            id: Set(log_id.clone()),
            user_id: Set(actor_id.to_string()),
            action: Set("delete".to_string()),
            target_table: Set("users".to_string()),
            target_id: Set(user_id.clone()),
            created_at: Set(now),
        };
        log.insert(&txn).await?;

        txn.commit().await?;

        Ok(MutationReceipt { user_id, log_id })
    }
}

fn invalid_credentials() -> ServiceError {
    ServiceError::authentication("the credentials you provided are incorrect")
}

fn map_unique_violation(err: sea_orm::DbErr) -> ServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ServiceError::invariant("username is already in use")
        }
        _ => ServiceError::from(err),
    }
}

/// Hash a password with Argon2id. Runs on the blocking pool because hashing
/// is deliberately expensive.
async fn hash_password_blocking(password: String) -> Result<String, ServiceError> {
    task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ServiceError::internal(format!("password hashing task panicked: {e}")))?
}

pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ServiceError::internal(format!("failed to hash password: {e}")))?;

    Ok(hash.to_string())
}
