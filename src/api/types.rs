use serde::Serialize;

use crate::db::{ActivityEntry, ActivityPage, MutationReceipt, User, UserPage};
use crate::entities::users::Role;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub position: String,
    pub username: String,
    pub role: Role,
    pub is_active: bool,
    pub last_login: Option<String>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            position: user.position,
            username: user.username,
            role: user.role,
            is_active: user.is_active,
            last_login: user.last_login,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserPageDto {
    pub data: Vec<UserDto>,
    pub page: u64,
    pub limit: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl From<UserPage> for UserPageDto {
    fn from(page: UserPage) -> Self {
        Self {
            data: page.data.into_iter().map(UserDto::from).collect(),
            page: page.page,
            limit: page.limit,
            total_items: page.total_items,
            total_pages: page.total_pages,
        }
    }
}

/// Ids returned by every successful mutation: the affected user row and the
/// activity-log row written with it.
#[derive(Debug, Serialize)]
pub struct MutationDto {
    pub user_id: String,
    pub log_id: String,
}

impl From<MutationReceipt> for MutationDto {
    fn from(receipt: MutationReceipt) -> Self {
        Self {
            user_id: receipt.user_id,
            log_id: receipt.log_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActivityDto {
    pub id: String,
    pub user_id: String,
    pub action: String,
    pub target_table: String,
    pub target_id: String,
    pub created_at: String,
}

impl From<ActivityEntry> for ActivityDto {
    fn from(entry: ActivityEntry) -> Self {
        Self {
            id: entry.id,
            user_id: entry.user_id,
            action: entry.action,
            target_table: entry.target_table,
            target_id: entry.target_id,
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActivityPageDto {
    pub data: Vec<ActivityDto>,
    pub page: u64,
    pub limit: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl From<ActivityPage> for ActivityPageDto {
    fn from(page: ActivityPage) -> Self {
        Self {
            data: page.data.into_iter().map(ActivityDto::from).collect(),
            page: page.page,
            limit: page.limit,
            total_items: page.total_items,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageDto {
    pub message: String,
}
