use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};

use crate::entities::{active_logs, prelude::*};
use crate::error::ServiceError;

#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub id: String,
    pub user_id: String,
    pub action: String,
    pub target_table: String,
    pub target_id: String,
    pub created_at: String,
}

impl From<active_logs::Model> for ActivityEntry {
    fn from(model: active_logs::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            action: model.action,
            target_table: model.target_table,
            target_id: model.target_id,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActivityPage {
    pub data: Vec<ActivityEntry>,
    pub page: u64,
    pub limit: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

/// Read side of the activity log. Writes happen only inside the user
/// mutation transactions in [`super::user::UserRepository`].
pub struct ActivityLogRepository {
    conn: DatabaseConnection,
}

impl ActivityLogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, page: u64, limit: u64) -> Result<ActivityPage, ServiceError> {
        let paginator = ActiveLogs::find()
            .order_by_desc(active_logs::Column::CreatedAt)
            .paginate(&self.conn, limit);

        let totals = paginator.num_items_and_pages().await?;
        let items = paginator.fetch_page(page - 1).await?;

        Ok(ActivityPage {
            data: items.into_iter().map(ActivityEntry::from).collect(),
            page,
            limit,
            total_items: totals.number_of_items,
            total_pages: totals.number_of_pages,
        })
    }
}
