use sea_orm::entity::prelude::*;

/// Append-only audit trail. Rows are written exclusively inside the same
/// transaction as the user mutation they record, and never updated.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "active_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Acting user id.
    pub user_id: String,

    /// One of `create`, `edit`, `delete`.
    pub action: String,

    pub target_table: String,

    pub target_id: String,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
