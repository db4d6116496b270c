use sea_orm::entity::prelude::*;

/// Persisted refresh tokens. A refresh token is accepted only while its row
/// exists; deleting the row revokes the token regardless of how long its
/// signature remains cryptographically valid.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "authentications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub token: String,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
