pub use super::active_logs::Entity as ActiveLogs;
pub use super::authentications::Entity as Authentications;
pub use super::users::Entity as Users;
