pub mod prelude;

pub mod active_logs;
pub mod authentications;
pub mod users;
