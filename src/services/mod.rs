pub mod token_manager;
pub use token_manager::{Claims, TokenManager};

pub mod auth_service;
pub use auth_service::{AuthService, TokenPair};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod user_service;
pub use user_service::UserService;

pub mod user_service_impl;
pub use user_service_impl::SeaOrmUserService;
