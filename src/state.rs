use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, SeaOrmAuthService, SeaOrmUserService, TokenManager, UserService,
};

/// Everything the request handlers share. Built once at startup; the config
/// is fixed for the lifetime of the process.
#[derive(Clone)]
pub struct SharedState {
    pub config: Config,

    pub store: Store,

    pub tokens: TokenManager,

    pub auth_service: Arc<dyn AuthService>,

    pub user_service: Arc<dyn UserService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await?;

        let tokens = TokenManager::new(&config.auth);

        let auth_service = Arc::new(SeaOrmAuthService::new(store.clone(), tokens.clone()))
            as Arc<dyn AuthService + Send + Sync + 'static>;

        let user_service = Arc::new(SeaOrmUserService::new(store.clone()))
            as Arc<dyn UserService + Send + Sync + 'static>;

        Ok(Self {
            config,
            store,
            tokens,
            auth_service,
            user_service,
        })
    }
}
