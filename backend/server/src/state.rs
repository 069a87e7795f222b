use std::sync::Arc;

use anyhow::Result;

use super::{
    config::Config,
    database::{Database, init_database},
};

pub struct State {
    pub config: Config,
    pub database: Database,
}

impl State {
    pub async fn new(config: Config) -> Result<Arc<Self>> {
        let database = init_database(&config.database_url, &config.db_name).await?;

        Ok(Arc::new(Self { config, database }))
    }

    /// Memory-backed state that never touches the network.
    pub fn in_memory() -> Arc<Self> {
        Self::in_memory_with(Config::in_memory())
    }

    /// Like [`State::in_memory`], keeping everything in `config` except the database url.
    pub fn in_memory_with(config: Config) -> Arc<Self> {
        let database = Database::memory(&config.db_name);

        Arc::new(Self { config, database })
    }
}
