//! # Document Store
//!
//! Schemaless storage for the four analytics collections.
//!
//! ## Layout
//!
//! - One Redis list per collection, keyed `{namespace}:{collection}`
//! - Each element is a JSON document, so list order is insertion order
//! - Namespace comes from `DB_NAME`, letting several datasets share one Redis
//!
//! ## Replace
//!
//! `DEL` then `RPUSH` inside a `MULTI`, so a single collection is never seen half written.
//! Collections are replaced one after another though, and a reader can still observe customers
//! from the new seed next to orders from the old one.
//!
//! ## Memory backend
//!
//! `REDIS_URL=memory://` swaps Redis for a map guarded by a `RwLock`. Same layout, same semantics,
//! no server needed. Tests run against it.
use std::{collections::HashMap, fmt, sync::Arc};

use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::RwLock;
use tracing::info;

use crate::{config::MEMORY_URL, error::AppError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Customers,
    Orders,
    CompetitorPrices,
    CityAnalysis,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::Customers => "customers",
            Collection::Orders => "orders",
            Collection::CompetitorPrices => "competitor_prices",
            Collection::CityAnalysis => "city_analysis",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    lists: Arc<RwLock<HashMap<String, Vec<String>>>>,
}

#[derive(Clone)]
enum Backend {
    Redis(ConnectionManager),
    Memory(MemoryStore),
}

#[derive(Clone)]
pub struct Database {
    backend: Backend,
    namespace: String,
}

pub async fn init_database(database_url: &str, namespace: &str) -> Result<Database, AppError> {
    let backend = if database_url.starts_with(MEMORY_URL) {
        info!("Using in-memory document store");
        Backend::Memory(MemoryStore::default())
    } else {
        let client = Client::open(database_url)?;
        let connection_manager = client.get_connection_manager().await?;

        info!("Connected to Redis");
        Backend::Redis(connection_manager)
    };

    Ok(Database {
        backend,
        namespace: namespace.to_string(),
    })
}

impl Database {
    pub fn memory(namespace: &str) -> Self {
        Self {
            backend: Backend::Memory(MemoryStore::default()),
            namespace: namespace.to_string(),
        }
    }

    fn key(&self, collection: Collection) -> String {
        format!("{}:{}", self.namespace, collection)
    }

    pub async fn fetch_all<T>(&self, collection: Collection) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned,
    {
        let key = self.key(collection);

        let documents: Vec<String> = match &self.backend {
            Backend::Redis(connection) => {
                let mut connection = connection.clone();
                connection.lrange(&key, 0, -1).await?
            }
            Backend::Memory(store) => {
                store.lists.read().await.get(&key).cloned().unwrap_or_default()
            }
        };

        documents
            .iter()
            .map(|document| serde_json::from_str(document).map_err(AppError::from))
            .collect()
    }

    /// Drops every document of `collection`, then writes `records` in order.
    pub async fn replace_all<T>(
        &self,
        collection: Collection,
        records: &[T],
    ) -> Result<usize, AppError>
    where
        T: Serialize,
    {
        let key = self.key(collection);
        let documents = records
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;

        match &self.backend {
            Backend::Redis(connection) => {
                let mut connection = connection.clone();
                let mut pipe = redis::pipe();
                pipe.atomic().del(&key).ignore();

                // RPUSH without values is a syntax error
                if !documents.is_empty() {
                    pipe.rpush(&key, &documents).ignore();
                }

                pipe.query_async::<()>(&mut connection).await?;
            }
            Backend::Memory(store) => {
                store.lists.write().await.insert(key, documents);
            }
        }

        #[cfg(feature = "verbose")]
        info!("Replaced {} with {} documents", collection, records.len());

        Ok(records.len())
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        match &self.backend {
            Backend::Redis(connection) => {
                let mut connection = connection.clone();
                redis::cmd("PING").query_async::<String>(&mut connection).await?;
            }
            Backend::Memory(_) => {}
        }

        Ok(())
    }
}
