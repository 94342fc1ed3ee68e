//! Entry Ledger server
//!
//! Reads its settings from the environment and `.env` (see `config`), opens the entry
//! store once and serves the HTTP API until Ctrl+C or SIGTERM.

use anyhow::Result;
use entry_ledger::config::ServerConfig;
use entry_ledger::core::EntryService;
use entry_ledger::server::ServerBuilder;
use entry_ledger::storage::InMemoryEntryStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::load()?;
    let entry_service = open_entry_service(&config).await?;

    ServerBuilder::new()
        .with_shared_entry_service(entry_service)
        .serve(&config.bind_address())
        .await
}

#[cfg(feature = "mongodb_backend")]
async fn open_entry_service(config: &ServerConfig) -> Result<Arc<dyn EntryService>> {
    use entry_ledger::storage::MongoEntryStore;

    match &config.database_uri {
        Some(uri) => {
            let store =
                MongoEntryStore::connect(uri, config.database_name.as_deref(), &config.collection)
                    .await?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("MONGODB_URI is not set, entries are kept in memory only");
            Ok(Arc::new(InMemoryEntryStore::new()))
        }
    }
}

#[cfg(not(feature = "mongodb_backend"))]
async fn open_entry_service(config: &ServerConfig) -> Result<Arc<dyn EntryService>> {
    if config.database_uri.is_some() {
        tracing::warn!(
            "MONGODB_URI is set but this build lacks the mongodb_backend feature, entries are kept in memory only"
        );
    } else {
        tracing::warn!("MONGODB_URI is not set, entries are kept in memory only");
    }
    Ok(Arc::new(InMemoryEntryStore::new()))
}
