//! Flagged Posts API server binary

use anyhow::Result;
use flagged::prelude::*;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.clone()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    let storage = JsonFileStorage::new(&config.data_file);
    let store = RecordStore::new(storage);

    let stats = store.stats().await;
    info!(
        data_file = %config.data_file.display(),
        total_records = stats.total_records,
        "Record store initialized"
    );

    ServerBuilder::new()
        .with_config(config)
        .with_record_service(store)
        .serve()
        .await
}
