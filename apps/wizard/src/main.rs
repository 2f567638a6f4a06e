use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wizard::backend::HttpProfileBackend;
use wizard::config::Config;
use wizard::persist::FileSnapshotStore;
use wizard::steps::{is_step_complete, STEP_ORDER};
use wizard::store::DraftStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting profile wizard engine v{}", env!("CARGO_PKG_VERSION"));

    let backend = Arc::new(HttpProfileBackend::new(config.api_base_url.clone()));
    let snapshot = Arc::new(FileSnapshotStore::new(&config.snapshot_path));

    let mut store = DraftStore::with_debounce(
        backend,
        snapshot,
        Duration::from_millis(config.autosave_debounce_ms),
    );

    store.load().await;
    info!("Profile completion: {}%", store.score());
    for step in STEP_ORDER {
        let tick = if is_step_complete(step, store.draft()) {
            "complete"
        } else {
            "incomplete"
        };
        info!("  {}: {tick}", step.key());
    }

    Ok(())
}
