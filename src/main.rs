use aya_log::config::log_filter;
use aya_log::{router, AppConfig, AppState, KoreanFormatter, RecordStore};
use std::env;
use tokio::fs;
use tracing::{debug, info};
use tracing_subscriber::fmt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(log_filter(env::var("RUST_LOG").ok().as_deref()))
        .init();

    let config = AppConfig::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let store = RecordStore::open(config.data_path.clone()).await;
    let mut changes = store.subscribe();
    tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let version = *changes.borrow_and_update();
            debug!(version, "record collection changed");
        }
    });

    let state = AppState::new(store, KoreanFormatter::new(config.utc_offset));
    let app = router(state);

    let addr = config.listen_addr();
    info!(utc_offset = %config.utc_offset, "listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
