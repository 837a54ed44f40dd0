use anyhow::{Context, Result};
use corpusd::{
    config::Config,
    http::{AppState, HttpServer},
    stemming::SnowballStemmer,
    store,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// Run the corpus API until Ctrl+C or SIGTERM
pub async fn serve(config: Config) -> Result<()> {
    info!("Starting corpusd");
    info!("Storage: {:?} in {}", config.storage.backend, config.storage.data_dir.display());

    let store = store::open_store(&config.storage)?;
    let state = AppState::new(store.clone(), Arc::new(SnowballStemmer::english()));

    let (shutdown_tx, shutdown_rx) = broadcast::channel(4);

    let http_server = HttpServer::new(config.http.clone(), state);
    let mut http_handle = tokio::spawn(async move { http_server.run(shutdown_rx).await });

    // Wait for a signal, or for the server to stop by itself (e.g. bind failure)
    let early_exit = tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
            None
        }
        _ = wait_for_sigterm() => {
            info!("Received SIGTERM, shutting down");
            None
        }
        res = &mut http_handle => Some(res),
    };

    let _ = shutdown_tx.send(());

    let outcome = match early_exit {
        Some(res) => res.context("HTTP server task panicked")?,
        None => {
            let http_abort = http_handle.abort_handle();
            match tokio::time::timeout(Duration::from_secs(5), http_handle).await {
                Ok(res) => res.context("HTTP server task panicked")?,
                Err(_) => {
                    warn!("HTTP server did not shut down within 5s, aborting");
                    http_abort.abort();
                    Ok(())
                }
            }
        }
    };

    if let Err(e) = store.flush() {
        warn!("Failed to flush corpus store during shutdown: {:#}", e);
    }

    info!("corpusd shutdown complete");
    outcome
}

#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};
    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            warn!("Failed to register SIGTERM handler: {}. Falling back to pending future.", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_sigterm() {
    // Ctrl+C still works
    std::future::pending::<()>().await
}
