//! Fieldset server entry point.

use fieldset_db::DbManager;
use fieldset_server::{AppState, ServerConfig, build_router};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("fieldset_db=info".parse().unwrap())
                .add_directive("fieldset_server=info".parse().unwrap()),
        )
        .json()
        .init();

    let config = ServerConfig::from_env();

    let manager = DbManager::connect(&config.db)
        .await
        .map_err(|e| format!("database connection failed: {e}"))?;

    fieldset_db::run_migrations(manager.client())
        .await
        .map_err(|e| format!("migrations failed: {e}"))?;

    let state = AppState::new(manager.client().clone(), config.admin.clone());
    let app = build_router(state);

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| format!("failed to bind {}: {e}", config.listen_addr))?;
    info!(addr = %config.listen_addr, "Fieldset server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server error: {e}"))?;

    info!("Fieldset server stopped");

    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
