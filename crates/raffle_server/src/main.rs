//! Raffle HTTP server entry point.

use log::{error, info};
use raffle_core::db::open_db;
use raffle_core::{init_logging, init_stderr_logging};
use raffle_server::{build_router, AppState, ServerConfig};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::from_env()?;

    match config.log_dir.as_deref() {
        Some(log_dir) => init_logging(&config.log_level, log_dir)?,
        None => init_stderr_logging(&config.log_level)?,
    }

    let conn = open_db(&config.db_path)?;
    let router = build_router(AppState::new(conn));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(
        "event=server_start module=server status=ok bind={}",
        config.bind
    );
    println!("raffle server listening on http://{}", config.bind);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(
            "event=shutdown_signal module=server status=error error={}",
            err
        );
        std::future::pending::<()>().await;
    }
}
