use anyhow::Context;
use std::sync::Arc;
use tracing::info;

use vtx_stream_demo::{config::Settings, vfs::LocalFs, web};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vtx_stream_demo=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    info!("[Startup] vtx stream demo initializing...");

    let settings = Settings::new().context("Failed to load config")?;
    info!(
        "[Config] Binding at {}:{}, assets at {}",
        settings.server.host,
        settings.server.port,
        settings.assets.root.display()
    );

    let state = Arc::new(web::state::AppState::new(&settings, Arc::new(LocalFs)));
    let app = web::router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("[Startup] Service ready at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("[Shutdown] Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("[Shutdown] Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("[Shutdown] Ctrl-C received, draining connections");
}
