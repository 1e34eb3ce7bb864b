use std::sync::Arc;

use keel::{Config, Router, Server, StaticFiles};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    let router = Router::new().fallback(StaticFiles::from_config(&cfg.static_files));
    let server = Arc::new(Server::new(cfg.server, router));

    let signal_server = Arc::clone(&server);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            signal_server.stop().await;
        }
    });

    server.start().await
}
