use logbroker::config::{Config, ServerConfig};
use logbroker::server::http_api::start_http_server;
use logbroker::BrokerEngine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ========================================
// MAIN ENTRY POINT
// ========================================

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| ServerConfig::log_level().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::global();
    tracing::debug!("Loaded config: {:?}", config);

    let engine = BrokerEngine::new(config.broker.clone());
    tracing::info!("Log broker v{} starting (in-memory, data is lost on restart)", env!("CARGO_PKG_VERSION"));

    let addr = config.server.addr();
    if let Err(e) = start_http_server(engine, &addr).await {
        tracing::error!("Server on {} failed: {}", addr, e);
        return Err(e);
    }
    Ok(())
}
