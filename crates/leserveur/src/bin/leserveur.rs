//! leserveur binary entry point

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = leserveur::ServerConfig::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("leserveur={0},lemoteur={0}", config.log_level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        host = %config.host,
        port = config.port,
        weather_enabled = config.weather_enabled,
        maps_enabled = config.maps_enabled,
        "starting LeGuide server"
    );

    let server = leserveur::LeGuideServer::new(config)
        .map_err(|e| anyhow::anyhow!("failed to build server: {e}"))?;

    server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("server exited with error: {e}"))?;

    Ok(())
}
