//! AI Power Meter Server
//!
//! HTTP dashboard estimating the energy use and CO2 emissions of generative AI

use aipowermeter::config::{FileConfig, Settings};
use aipowermeter::handlers::create_router;
use aipowermeter::utils::logging::init_logging;
use anyhow::{Context, Result};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Optional JSON overrides on top of the environment
    let file_config = FileConfig::load_default().context("Failed to load configuration file")?;
    let settings = Settings::with_file(&file_config).context("Failed to load server settings")?;

    init_logging(&settings.logging)?;
    info!("{}", aipowermeter::version_info());

    let app = create_router(settings.clone()).await?;

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 AI Power Meter started!");
    info!("📊 Dashboard: http://{}/", addr);
    info!("📝 Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    Ok(())
}
