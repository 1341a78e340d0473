use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use registrar::config::{self, CliArgs};
use registrar::report::ReportGenerator;
use registrar::store::StoreClient;
use registrar::{AppState, create_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load environment variables before clap reads them
    if std::fs::metadata(".env").is_ok() {
        info!("Loading .env file");
        dotenv::dotenv().ok();
    }

    let config = config::get_config(CliArgs::parse());

    let state = Arc::new(AppState {
        store: StoreClient::new(config.backend_url.clone(), config.backend_api_key.clone()),
        reports: ReportGenerator::new(
            config.ai_api_url.clone(),
            config.ai_api_key.clone(),
            config.ai_model.clone(),
        ),
    });

    let app = create_app(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
