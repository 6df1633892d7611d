// Tax Dashboard - Web Server
// Serves the dashboard page and the hover API

use anyhow::{Context, Result};
use tax_dashboard::server::{create_router, AppState};
use tax_dashboard::{CsvRecordSource, Dashboard, DashboardConfig, RecordSource, StyleBook};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tax_dashboard=info,tax_dashboard_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Tax Dashboard v{}", tax_dashboard::VERSION);

    let config = DashboardConfig::default();

    let csv_source = CsvRecordSource::new(&config.data_path);

    // The file is re-read on every hover, so a missing file is only a warning here
    if csv_source.path().exists() {
        info!(path = ?csv_source.path(), "reading records per hover event");
    } else {
        warn!(path = ?csv_source.path(), "data file not found; charts will fail until it exists");
    }

    let source: Box<dyn RecordSource> = Box::new(csv_source);
    let dashboard = Dashboard::new(source, StyleBook::default())
        .with_default_selection(config.default_selection.clone());
    let app = create_router(AppState::new(dashboard));

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_address))?;

    info!("Server running on http://{}", config.bind_address);

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
