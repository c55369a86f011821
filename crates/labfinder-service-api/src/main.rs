//! Lab Finder HTTP service.
//!
//! Serves the lab directory search and the contact and sample-report forms.
//! See the library crate for the endpoint list.
//!
//! # Configuration
//!
//! - `LABFINDER_DATA_PATH` - Path to the labs.json file (default: /data/labs.json)
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `MAIL_API_URL`, `MAIL_API_KEY`, `MAIL_FROM`, `MAIL_TO` - Mail delivery
//! - `METRICS_ENABLED` - Prometheus metrics (default: true)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text

use std::net::SocketAddr;

use tracing::{error, info};

use labfinder_service_api::router;
use labfinder_service_shared::{
    AppState, LoggingConfig, MetricsConfig, ServiceConfig, init_logging, init_metrics,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("labfinder-api");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env();
    info!(
        data_path = %config.data_path.display(),
        port = config.port,
        mail_to = %config.mail.to,
        "starting lab finder service"
    );

    let state = AppState::load(&config.data_path, &config.mail).map_err(|e| {
        error!(error = %e, path = %config.data_path.display(), "failed to load application state");
        e
    })?;

    info!(labs = state.directory().len(), "application state loaded");

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
