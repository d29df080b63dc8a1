use crate::cli::ServeArgs;
use crate::infra::{reload_directory, AppState};
use crate::routes::helper_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use helper_directory::config::AppConfig;
use helper_directory::directory::HttpHelperSource;
use helper_directory::error::AppError;
use helper_directory::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let source = Arc::new(HttpHelperSource::new(&config.source)?);
    let app_state = AppState::new(prometheus_handle, source);

    let app = helper_routes()
        .layer(Extension(app_state.clone()))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let initial = app_state.clone();
    tokio::spawn(async move {
        match reload_directory(&initial, Local::now().date_naive()).await {
            Ok(page) => info!(helpers = page.total_count, "initial helper load complete"),
            Err(failure) => warn!(
                error = %failure.message,
                "initial helper load failed, retry with POST /api/v1/helpers/reload"
            ),
        }
        initial.readiness.store(true, Ordering::Release);
    });

    info!(?config.environment, %addr, source = %config.source.endpoint, "helper directory listening");

    axum::serve(listener, app).await?;
    Ok(())
}
