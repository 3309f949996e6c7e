use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use prenoms::config::{AppConfig, GeographyConfig};
use prenoms::dashboard::{dashboard_router, DashboardState};
use prenoms::dataset::BirthTable;
use prenoms::error::AppError;
use prenoms::geography::{GeoReference, GeographyLoader};
use prenoms::telemetry;
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
    if let Some(path) = args.data.take() {
        config.dataset.path = path;
    }
    if let Some(url) = args.geojson_url.take() {
        config.geography.url = url;
    }

    telemetry::init(&config.telemetry)?;

    let table = BirthTable::from_path(&config.dataset.path)?;
    let summary = table.summary();
    info!(
        path = %config.dataset.path.display(),
        rows = summary.rows,
        names = summary.names,
        departments = summary.departments,
        years = ?summary.years,
        "birth dataset loaded"
    );

    let geography = load_geography(&config.geography).await?;
    if let Some(reference) = &geography {
        let departments = table.departments();
        let unmatched = reference.unmatched(departments.iter().copied());
        if !unmatched.is_empty() {
            warn!(
                count = unmatched.len(),
                departments = ?unmatched.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                "departments without boundary feature will be missing from the map"
            );
        }
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let dashboard_state = DashboardState::new(Arc::new(table), geography.map(Arc::new));
    let app = with_service_routes(dashboard_router(dashboard_state))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "birth statistics dashboard ready");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Fetches the map boundaries. Without `required`, any failure only
/// disables the map.
async fn load_geography(config: &GeographyConfig) -> Result<Option<GeoReference>, AppError> {
    let result = match GeographyLoader::new(config) {
        Ok(loader) => loader.load().await,
        Err(err) => Err(err),
    };

    match result {
        Ok(reference) => Ok(Some(reference)),
        Err(err) if config.required => Err(err.into()),
        Err(err) => {
            warn!(url = %config.url, error = %err, "continuing without the department map");
            Ok(None)
        }
    }
}
