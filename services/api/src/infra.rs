use metrics_exporter_prometheus::PrometheusHandle;
use prenoms::dataset::{Department, Sex};
use prenoms::query::YearRange;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_sex(raw: &str) -> Result<Sex, String> {
    Sex::parse(raw).ok_or_else(|| format!("'{raw}' is not a sex code (1 = male, 2 = female)"))
}

pub(crate) fn parse_department(raw: &str) -> Result<Department, String> {
    Department::parse(raw).ok_or_else(|| format!("'{raw}' is not a department code"))
}

/// Resolves optional CLI bounds against the dataset's own range.
pub(crate) fn resolve_years(
    from: Option<i32>,
    to: Option<i32>,
    bounds: Option<YearRange>,
) -> Result<YearRange, prenoms::query::QueryError> {
    let bounds = bounds.unwrap_or(YearRange::UNBOUNDED);
    YearRange::new(from.unwrap_or(bounds.min()), to.unwrap_or(bounds.max()))
}
