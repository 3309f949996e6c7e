use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::options::DashboardOptions;
use super::params::{DepartmentParams, FilterParams};
use crate::dataset::BirthTable;
use crate::error::AppError;
use crate::geography::GeoReference;
use crate::query::{self, DashboardView, DepartmentTotal, YearTotal};

/// Immutable state shared by every dashboard request.
#[derive(Debug, Clone)]
pub struct DashboardState {
    table: Arc<BirthTable>,
    geography: Option<Arc<GeoReference>>,
}

impl DashboardState {
    pub fn new(table: Arc<BirthTable>, geography: Option<Arc<GeoReference>>) -> Self {
        Self { table, geography }
    }

    pub fn table(&self) -> &BirthTable {
        &self.table
    }

    pub fn geography(&self) -> Option<&GeoReference> {
        self.geography.as_deref()
    }
}

#[derive(Debug, Serialize)]
pub struct YearSeriesResponse {
    pub title: String,
    pub points: Vec<YearTotal>,
}

#[derive(Debug, Serialize)]
pub struct DepartmentTotalsResponse {
    pub title: &'static str,
    pub entries: Vec<DepartmentTotal>,
}

/// Router exposing filter options, both aggregated views and the map
/// boundaries.
pub fn dashboard_router(state: DashboardState) -> Router {
    Router::new()
        .route("/api/v1/options", get(options_handler))
        .route("/api/v1/births/by-year", get(by_year_handler))
        .route("/api/v1/births/by-department", get(by_department_handler))
        .route("/api/v1/dashboard", get(dashboard_handler))
        .route("/api/v1/geography", get(geography_handler))
        .with_state(state)
}

pub(crate) async fn options_handler(State(state): State<DashboardState>) -> Json<DashboardOptions> {
    Json(DashboardOptions::from_table(
        state.table(),
        state.geography().is_some(),
    ))
}

pub(crate) async fn by_year_handler(
    State(state): State<DashboardState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<YearSeriesResponse>, AppError> {
    let spec = params.into_filter_spec(state.table())?;
    Ok(Json(YearSeriesResponse {
        title: query::views::year_chart_title(&spec),
        points: query::births_by_year(state.table(), &spec),
    }))
}

pub(crate) async fn by_department_handler(
    State(state): State<DashboardState>,
    Query(params): Query<DepartmentParams>,
) -> Result<Json<DepartmentTotalsResponse>, AppError> {
    let departments = params.into_departments()?;
    let rows = query::select_departments(state.table(), &departments);
    Ok(Json(DepartmentTotalsResponse {
        title: query::views::DEPARTMENT_MAP_TITLE,
        entries: query::aggregate_by_department(rows),
    }))
}

pub(crate) async fn dashboard_handler(
    State(state): State<DashboardState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<DashboardView>, AppError> {
    let spec = params.into_filter_spec(state.table())?;
    let view = query::dashboard(state.table(), &spec);
    tracing::debug!(
        name = %spec.name,
        sex = spec.sex.code(),
        departments = spec.departments.len(),
        points = view.year_series.points.len(),
        "dashboard recomputed"
    );
    Ok(Json(view))
}

pub(crate) async fn geography_handler(
    State(state): State<DashboardState>,
) -> Result<impl IntoResponse, AppError> {
    let reference = state.geography().ok_or(AppError::GeographyUnavailable)?;
    Ok((
        [(header::CONTENT_TYPE, "application/geo+json")],
        reference.body(),
    ))
}
