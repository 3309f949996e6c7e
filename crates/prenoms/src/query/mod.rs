//! Query engine: pure filtering and aggregation over a [`BirthTable`].
//!
//! The two charts use different row sets. The year series honours all four
//! filter dimensions (name, sex, departments, years) while the department map
//! only honours the department selection. Callers must keep this asymmetry;
//! [`dashboard`] does it for them.

mod aggregate;
mod filter;
mod spec;
pub mod views;

pub use aggregate::{aggregate_by_department, aggregate_by_year};
pub use filter::{filter, select_departments};
pub use spec::{FilterSpec, YearRange};
pub use views::{DashboardView, DepartmentMap, DepartmentTotal, YearSeries, YearTotal};

use crate::dataset::BirthTable;
use views::{year_chart_title, FilterView, DEPARTMENT_MAP_TITLE};

/// Rejected filter input. An unknown name is not an error: it simply
/// matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("a first name must be selected")]
    MissingName,
    #[error("sex '{0}' must be 1 (male) or 2 (female)")]
    InvalidSex(String),
    #[error("year '{0}' is not an integer")]
    InvalidYear(String),
    #[error("year range is inverted: {min} > {max}")]
    InvertedYearRange { min: i32, max: i32 },
    #[error("department '{0}' is not a valid code")]
    InvalidDepartment(String),
}

/// Year series for every matching row, ascending by year.
pub fn births_by_year(table: &BirthTable, spec: &FilterSpec) -> Vec<YearTotal> {
    aggregate_by_year(filter(table, spec))
}

/// Department totals for the department selection only.
pub fn births_by_department(table: &BirthTable, spec: &FilterSpec) -> Vec<DepartmentTotal> {
    aggregate_by_department(select_departments(table, &spec.departments))
}

/// One full recomputation of both charts for a filter change.
pub fn dashboard(table: &BirthTable, spec: &FilterSpec) -> DashboardView {
    DashboardView {
        filter: FilterView::from(spec),
        year_series: YearSeries {
            title: year_chart_title(spec),
            x_label: "Année",
            y_label: "Nombre de naissances",
            points: births_by_year(table, spec),
        },
        department_map: DepartmentMap {
            title: DEPARTMENT_MAP_TITLE,
            entries: births_by_department(table, spec),
        },
    }
}
