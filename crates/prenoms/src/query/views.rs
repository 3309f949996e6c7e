use super::spec::{FilterSpec, YearRange};
use crate::dataset::{Department, Sex};
use serde::Serialize;

pub const DEPARTMENT_MAP_TITLE: &str = "Nombre de naissances par département";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearTotal {
    pub year: i32,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentTotal {
    pub department: Department,
    pub total: u64,
}

/// Echo of the filter that produced a view, as the UI controls show it.
#[derive(Debug, Clone, Serialize)]
pub struct FilterView {
    pub name: String,
    pub sex: Sex,
    pub sex_code: u8,
    pub sex_label: &'static str,
    pub departments: Vec<Department>,
    pub years: YearRange,
}

impl From<&FilterSpec> for FilterView {
    fn from(spec: &FilterSpec) -> Self {
        Self {
            name: spec.name.clone(),
            sex: spec.sex,
            sex_code: spec.sex.code(),
            sex_label: spec.sex.label(),
            departments: spec.departments.iter().cloned().collect(),
            years: spec.years,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct YearSeries {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<YearTotal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentMap {
    pub title: &'static str,
    pub entries: Vec<DepartmentTotal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub filter: FilterView,
    pub year_series: YearSeries,
    pub department_map: DepartmentMap,
}

pub fn year_chart_title(spec: &FilterSpec) -> String {
    let scope = if spec.restricts_departments() {
        " dans les départements sélectionnés"
    } else {
        " (tous départements)"
    };
    format!(
        "Nombre de naissances pour le prénom {} ({}) par année{}",
        spec.name,
        spec.sex.label(),
        scope
    )
}
