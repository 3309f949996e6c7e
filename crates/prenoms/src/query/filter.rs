use super::spec::{department_selected, FilterSpec};
use crate::dataset::{BirthRecord, BirthTable, Department};
use std::collections::BTreeSet;

/// Rows matching every condition of `spec`. No match yields an empty vector.
pub fn filter<'a>(table: &'a BirthTable, spec: &FilterSpec) -> Vec<&'a BirthRecord> {
    table.iter().filter(|record| spec.matches(record)).collect()
}

/// Rows of the selected departments regardless of name, sex or year.
///
/// This is the row set behind the department map: unlike the year series it
/// reacts to the department selection only.
pub fn select_departments<'a>(
    table: &'a BirthTable,
    departments: &BTreeSet<Department>,
) -> Vec<&'a BirthRecord> {
    table
        .iter()
        .filter(|record| department_selected(departments, &record.department))
        .collect()
}
