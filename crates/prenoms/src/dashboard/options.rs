use crate::dataset::{BirthTable, DatasetSummary, Department, Sex};
use crate::query::YearRange;
use serde::Serialize;

/// Spacing of the year-slider marks.
pub const YEAR_MARK_STEP: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct SexOption {
    pub code: u8,
    pub label: &'static str,
}

/// Initial state of the controls: first name seen, male, every department,
/// the whole year range.
#[derive(Debug, Clone, Serialize)]
pub struct DefaultSelection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub sex: u8,
    pub departments: Vec<Department>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<YearRange>,
}

/// Everything the UI needs to populate its selection widgets.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardOptions {
    pub names: Vec<String>,
    pub sexes: Vec<SexOption>,
    pub departments: Vec<Department>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<YearRange>,
    pub year_marks: Vec<i32>,
    pub defaults: DefaultSelection,
    pub geography_available: bool,
    pub dataset: DatasetSummary,
}

impl DashboardOptions {
    pub fn from_table(table: &BirthTable, geography_available: bool) -> Self {
        let names: Vec<String> = table.names().into_iter().map(str::to_string).collect();
        let years = table.year_bounds();

        Self {
            defaults: DefaultSelection {
                name: names.first().cloned(),
                sex: Sex::Male.code(),
                departments: Vec::new(),
                years,
            },
            names,
            sexes: Sex::ordered()
                .into_iter()
                .map(|sex| SexOption {
                    code: sex.code(),
                    label: sex.label(),
                })
                .collect(),
            departments: table.departments().into_iter().cloned().collect(),
            year_marks: years
                .map(|range| range.marks(YEAR_MARK_STEP))
                .unwrap_or_default(),
            years,
            geography_available,
            dataset: table.summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::BirthRecord;

    #[test]
    fn defaults_follow_first_seen_values() {
        let department = |code: &str| Department::parse(code).expect("department");
        let table = BirthTable::from_records(vec![
            BirthRecord::new("NOAH", Sex::Male, 2012, department("69"), 5),
            BirthRecord::new("EMMA", Sex::Female, 2001, department("1"), 7),
        ]);

        let options = DashboardOptions::from_table(&table, false);
        assert_eq!(options.names, vec!["NOAH", "EMMA"]);
        assert_eq!(options.defaults.name.as_deref(), Some("NOAH"));
        assert_eq!(options.defaults.sex, 1);
        assert_eq!(options.departments, vec![department("69"), department("01")]);
        assert_eq!(options.year_marks, vec![2001, 2006, 2011]);
        assert!(!options.geography_available);
    }

    #[test]
    fn empty_table_has_no_year_controls() {
        let options = DashboardOptions::from_table(&BirthTable::from_records(Vec::new()), true);
        assert!(options.names.is_empty());
        assert!(options.years.is_none());
        assert!(options.year_marks.is_empty());
        assert!(options.defaults.name.is_none());
    }
}
