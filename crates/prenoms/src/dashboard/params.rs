use crate::dataset::{BirthTable, Department, Sex};
use crate::query::{FilterSpec, QueryError, YearRange};
use serde::Deserialize;
use std::collections::BTreeSet;

/// Query string of the year-series and dashboard endpoints.
///
/// Everything arrives as text so malformed values produce a JSON
/// [`QueryError`] rather than an extractor rejection.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FilterParams {
    pub name: Option<String>,
    pub sex: Option<String>,
    /// Comma separated department codes; absent or empty means all.
    pub departments: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Query string of the department endpoint, which only honours departments.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DepartmentParams {
    pub departments: Option<String>,
}

impl FilterParams {
    /// Missing year bounds default to the table's full range.
    pub fn into_filter_spec(self, table: &BirthTable) -> Result<FilterSpec, QueryError> {
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or(QueryError::MissingName)?;

        let sex = match self.sex.as_deref() {
            Some(raw) => Sex::parse(raw).ok_or_else(|| QueryError::InvalidSex(raw.to_string()))?,
            None => Sex::Male,
        };

        let bounds = table.year_bounds().unwrap_or(YearRange::UNBOUNDED);
        let min = parse_year(self.from.as_deref())?.unwrap_or(bounds.min());
        let max = parse_year(self.to.as_deref())?.unwrap_or(bounds.max());
        let years = YearRange::new(min, max)?;

        let departments = parse_departments(self.departments.as_deref())?;
        Ok(FilterSpec::new(name, sex, years).with_departments(departments))
    }
}

impl DepartmentParams {
    pub fn into_departments(self) -> Result<BTreeSet<Department>, QueryError> {
        parse_departments(self.departments.as_deref())
    }
}

fn parse_year(raw: Option<&str>) -> Result<Option<i32>, QueryError> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value
            .parse::<i32>()
            .map(Some)
            .map_err(|_| QueryError::InvalidYear(value.to_string())),
        None => Ok(None),
    }
}

pub fn parse_departments(raw: Option<&str>) -> Result<BTreeSet<Department>, QueryError> {
    raw.unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| {
            Department::parse(code).ok_or_else(|| QueryError::InvalidDepartment(code.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::BirthRecord;

    fn table() -> BirthTable {
        let paris = Department::parse("75").expect("department");
        BirthTable::from_records(vec![
            BirthRecord::new("ALICE", Sex::Female, 1950, paris.clone(), 2),
            BirthRecord::new("ALICE", Sex::Female, 2010, paris, 4),
        ])
    }

    #[test]
    fn defaults_cover_the_full_year_range() {
        let params = FilterParams {
            name: Some("ALICE".to_string()),
            ..FilterParams::default()
        };
        let spec = params.into_filter_spec(&table()).expect("spec");
        assert_eq!(spec.sex, Sex::Male);
        assert_eq!((spec.years.min(), spec.years.max()), (1950, 2010));
        assert!(spec.departments.is_empty());
    }

    #[test]
    fn departments_are_normalized() {
        let departments = parse_departments(Some("5, 2a,,75")).expect("departments");
        let codes: Vec<&str> = departments.iter().map(Department::as_str).collect();
        assert_eq!(codes, vec!["05", "2A", "75"]);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let table = table();
        let missing_name = FilterParams::default().into_filter_spec(&table);
        assert_eq!(missing_name, Err(QueryError::MissingName));

        let inverted = FilterParams {
            name: Some("ALICE".to_string()),
            from: Some("2000".to_string()),
            to: Some("1990".to_string()),
            ..FilterParams::default()
        }
        .into_filter_spec(&table);
        assert_eq!(
            inverted,
            Err(QueryError::InvertedYearRange {
                min: 2000,
                max: 1990
            })
        );

        let bad_sex = FilterParams {
            name: Some("ALICE".to_string()),
            sex: Some("3".to_string()),
            ..FilterParams::default()
        }
        .into_filter_spec(&table);
        assert_eq!(bad_sex, Err(QueryError::InvalidSex("3".to_string())));

        let bad_year = FilterParams {
            name: Some("ALICE".to_string()),
            from: Some("19x0".to_string()),
            ..FilterParams::default()
        }
        .into_filter_spec(&table);
        assert_eq!(bad_year, Err(QueryError::InvalidYear("19x0".to_string())));

        assert_eq!(
            parse_departments(Some("75,7-5")),
            Err(QueryError::InvalidDepartment("7-5".to_string()))
        );
    }
}
