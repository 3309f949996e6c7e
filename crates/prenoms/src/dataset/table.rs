use super::parser;
use super::record::{BirthRecord, Department, Sex};
use super::LoadError;
use crate::query::YearRange;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::hash::Hash;
use std::io::Read;
use std::path::Path;

/// Immutable, fully memory-resident birth statistics table.
///
/// Built once at startup and shared read-only (typically behind an `Arc`);
/// no method hands out mutable access to the rows.
#[derive(Debug, Clone)]
pub struct BirthTable {
    records: Vec<BirthRecord>,
    loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub names: usize,
    pub departments: usize,
    pub total_births: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<YearRange>,
    pub loaded_at: DateTime<Utc>,
}

impl BirthTable {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let records = parser::parse_records(reader)?;
        Ok(Self::from_records(records))
    }

    /// Wraps already-normalized rows, mainly for synthetic tables in tests.
    pub fn from_records(records: Vec<BirthRecord>) -> Self {
        Self {
            records,
            loaded_at: Utc::now(),
        }
    }

    pub fn records(&self) -> &[BirthRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BirthRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Distinct values of one field, in the order they first appear.
    pub fn distinct_values<'a, T, F>(&'a self, field: F) -> Vec<T>
    where
        F: Fn(&'a BirthRecord) -> T,
        T: Eq + Hash + Clone,
    {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for record in &self.records {
            let value = field(record);
            if seen.insert(value.clone()) {
                ordered.push(value);
            }
        }
        ordered
    }

    pub fn names(&self) -> Vec<&str> {
        self.distinct_values(|record| record.name.as_str())
    }

    pub fn departments(&self) -> Vec<&Department> {
        self.distinct_values(|record| &record.department)
    }

    pub fn sexes(&self) -> Vec<Sex> {
        self.distinct_values(|record| record.sex)
    }

    pub fn year_bounds(&self) -> Option<YearRange> {
        let min = self.records.iter().map(|record| record.year).min()?;
        let max = self.records.iter().map(|record| record.year).max()?;
        YearRange::new(min, max).ok()
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            rows: self.records.len(),
            names: self.names().len(),
            departments: self.departments().len(),
            total_births: self.records.iter().map(|record| record.count).sum(),
            years: self.year_bounds(),
            loaded_at: self.loaded_at,
        }
    }
}

impl<'a> IntoIterator for &'a BirthTable {
    type Item = &'a BirthRecord;
    type IntoIter = std::slice::Iter<'a, BirthRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn department(code: &str) -> Department {
        Department::parse(code).expect("valid department")
    }

    fn table() -> BirthTable {
        BirthTable::from_records(vec![
            BirthRecord::new("ZOÉ", Sex::Female, 2004, department("75"), 3),
            BirthRecord::new("ADAM", Sex::Male, 1999, department("13"), 2),
            BirthRecord::new("ZOÉ", Sex::Female, 2001, department("13"), 4),
            BirthRecord::new("ADAM", Sex::Male, 2010, department("2A"), 1),
        ])
    }

    #[test]
    fn distinct_values_keep_first_seen_order() {
        let table = table();
        assert_eq!(table.names(), vec!["ZOÉ", "ADAM"]);
        let departments: Vec<&str> = table
            .departments()
            .into_iter()
            .map(Department::as_str)
            .collect();
        assert_eq!(departments, vec!["75", "13", "2A"]);
        assert_eq!(table.sexes(), vec![Sex::Female, Sex::Male]);
        assert_eq!(
            table.distinct_values(|record| record.year),
            vec![2004, 1999, 2001, 2010]
        );
    }

    #[test]
    fn year_bounds_span_the_table() {
        let bounds = table().year_bounds().expect("bounds");
        assert_eq!((bounds.min(), bounds.max()), (1999, 2010));
        assert!(BirthTable::from_records(Vec::new()).year_bounds().is_none());
    }

    #[test]
    fn summary_counts_rows_and_births() {
        let summary = table().summary();
        assert_eq!(summary.rows, 4);
        assert_eq!(summary.names, 2);
        assert_eq!(summary.departments, 3);
        assert_eq!(summary.total_births, 10);
    }
}
