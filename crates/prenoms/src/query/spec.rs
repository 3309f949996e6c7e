use super::QueryError;
use crate::dataset::{BirthRecord, Department, Sex};
use serde::Serialize;
use std::collections::BTreeSet;

/// Inclusive `[min, max]` year interval; `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct YearRange {
    min: i32,
    max: i32,
}

impl YearRange {
    /// Accepts every year; used when neither the caller nor the table
    /// provides bounds.
    pub const UNBOUNDED: Self = Self {
        min: i32::MIN,
        max: i32::MAX,
    };

    pub fn new(min: i32, max: i32) -> Result<Self, QueryError> {
        if min > max {
            return Err(QueryError::InvertedYearRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub const fn single(year: i32) -> Self {
        Self {
            min: year,
            max: year,
        }
    }

    pub const fn min(self) -> i32 {
        self.min
    }

    pub const fn max(self) -> i32 {
        self.max
    }

    pub const fn contains(self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }

    /// Slider marks every `step` years starting at `min`.
    pub fn marks(self, step: usize) -> Vec<i32> {
        if step == 0 {
            return Vec::new();
        }
        (self.min..=self.max).step_by(step).collect()
    }
}

/// One query against the table: exact name, sex, optional department
/// restriction and an inclusive year range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub name: String,
    pub sex: Sex,
    /// Empty means every department.
    pub departments: BTreeSet<Department>,
    pub years: YearRange,
}

impl FilterSpec {
    pub fn new(name: impl Into<String>, sex: Sex, years: YearRange) -> Self {
        Self {
            name: name.into(),
            sex,
            departments: BTreeSet::new(),
            years,
        }
    }

    pub fn with_departments<I>(mut self, departments: I) -> Self
    where
        I: IntoIterator<Item = Department>,
    {
        self.departments = departments.into_iter().collect();
        self
    }

    pub fn restricts_departments(&self) -> bool {
        !self.departments.is_empty()
    }

    pub fn matches(&self, record: &BirthRecord) -> bool {
        record.name == self.name
            && record.sex == self.sex
            && self.years.contains(record.year)
            && department_selected(&self.departments, &record.department)
    }
}

pub(crate) fn department_selected(
    departments: &BTreeSet<Department>,
    department: &Department,
) -> bool {
    departments.is_empty() || departments.contains(department)
}
