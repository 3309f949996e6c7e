use super::views::{DepartmentTotal, YearTotal};
use crate::dataset::{BirthRecord, Department};
use std::collections::BTreeMap;

/// Sums counts per year, ascending by year. Years without rows are absent.
pub fn aggregate_by_year<'a, I>(rows: I) -> Vec<YearTotal>
where
    I: IntoIterator<Item = &'a BirthRecord>,
{
    let mut totals: BTreeMap<i32, u64> = BTreeMap::new();
    for record in rows {
        *totals.entry(record.year).or_default() += record.count;
    }

    totals
        .into_iter()
        .map(|(year, total)| YearTotal { year, total })
        .collect()
}

/// Sums counts per department, ordered by department code.
pub fn aggregate_by_department<'a, I>(rows: I) -> Vec<DepartmentTotal>
where
    I: IntoIterator<Item = &'a BirthRecord>,
{
    let mut totals: BTreeMap<&'a Department, u64> = BTreeMap::new();
    for record in rows {
        *totals.entry(&record.department).or_default() += record.count;
    }

    totals
        .into_iter()
        .map(|(department, total)| DepartmentTotal {
            department: department.clone(),
            total,
        })
        .collect()
}
