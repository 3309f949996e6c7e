use crate::infra::{parse_department, parse_sex, resolve_years};
use clap::Args;
use prenoms::config::AppConfig;
use prenoms::dataset::{BirthTable, Department, Sex};
use prenoms::error::AppError;
use prenoms::query::{dashboard, DashboardView, FilterSpec};
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// First name, matched exactly as written in the dataset
    #[arg(long)]
    pub(crate) name: String,
    /// Sex code: 1 (male) or 2 (female)
    #[arg(long, value_parser = parse_sex, default_value = "1")]
    pub(crate) sex: Sex,
    /// Comma separated department codes (defaults to every department)
    #[arg(long, value_delimiter = ',', value_parser = parse_department)]
    pub(crate) departments: Vec<Department>,
    /// First year included (defaults to the earliest year in the data)
    #[arg(long)]
    pub(crate) from: Option<i32>,
    /// Last year included (defaults to the latest year in the data)
    #[arg(long)]
    pub(crate) to: Option<i32>,
    /// Birth statistics CSV (defaults to the configured path)
    #[arg(long)]
    pub(crate) data: Option<PathBuf>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        name,
        sex,
        departments,
        from,
        to,
        data,
    } = args;

    let path = match data {
        Some(path) => path,
        None => AppConfig::load()?.dataset.path,
    };
    let table = BirthTable::from_path(&path)?;
    let years = resolve_years(from, to, table.year_bounds())?;
    let spec = FilterSpec::new(name, sex, years).with_departments(departments);

    let view = dashboard(&table, &spec);
    print!("{}", render_report(&view));
    Ok(())
}

pub(crate) fn render_report(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.year_series.title);
    let _ = writeln!(
        out,
        "Years {} -> {}",
        view.filter.years.min(),
        view.filter.years.max()
    );

    if view.year_series.points.is_empty() {
        let _ = writeln!(out, "\nNo births match this selection");
    } else {
        let _ = writeln!(out, "\n{:<8}{:>10}", view.year_series.x_label, "Naissances");
        for point in &view.year_series.points {
            let _ = writeln!(out, "{:<8}{:>10}", point.year, point.total);
        }
        let total: u64 = view.year_series.points.iter().map(|point| point.total).sum();
        let _ = writeln!(out, "{:<8}{:>10}", "Total", total);
    }

    let _ = writeln!(out, "\n{}", view.department_map.title);
    if view.department_map.entries.is_empty() {
        let _ = writeln!(out, "- none");
    }
    for entry in &view.department_map.entries {
        let _ = writeln!(out, "- {}: {}", entry.department, entry.total);
    }

    out
}
