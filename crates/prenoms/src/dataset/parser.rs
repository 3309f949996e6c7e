use super::normalizer::{clean_header, parse_count, parse_year};
use super::record::{BirthRecord, Department, Sex};
use super::LoadError;
use csv::StringRecord;
use std::io::Read;

pub(crate) const DELIMITER: u8 = b';';

const NAME_COLUMN: &str = "preusuel";
const SEX_COLUMN: &str = "sexe";
const YEAR_COLUMN: &str = "annais";
const DEPARTMENT_COLUMN: &str = "dpt";
const COUNT_COLUMN: &str = "nombre";

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    name: usize,
    sex: usize,
    year: usize,
    department: usize,
    count: usize,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let cleaned: Vec<String> = headers.iter().map(clean_header).collect();
        let position = |column: &'static str| {
            cleaned
                .iter()
                .position(|header| header == column)
                .ok_or(LoadError::MissingColumn(column))
        };

        Ok(Self {
            name: position(NAME_COLUMN)?,
            sex: position(SEX_COLUMN)?,
            year: position(YEAR_COLUMN)?,
            department: position(DEPARTMENT_COLUMN)?,
            count: position(COUNT_COLUMN)?,
        })
    }
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<BirthRecord>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let layout = ColumnLayout::from_headers(csv_reader.headers()?)?;
    let mut records = Vec::new();

    for result in csv_reader.records() {
        let row = result?;
        let line = row.position().map_or(0, |position| position.line());
        records.push(parse_row(&row, layout, line)?);
    }

    Ok(records)
}

fn parse_row(row: &StringRecord, layout: ColumnLayout, line: u64) -> Result<BirthRecord, LoadError> {
    let field = |index: usize| row.get(index).unwrap_or("");

    let raw_year = field(layout.year);
    let year = parse_year(raw_year).ok_or_else(|| LoadError::InvalidYear {
        line,
        value: raw_year.to_string(),
    })?;

    let raw_department = field(layout.department);
    let department = Department::parse(raw_department).ok_or_else(|| LoadError::InvalidDepartment {
        line,
        value: raw_department.to_string(),
    })?;

    let raw_sex = field(layout.sex);
    let sex = Sex::parse(raw_sex).ok_or_else(|| LoadError::InvalidSex {
        line,
        value: raw_sex.to_string(),
    })?;

    let raw_count = field(layout.count);
    let count = parse_count(raw_count).ok_or_else(|| LoadError::InvalidCount {
        line,
        value: raw_count.to_string(),
    })?;

    Ok(BirthRecord {
        name: field(layout.name).to_string(),
        sex,
        year,
        department,
        count,
    })
}
