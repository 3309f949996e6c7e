use super::normalizer::normalize_department;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const fn ordered() -> [Self; 2] {
        [Self::Male, Self::Female]
    }

    /// Numeric code used by the source file (`sexe` column).
    pub const fn code(self) -> u8 {
        match self {
            Self::Male => 1,
            Self::Female => 2,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Male),
            2 => Some(Self::Female),
            _ => None,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<u8>().ok().and_then(Self::from_code)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Masculin",
            Self::Female => "Féminin",
        }
    }
}

/// Department code, zero-padded to at least two characters (`"05"`, `"2A"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Department(String);

impl Department {
    /// Normalizes a raw code; `5`, `"5"` and `" 05 "` all become `"05"`.
    pub fn parse(raw: &str) -> Option<Self> {
        normalize_department(raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Department {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One row of the birth statistics table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthRecord {
    pub name: String,
    pub sex: Sex,
    pub year: i32,
    pub department: Department,
    pub count: u64,
}

impl BirthRecord {
    pub fn new(
        name: impl Into<String>,
        sex: Sex,
        year: i32,
        department: Department,
        count: u64,
    ) -> Self {
        Self {
            name: name.into(),
            sex,
            year,
            department,
            count,
        }
    }
}
