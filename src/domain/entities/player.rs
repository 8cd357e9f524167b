use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Highest number of position slots a player can carry.
pub const MAX_POSITIONS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayName {
    pub forename: String,
    pub surname: String,
}

impl DisplayName {
    pub fn new(forename: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            forename: forename.into(),
            surname: surname.into(),
        }
    }

    /// Surname-major, forename-minor.
    pub fn cmp_surname_first(&self, other: &Self) -> Ordering {
        self.surname
            .cmp(&other.surname)
            .then_with(|| self.forename.cmp(&other.forename))
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.forename.is_empty(), self.surname.is_empty()) {
            (true, _) => write!(f, "{}", self.surname),
            (false, true) => write!(f, "{}", self.forename),
            (false, false) => write!(f, "{} {}", self.forename, self.surname),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// A raw cell as delivered by the backend: either a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Natural ordering: numbers by value, strings lexicographically,
    /// numbers before strings when the kinds are mixed.
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Number(_), CellValue::Text(_)) => Ordering::Less,
            (CellValue::Text(_), CellValue::Number(_)) => Ordering::Greater,
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{}", *value as i64)
            }
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Text(value) => f.write_str(value),
        }
    }
}

/// One player row flowing from the backend to the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub id: i64,
    pub name: DisplayName,
    pub date_of_birth: BirthDate,
    /// Position codes in preference order, at most [`MAX_POSITIONS`].
    pub positions: Vec<u8>,
    /// Raw cell values aligned 1:1 with the column catalog.
    pub columns: Vec<CellValue>,
}

impl PlayerRecord {
    pub fn position(&self, slot: usize) -> Option<u8> {
        if slot >= MAX_POSITIONS {
            return None;
        }
        self.positions.get(slot).copied()
    }
}
