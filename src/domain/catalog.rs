//! Static column catalog: the single source of truth linking a column index
//! to its header label, semantic kind, sort sentinel and cell formatter.

use crate::domain::date::days_to_date_string;
use crate::domain::entities::player::CellValue;

/// Raw value a rating column carries when the player has no rating there.
pub const RATING_SENTINEL: f64 = -1.0;

/// GK, LD, RD, LW, C and RW ratings.
pub const RATING_COLUMN_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Numeric,
    RatingPercentage,
    Date,
    PositionVector,
    CompositeName,
}

impl ColumnKind {
    /// The "no data" value that sorts last in either direction.
    pub fn sentinel(self) -> CellValue {
        match self {
            ColumnKind::RatingPercentage => CellValue::Number(RATING_SENTINEL),
            _ => CellValue::Text(String::new()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub label: &'static str,
    pub kind: ColumnKind,
}

const fn column(label: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec { label, kind }
}

pub const COLUMNS: [ColumnSpec; 21] = [
    column("Name", ColumnKind::CompositeName),
    column("Nation", ColumnKind::Text),
    column("Second Nation", ColumnKind::Text),
    column("Club Contracted", ColumnKind::Text),
    column("Club Playing", ColumnKind::Text),
    column("Birthday", ColumnKind::Date),
    column("Position", ColumnKind::PositionVector),
    column("GK Rating", ColumnKind::RatingPercentage),
    column("LD Rating", ColumnKind::RatingPercentage),
    column("RD Rating", ColumnKind::RatingPercentage),
    column("LW Rating", ColumnKind::RatingPercentage),
    column("C Rating", ColumnKind::RatingPercentage),
    column("RW Rating", ColumnKind::RatingPercentage),
    column("Current Ability", ColumnKind::Numeric),
    column("Potential Ability", ColumnKind::Numeric),
    column("Adaptability", ColumnKind::Numeric),
    column("Ambition", ColumnKind::Numeric),
    column("Determination", ColumnKind::Numeric),
    column("Loyalty", ColumnKind::Numeric),
    column("Professionalism", ColumnKind::Numeric),
    column("Temperament", ColumnKind::Numeric),
];

/// Labels for position codes 1..=6.
const POSITION_LABELS: [&str; 6] = ["GK", "LD", "RD", "LW", "C", "RW"];

pub fn column_count() -> usize {
    COLUMNS.len()
}

pub fn column_spec(index: usize) -> Option<&'static ColumnSpec> {
    COLUMNS.get(index)
}

/// Unknown indices behave like plain text columns.
pub fn column_kind(index: usize) -> ColumnKind {
    column_spec(index)
        .map(|spec| spec.kind)
        .unwrap_or(ColumnKind::Text)
}

pub fn headers() -> Vec<String> {
    COLUMNS.iter().map(|spec| spec.label.to_string()).collect()
}

pub fn position_label(code: u8) -> Option<&'static str> {
    (code as usize)
        .checked_sub(1)
        .and_then(|idx| POSITION_LABELS.get(idx))
        .copied()
}

pub fn position_code(label: &str) -> Option<u8> {
    POSITION_LABELS
        .iter()
        .position(|known| known.eq_ignore_ascii_case(label.trim()))
        .map(|idx| idx as u8 + 1)
}

/// Joins position codes into the `C/LW` form shown in the Position column.
pub fn position_string(positions: &[u8]) -> String {
    positions
        .iter()
        .filter_map(|code| position_label(*code))
        .collect::<Vec<_>>()
        .join("/")
}

pub fn format_rating(value: f64) -> String {
    if value == RATING_SENTINEL {
        return String::new();
    }
    format!("{:.2}", value * 100.0)
}

/// Display text for a raw cell of the given column.
pub fn format_cell(index: usize, value: &CellValue) -> String {
    match (column_kind(index), value) {
        (ColumnKind::Date, CellValue::Number(serial)) => days_to_date_string(*serial as i64),
        (ColumnKind::RatingPercentage, CellValue::Number(rating)) => format_rating(*rating),
        _ => value.to_string(),
    }
}
