use std::cmp::Ordering;

use tracing::debug;

use crate::domain::catalog::{column_kind, ColumnKind};
use crate::domain::entities::player::{CellValue, PlayerRecord, MAX_POSITIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Column and direction of the last applied sort. `direction` carries over to
/// the next click on the same column; a different column starts ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub last_applied_column: Option<usize>,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOutcome {
    pub column: usize,
    pub direction: SortDirection,
    /// The first attempt left the order untouched and the direction was flipped.
    pub flipped: bool,
    /// The record order differs from the order before the call.
    pub changed: bool,
}

pub fn compare_names(a: &PlayerRecord, b: &PlayerRecord, direction: SortDirection) -> Ordering {
    direction.apply(a.name.cmp_surname_first(&b.name))
}

/// Slot-by-slot comparison of position codes. A shorter list that is a prefix
/// of the other comes first; players without any position sort last in
/// either direction.
pub fn compare_positions(a: &PlayerRecord, b: &PlayerRecord, direction: SortDirection) -> Ordering {
    match (a.positions.is_empty(), b.positions.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    for slot in 0..MAX_POSITIONS {
        let ordering = match (a.position(slot), b.position(slot)) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) if x == y => continue,
            (Some(x), Some(y)) => x.cmp(&y),
        };
        return direction.apply(ordering);
    }

    Ordering::Equal
}

/// Compares one raw column. Cells equal to `sentinel`, or missing, sort last
/// in either direction.
pub fn compare_generic(
    a: &PlayerRecord,
    b: &PlayerRecord,
    column: usize,
    sentinel: &CellValue,
    direction: SortDirection,
) -> Ordering {
    let a_col = a.columns.get(column).unwrap_or(sentinel);
    let b_col = b.columns.get(column).unwrap_or(sentinel);

    if a_col == b_col {
        return Ordering::Equal;
    }
    if a_col == sentinel {
        return Ordering::Greater;
    }
    if b_col == sentinel {
        return Ordering::Less;
    }

    direction.apply(a_col.natural_cmp(b_col))
}

pub fn compare_records(
    a: &PlayerRecord,
    b: &PlayerRecord,
    column: usize,
    direction: SortDirection,
) -> Ordering {
    match column_kind(column) {
        ColumnKind::CompositeName => compare_names(a, b, direction),
        ColumnKind::PositionVector => compare_positions(a, b, direction),
        kind => compare_generic(a, b, column, &kind.sentinel(), direction),
    }
}

/// Stable sort of record indices; the records themselves are not touched.
pub fn sorted_permutation(
    records: &[PlayerRecord],
    column: usize,
    direction: SortDirection,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| compare_records(&records[a], &records[b], column, direction));
    order
}

pub fn is_identity(order: &[usize]) -> bool {
    order.iter().enumerate().all(|(position, idx)| position == *idx)
}

pub fn apply_permutation(records: &mut Vec<PlayerRecord>, order: &[usize]) {
    let mut slots: Vec<Option<PlayerRecord>> = records.drain(..).map(Some).collect();
    records.extend(order.iter().filter_map(|idx| slots.get_mut(*idx).and_then(Option::take)));
}

#[derive(Debug, Clone, Default)]
pub struct SortEngine {
    state: SortState,
}

impl SortEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SortState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = SortState::default();
    }

    /// Sorts `records` by `column`. A fresh column starts ascending, a repeated
    /// one continues from its last direction. When that leaves the order
    /// unchanged the direction is flipped once and the sort re-applied.
    pub fn sort_by(&mut self, records: &mut Vec<PlayerRecord>, column: usize) -> SortOutcome {
        let mut direction = match self.state.last_applied_column {
            Some(last) if last == column => self.state.direction,
            _ => SortDirection::Ascending,
        };

        let mut order = sorted_permutation(records, column, direction);
        let mut flipped = false;
        if is_identity(&order) {
            direction = direction.flipped();
            flipped = true;
            order = sorted_permutation(records, column, direction);
        }

        let changed = !is_identity(&order);
        if changed {
            apply_permutation(records, &order);
        }

        self.state = SortState {
            last_applied_column: Some(column),
            direction,
        };
        debug!(column, ?direction, flipped, changed, "sort applied");

        SortOutcome {
            column,
            direction,
            flipped,
            changed,
        }
    }
}
