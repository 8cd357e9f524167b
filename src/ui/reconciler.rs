use crate::domain::catalog::format_cell;
use crate::domain::entities::player::PlayerRecord;

/// Row container the reconciler writes into.
pub trait RowSurface {
    fn row_count(&self) -> usize;
    /// Overwrites one cell's text; returns whether the text changed.
    fn set_cell_text(&mut self, row: usize, column: usize, text: String) -> bool;
    fn append_row(&mut self, cells: Vec<String>);
    fn remove_last_row(&mut self);
}

/// Retained table body rendered by the view. Row positions are stable, so
/// the view keys rows by position and reuses their nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBody {
    rows: Vec<Vec<String>>,
}

impl TableBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

impl RowSurface for TableBody {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn set_cell_text(&mut self, row: usize, column: usize, text: String) -> bool {
        let Some(cells) = self.rows.get_mut(row) else {
            return false;
        };
        if column >= cells.len() {
            cells.resize(column + 1, String::new());
        }
        if cells[column] == text {
            return false;
        }
        cells[column] = text;
        true
    }

    fn append_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn remove_last_row(&mut self) {
        self.rows.pop();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileStats {
    pub reused_rows: usize,
    pub created_rows: usize,
    pub removed_rows: usize,
    pub changed_cells: usize,
}

/// Writes the page slice into `surface`, reusing existing rows in place,
/// appending missing ones and dropping surplus rows from the end.
pub fn reconcile<S: RowSurface + ?Sized>(surface: &mut S, slice: &[PlayerRecord]) -> ReconcileStats {
    let mut stats = ReconcileStats::default();

    for (position, record) in slice.iter().enumerate() {
        let cells = record
            .columns
            .iter()
            .enumerate()
            .map(|(column, value)| format_cell(column, value));

        if position < surface.row_count() {
            for (column, text) in cells.enumerate() {
                if surface.set_cell_text(position, column, text) {
                    stats.changed_cells += 1;
                }
            }
            stats.reused_rows += 1;
        } else {
            surface.append_row(cells.collect());
            stats.created_rows += 1;
        }
    }

    while surface.row_count() > slice.len() {
        surface.remove_last_row();
        stats.removed_rows += 1;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{column_count, RATING_SENTINEL};
    use crate::domain::entities::player::{BirthDate, CellValue, DisplayName};

    fn record(id: i64, nation: &str, rating: f64) -> PlayerRecord {
        let mut columns = vec![CellValue::text(""); column_count()];
        columns[0] = CellValue::text(format!("Player {id}"));
        columns[1] = CellValue::text(nation);
        columns[5] = CellValue::Number(id as f64);
        columns[7] = CellValue::Number(rating);
        PlayerRecord {
            id,
            name: DisplayName::new("Player", id.to_string()),
            date_of_birth: BirthDate {
                year: 1900,
                month: 2,
                day: 1,
            },
            positions: vec![1],
            columns,
        }
    }

    #[test]
    fn first_render_creates_rows_with_formatted_cells() {
        let mut body = TableBody::new();
        let slice = vec![record(0, "Canada", 0.5), record(1, "Sweden", RATING_SENTINEL)];

        let stats = reconcile(&mut body, &slice);

        assert_eq!(stats.created_rows, 2);
        assert_eq!(stats.reused_rows, 0);
        assert_eq!(body.rows()[0][1], "Canada");
        assert_eq!(body.rows()[0][5], "1.2.1900");
        assert_eq!(body.rows()[0][7], "50.00");
        assert_eq!(body.rows()[1][7], "");
        assert_eq!(body.rows()[0].len(), column_count());
    }

    #[test]
    fn rendering_twice_is_idempotent() {
        let mut body = TableBody::new();
        let slice = vec![record(0, "Canada", 0.5), record(1, "Sweden", 0.25)];

        reconcile(&mut body, &slice);
        let snapshot = body.clone();
        let stats = reconcile(&mut body, &slice);

        assert_eq!(body, snapshot);
        assert_eq!(body.row_count(), 2);
        assert_eq!(stats.reused_rows, 2);
        assert_eq!(stats.created_rows, 0);
        assert_eq!(stats.changed_cells, 0);
    }

    #[test]
    fn existing_rows_are_overwritten_in_place() {
        let mut body = TableBody::new();
        reconcile(&mut body, &[record(0, "Canada", 0.5), record(1, "Sweden", 0.25)]);

        let stats = reconcile(&mut body, &[record(2, "Finland", 0.5), record(1, "Sweden", 0.25)]);

        assert_eq!(stats.reused_rows, 2);
        assert_eq!(stats.created_rows, 0);
        assert_eq!(stats.changed_cells, 3);
        assert_eq!(body.rows()[0][1], "Finland");
    }

    #[test]
    fn surplus_rows_are_removed_from_the_end() {
        let mut body = TableBody::new();
        reconcile(
            &mut body,
            &[record(0, "A", 0.1), record(1, "B", 0.2), record(2, "C", 0.3)],
        );

        let stats = reconcile(&mut body, &[record(5, "E", 0.1)]);

        assert_eq!(stats.removed_rows, 2);
        assert_eq!(body.row_count(), 1);
        assert_eq!(body.rows()[0][1], "E");

        let stats = reconcile(&mut body, &[]);
        assert_eq!(stats.removed_rows, 1);
        assert_eq!(body.row_count(), 0);
    }
}
