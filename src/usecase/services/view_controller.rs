use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::domain::catalog::headers;
use crate::domain::date::ingame_date_text;
use crate::domain::entities::filter::{Category, CriterionId, Direction, QueryPayload};
use crate::domain::entities::player::PlayerRecord;
use crate::ui::reconciler::{reconcile, ReconcileStats, TableBody};
use crate::usecase::ports::backend::{BackendError, RosterBackend};
use crate::usecase::services::filter_model::FilterModel;
use crate::usecase::services::option_picker::{OptionCache, OptionPicker};
use crate::usecase::services::page_window::PageWindow;
use crate::usecase::services::sort_engine::{SortEngine, SortOutcome, SortState};

/// A player query that has been issued and not yet answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub payload: QueryPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { record_count: usize },
    /// A newer query was issued after this one; its response was dropped.
    Stale,
    Failed(BackendError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(FetchOutcome),
    Cancelled,
    Failed(BackendError),
}

/// Owns the record set and every piece of view state derived from it.
#[derive(Debug, Clone)]
pub struct ViewController {
    records: Vec<PlayerRecord>,
    filters: FilterModel,
    pickers: BTreeMap<CriterionId, OptionPicker>,
    options: OptionCache,
    sort: SortEngine,
    page: PageWindow,
    body: TableBody,
    next_seq: u64,
    in_flight: Option<u64>,
    view_active: bool,
    ingame_date: Option<(i64, i64)>,
}

impl ViewController {
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            filters: FilterModel::new(),
            pickers: BTreeMap::new(),
            options: OptionCache::new(),
            sort: SortEngine::new(),
            page: PageWindow::new(page_size),
            body: TableBody::new(),
            next_seq: 0,
            in_flight: None,
            view_active: false,
            ingame_date: None,
        }
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn body(&self) -> &TableBody {
        &self.body
    }

    pub fn page(&self) -> &PageWindow {
        &self.page
    }

    pub fn sort_state(&self) -> SortState {
        self.sort.state()
    }

    pub fn filters(&self) -> &FilterModel {
        &self.filters
    }

    /// Scalar filter edits; criteria go through the picker-aware methods.
    pub fn filters_mut(&mut self) -> &mut FilterModel {
        &mut self.filters
    }

    pub fn picker(&self, id: CriterionId) -> Option<&OptionPicker> {
        self.pickers.get(&id)
    }

    pub fn view_active(&self) -> bool {
        self.view_active
    }

    pub fn fetch_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn ingame_date_text(&self) -> Option<String> {
        self.ingame_date
            .map(|(earliest, latest)| ingame_date_text(earliest, latest))
    }

    /// Asks the backend for a save. Loading a save rebuilds the filter panel
    /// from scratch and immediately queries with the empty filter set. If that
    /// query fails the table is emptied, since the backend already serves the
    /// new save.
    pub fn load_save(&mut self, backend: &dyn RosterBackend) -> LoadOutcome {
        match backend.load_save() {
            Ok(true) => {}
            Ok(false) => {
                debug!("save loading cancelled");
                return LoadOutcome::Cancelled;
            }
            Err(err) => {
                warn!(error = %err, "save loading failed");
                return LoadOutcome::Failed(err);
            }
        }

        info!("save loaded");
        self.view_active = true;
        self.filters.clear();
        self.pickers.clear();
        self.options.clear();
        self.ingame_date = match backend.ingame_date_range() {
            Ok(range) => Some(range),
            Err(err) => {
                warn!(error = %err, "in-game date unavailable");
                None
            }
        };

        let outcome = self.apply_filters(backend);
        if matches!(outcome, FetchOutcome::Failed(_)) {
            // Rows of the previous save must not show under the new one.
            self.replace_records(Vec::new());
        }
        LoadOutcome::Loaded(outcome)
    }

    /// Issues a query for the current filters. Only the most recently issued
    /// ticket is accepted by [`Self::complete_fetch`].
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.in_flight = Some(seq);
        let payload = self.filters.compile();
        info!(seq, criteria = self.filters.criteria().len(), "player fetch issued");
        FetchTicket { seq, payload }
    }

    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<PlayerRecord>, BackendError>,
    ) -> FetchOutcome {
        if self.in_flight != Some(ticket.seq) {
            debug!(seq = ticket.seq, latest = ?self.in_flight, "stale player fetch discarded");
            return FetchOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(records) => {
                let record_count = records.len();
                self.replace_records(records);
                info!(seq = ticket.seq, record_count, "player fetch applied");
                FetchOutcome::Applied { record_count }
            }
            Err(err) => {
                warn!(seq = ticket.seq, error = %err, "player fetch failed");
                FetchOutcome::Failed(err)
            }
        }
    }

    pub fn apply_filters(&mut self, backend: &dyn RosterBackend) -> FetchOutcome {
        let ticket = self.begin_fetch();
        let result = backend.fetch_players(&ticket.payload);
        self.complete_fetch(&ticket, result)
    }

    fn replace_records(&mut self, records: Vec<PlayerRecord>) {
        self.records = records;
        self.sort.reset();
        self.page.reset(self.records.len());
        self.render();
    }

    /// Adds a criterion chosen from the "Add..." menu. No category, or a
    /// category without any selectable value, adds nothing.
    pub fn add_criterion(
        &mut self,
        backend: &dyn RosterBackend,
        direction: Direction,
        category: Option<Category>,
    ) -> Result<Option<CriterionId>, BackendError> {
        let Some(category) = category else {
            return Ok(None);
        };

        let options = self.options.get_or_fetch(backend, category)?.to_vec();
        let picker = OptionPicker::new(category, options);
        let Some(selected) = picker.selected() else {
            debug!(category = category.label(), "no options to pick from");
            return Ok(None);
        };

        debug!(
            ?direction,
            category = picker.category().label(),
            selected = picker.selected_label().unwrap_or_default(),
            "criterion added"
        );
        let id = self.filters.add_criterion(direction, category, selected);
        self.pickers.insert(id, picker);
        Ok(Some(id))
    }

    pub fn remove_criterion(&mut self, id: CriterionId) -> bool {
        self.pickers.remove(&id);
        self.filters.remove_criterion(id)
    }

    /// Narrows a criterion's picker and keeps the criterion on the first match.
    pub fn search_picker(&mut self, id: CriterionId, query: &str) -> Option<i32> {
        let selected = self.pickers.get_mut(&id)?.set_query(query)?;
        self.filters.set_selection(id, selected);
        Some(selected)
    }

    pub fn select_option(&mut self, id: CriterionId, option_id: i32) -> bool {
        let Some(picker) = self.pickers.get_mut(&id) else {
            return false;
        };
        if !picker.select(option_id) {
            return false;
        }
        self.filters.set_selection(id, option_id)
    }

    /// Re-sorts the whole record set; the current page is kept.
    pub fn sort_by(&mut self, column: usize) -> SortOutcome {
        let outcome = self.sort.sort_by(&mut self.records, column);
        self.page.resize(self.records.len());
        self.render();
        outcome
    }

    pub fn next_page(&mut self) -> bool {
        let moved = self.page.next();
        if moved {
            debug!(page = self.page.index(), "next page");
            self.render();
        }
        moved
    }

    pub fn prev_page(&mut self) -> bool {
        let moved = self.page.prev();
        if moved {
            debug!(page = self.page.index(), "previous page");
            self.render();
        }
        moved
    }

    pub fn render(&mut self) -> ReconcileStats {
        let slice = self.page.slice(&self.records);
        let stats = reconcile(&mut self.body, slice);
        debug!(
            reused = stats.reused_rows,
            created = stats.created_rows,
            removed = stats.removed_rows,
            changed = stats.changed_cells,
            "table rendered"
        );
        stats
    }

    /// Raw values of every record in current order, with catalog headers.
    pub fn csv_rows(&self) -> (Vec<String>, Vec<Vec<String>>) {
        let rows = self
            .records
            .iter()
            .map(|record| record.columns.iter().map(ToString::to_string).collect())
            .collect();
        (headers(), rows)
    }

    pub fn export_csv(&self, backend: &dyn RosterBackend) -> Result<(), BackendError> {
        let (headers, rows) = self.csv_rows();
        info!(rows = rows.len(), "csv export requested");
        backend.export_to_csv(headers, rows)
    }
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new(crate::usecase::services::page_window::DEFAULT_PAGE_SIZE)
    }
}
