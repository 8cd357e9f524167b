use std::sync::Arc;

use dioxus::prelude::*;

use crate::config::AppConfig;
use crate::domain::catalog::{column_kind, ColumnKind, COLUMNS};
use crate::domain::entities::filter::{
    Category, CriterionId, Direction, LookupOption, TriState, BIRTH_YEAR_MAX, BIRTH_YEAR_MIN,
};
use crate::infra::sqlite::repo::SqliteRosterBackend;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::state::app_state::AppState;
use crate::usecase::ports::backend::RosterBackend;
use crate::usecase::services::page_window::DEFAULT_PAGE_SIZE;
use crate::usecase::services::sort_engine::SortState;
use crate::usecase::services::view_controller::{FetchOutcome, LoadOutcome, ViewController};

pub const NONE_OPTION_VALUE: &str = "__none__";

pub fn fetch_status(outcome: &FetchOutcome) -> Option<String> {
    match outcome {
        FetchOutcome::Applied { record_count: 1 } => Some("1 player".to_string()),
        FetchOutcome::Applied { record_count } => Some(format!("{record_count} players")),
        FetchOutcome::Stale => None,
        FetchOutcome::Failed(err) => Some(format!("Fetching players failed: {err}")),
    }
}

pub fn load_status(outcome: &LoadOutcome) -> Option<String> {
    match outcome {
        LoadOutcome::Loaded(fetch) => fetch_status(fetch),
        LoadOutcome::Cancelled => None,
        LoadOutcome::Failed(err) => Some(format!("Loading save failed: {err}")),
    }
}

pub fn parse_birth_year(raw: &str) -> Option<i32> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|year| (BIRTH_YEAR_MIN..=BIRTH_YEAR_MAX).contains(year))
}

/// Category picked in an "Add..." menu; the placeholder entry picks nothing.
pub fn add_menu_category(value: &str) -> Option<Category> {
    if value == NONE_OPTION_VALUE {
        return None;
    }
    Category::from_key(value)
}

/// Text for the birth year inputs, taken from the controller's filter model.
pub fn birth_year_inputs(view: &ViewController) -> (String, String) {
    let (min, max) = view.filters().scalars().birth_year_range;
    (min.to_string(), max.to_string())
}

pub fn header_label(label: &str, column: usize, sort: SortState) -> String {
    match sort.last_applied_column {
        Some(sorted) if sorted == column => format!("{label} {}", sort.direction.arrow()),
        _ => label.to_string(),
    }
}

fn cell_alignment(column: usize) -> &'static str {
    match column_kind(column) {
        ColumnKind::Numeric | ColumnKind::RatingPercentage | ColumnKind::Date => "right",
        _ => "left",
    }
}

fn table_container_style() -> &'static str {
    "overflow: auto; max-height: calc(100vh - 160px); border: 1px solid #bbb; border-radius: 6px;"
}

fn table_header_cell_style() -> &'static str {
    "position: sticky; top: 0; background: #f3f3f3; border: 1px solid #bbb; padding: 4px 8px; cursor: pointer; white-space: nowrap; user-select: none;"
}

#[derive(Clone, Debug, PartialEq)]
pub struct CriterionRow {
    pub id: CriterionId,
    pub category: &'static str,
    pub query: String,
    pub options: Vec<LookupOption>,
    pub selected: Option<i32>,
}

pub fn criterion_rows(view: &ViewController, direction: Direction) -> Vec<CriterionRow> {
    view.filters()
        .criteria_for(direction)
        .map(|criterion| {
            let picker = view.picker(criterion.id);
            CriterionRow {
                id: criterion.id,
                category: criterion.category.label(),
                query: picker.map(|p| p.query().to_string()).unwrap_or_default(),
                options: picker
                    .map(|p| p.visible_options().cloned().collect())
                    .unwrap_or_default(),
                selected: Some(criterion.selected_id),
            }
        })
        .collect()
}

/// Loads a save and resyncs the birth year inputs with the reset filter model.
fn load_save_into(
    mut controller: Signal<ViewController>,
    mut status: Signal<String>,
    mut birth_year_min: Signal<String>,
    mut birth_year_max: Signal<String>,
    backend: &dyn RosterBackend,
) {
    let outcome = controller.write().load_save(backend);
    if matches!(outcome, LoadOutcome::Loaded(_)) {
        let (min, max) = birth_year_inputs(&controller.read());
        birth_year_min.set(min);
        birth_year_max.set(max);
    }
    if let Some(text) = load_status(&outcome) {
        status.set(text);
    }
}

/// Issues a player query and applies the answer unless a newer one was issued.
fn spawn_fetch(
    mut controller: Signal<ViewController>,
    mut status: Signal<String>,
    backend: Arc<dyn RosterBackend>,
) {
    let ticket = controller.write().begin_fetch();
    spawn(async move {
        let result = run_blocking(|| backend.fetch_players(&ticket.payload));
        let outcome = controller.write().complete_fetch(&ticket, result);
        if let Some(text) = fetch_status(&outcome) {
            status.set(text);
        }
    });
}

#[component]
pub fn App() -> Element {
    let page_size = try_use_context::<AppConfig>()
        .map(|config| config.page_size)
        .unwrap_or(DEFAULT_PAGE_SIZE);
    let AppState {
        controller,
        status,
        show_filters,
        birth_year_min,
        birth_year_max,
    } = AppState::new(page_size);
    use_context_provider(|| Arc::new(SqliteRosterBackend::new()) as Arc<dyn RosterBackend>);

    let view_active = controller.read().view_active();

    rsx! {
        main {
            style: "font-family: sans-serif; padding: 8px;",
            if view_active {
                Toolbar { controller, status, show_filters, birth_year_min, birth_year_max }
                if show_filters() {
                    FilterPanel { controller, status, birth_year_min, birth_year_max }
                }
                PlayerTable { controller }
            } else {
                StartPage { controller, status, birth_year_min, birth_year_max }
            }
            if !status().is_empty() {
                p { style: "color: #555;", "{status}" }
            }
        }
    }
}

#[component]
fn StartPage(
    controller: Signal<ViewController>,
    status: Signal<String>,
    birth_year_min: Signal<String>,
    birth_year_max: Signal<String>,
) -> Element {
    let backend = use_context::<Arc<dyn RosterBackend>>();

    rsx! {
        div {
            style: "display: flex; justify-content: center; padding-top: 30vh;",
            button {
                style: "padding: 8px 24px; font-size: 1.1em;",
                onclick: move |_| {
                    load_save_into(
                        controller,
                        status,
                        birth_year_min,
                        birth_year_max,
                        backend.as_ref(),
                    );
                },
                "Load Save"
            }
        }
    }
}

#[component]
fn Toolbar(
    mut controller: Signal<ViewController>,
    mut status: Signal<String>,
    mut show_filters: Signal<bool>,
    birth_year_min: Signal<String>,
    birth_year_max: Signal<String>,
) -> Element {
    let backend = use_context::<Arc<dyn RosterBackend>>();
    let backend_for_export = backend.clone();
    let (ingame_date, page_label, has_prev, has_next) = {
        let view = controller.read();
        (
            view.ingame_date_text().unwrap_or_default(),
            view.page().label(),
            view.page().has_prev(),
            view.page().has_next(),
        )
    };

    rsx! {
        nav {
            style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 0;",
            button {
                onclick: move |_| {
                    load_save_into(
                        controller,
                        status,
                        birth_year_min,
                        birth_year_max,
                        backend.as_ref(),
                    );
                },
                "Load Save"
            }
            button {
                onclick: move |_| {
                    let result = controller.read().export_csv(backend_for_export.as_ref());
                    if let Err(err) = result {
                        status.set(format!("Export failed: {err}"));
                    }
                },
                "Export to CSV"
            }
            span { "{ingame_date}" }
            button {
                onclick: move |_| {
                    let open = show_filters();
                    show_filters.set(!open);
                },
                "Filters"
            }
            button {
                disabled: !has_prev,
                onclick: move |_| {
                    controller.write().prev_page();
                },
                "Previous Page"
            }
            span { "{page_label}" }
            button {
                disabled: !has_next,
                onclick: move |_| {
                    controller.write().next_page();
                },
                "Next Page"
            }
        }
    }
}

#[component]
fn FilterPanel(
    mut controller: Signal<ViewController>,
    mut status: Signal<String>,
    mut birth_year_min: Signal<String>,
    mut birth_year_max: Signal<String>,
) -> Element {
    let backend = use_context::<Arc<dyn RosterBackend>>();
    let (scalars, in_flight) = {
        let view = controller.read();
        (*view.filters().scalars(), view.fetch_in_flight())
    };

    rsx! {
        div {
            style: "border: 1px solid #bbb; border-radius: 8px; padding: 8px 12px; margin-bottom: 8px; background: #fafafa;",
            div {
                style: "display: flex; gap: 24px; flex-wrap: wrap;",
                CriterionList { controller, status, direction: Direction::Include }
                CriterionList { controller, status, direction: Direction::Exclude }
            }
            div {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 0;",
                span { "Born between" }
                input {
                    r#type: "number",
                    style: "width: 80px;",
                    value: "{birth_year_min}",
                    oninput: move |event| birth_year_min.set(event.value()),
                }
                span { "and" }
                input {
                    r#type: "number",
                    style: "width: 80px;",
                    value: "{birth_year_max}",
                    oninput: move |event| birth_year_max.set(event.value()),
                }
                TriStateSelect {
                    label: "Can play for country",
                    value: scalars.can_play_for_country,
                    on_change: move |value: TriState| {
                        controller.write().filters_mut().set_can_play_for_country(value);
                    },
                }
                TriStateSelect {
                    label: "Second nationality",
                    value: scalars.has_second_nationality,
                    on_change: move |value: TriState| {
                        controller.write().filters_mut().set_has_second_nationality(value);
                    },
                }
                TriStateSelect {
                    label: "Declared for nation",
                    value: scalars.has_declared_for_nation,
                    on_change: move |value: TriState| {
                        controller.write().filters_mut().set_has_declared_for_nation(value);
                    },
                }
                button {
                    disabled: in_flight,
                    onclick: move |_| {
                        let years = (
                            parse_birth_year(&birth_year_min()),
                            parse_birth_year(&birth_year_max()),
                        );
                        let (Some(min), Some(max)) = years else {
                            status.set(format!(
                                "Birth years must be between {BIRTH_YEAR_MIN} and {BIRTH_YEAR_MAX}"
                            ));
                            return;
                        };
                        controller.write().filters_mut().set_birth_year_range(min, max);
                        spawn_fetch(controller, status, backend.clone());
                    },
                    "Apply Filters"
                }
            }
        }
    }
}

#[component]
fn TriStateSelect(label: &'static str, value: TriState, on_change: EventHandler<TriState>) -> Element {
    rsx! {
        label {
            style: "display: inline-flex; gap: 6px; align-items: center;",
            "{label}"
            select {
                value: "{value.key()}",
                onchange: move |event| on_change.call(TriState::from_key(&event.value())),
                option { value: "any", "Any" }
                option { value: "yes", "Yes" }
                option { value: "no", "No" }
            }
        }
    }
}

#[component]
fn CriterionList(
    mut controller: Signal<ViewController>,
    mut status: Signal<String>,
    direction: Direction,
) -> Element {
    let backend = use_context::<Arc<dyn RosterBackend>>();
    let rows = criterion_rows(&controller.read(), direction);
    // Bumped after every pick so the menu is rebuilt showing "Add..." again.
    let mut add_menu_generation = use_signal(|| 0_u64);

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 6px; min-width: 360px;",
            strong { "{direction.label()}" }
            for row in rows {
                CriterionEditor { key: "{row.id.0}", controller, row }
            }
            for generation in std::iter::once(add_menu_generation()) {
                select {
                    key: "{generation}",
                    onchange: {
                        let backend = backend.clone();
                        move |event: Event<FormData>| {
                            let category = add_menu_category(&event.value());
                            let result = run_blocking(|| {
                                controller
                                    .write()
                                    .add_criterion(backend.as_ref(), direction, category)
                            });
                            if let Err(err) = result {
                                status.set(format!("Loading options failed: {err}"));
                            }
                            add_menu_generation += 1;
                        }
                    },
                    option { value: NONE_OPTION_VALUE, selected: true, "Add..." }
                    for category in Category::ALL {
                        option { value: "{category.key()}", "{category.label()}" }
                    }
                }
            }
        }
    }
}

#[component]
fn CriterionEditor(mut controller: Signal<ViewController>, row: CriterionRow) -> Element {
    let id = row.id;
    let selected = row.selected.map(|value| value.to_string()).unwrap_or_default();

    rsx! {
        div {
            style: "display: flex; gap: 6px; align-items: center;",
            span { style: "min-width: 170px;", "{row.category}" }
            input {
                placeholder: "Search",
                style: "width: 110px;",
                value: "{row.query}",
                oninput: move |event| {
                    controller.write().search_picker(id, &event.value());
                },
            }
            select {
                value: "{selected}",
                onchange: move |event| {
                    if let Ok(option_id) = event.value().parse::<i32>() {
                        controller.write().select_option(id, option_id);
                    }
                },
                for choice in row.options.iter() {
                    option { value: "{choice.id}", "{choice.label}" }
                }
            }
            button {
                onclick: move |_| {
                    controller.write().remove_criterion(id);
                },
                "Remove"
            }
        }
    }
}

#[component]
fn PlayerTable(mut controller: Signal<ViewController>) -> Element {
    let (rows, sort_state) = {
        let view = controller.read();
        (view.body().rows().to_vec(), view.sort_state())
    };

    rsx! {
        div {
            style: "{table_container_style()}",
            table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                thead {
                    tr {
                        for (idx, spec) in COLUMNS.iter().enumerate() {
                            th {
                                key: "{idx}",
                                style: "{table_header_cell_style()}",
                                onclick: move |_| {
                                    controller.write().sort_by(idx);
                                },
                                "{header_label(spec.label, idx, sort_state)}"
                            }
                        }
                    }
                }
                tbody {
                    for (row_idx, row) in rows.into_iter().enumerate() {
                        tr { key: "{row_idx}",
                            for (col_idx, text) in row.into_iter().enumerate() {
                                td {
                                    key: "{col_idx}",
                                    style: "border: 1px solid #bbb; padding: 4px; white-space: nowrap; text-align: {cell_alignment(col_idx)};",
                                    "{text}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
