use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::filter::{BIRTH_YEAR_MAX, BIRTH_YEAR_MIN};
use crate::usecase::services::view_controller::ViewController;

pub struct AppState {
    pub controller: Signal<ViewController>,
    pub status: Signal<String>,
    pub show_filters: Signal<bool>,
    pub birth_year_min: Signal<String>,
    pub birth_year_max: Signal<String>,
}

impl AppState {
    pub fn new(page_size: usize) -> Self {
        Self {
            controller: use_signal(|| ViewController::new(page_size)),
            status: use_signal(String::new),
            show_filters: use_signal(|| false),
            birth_year_min: use_signal(|| BIRTH_YEAR_MIN.to_string()),
            birth_year_max: use_signal(|| BIRTH_YEAR_MAX.to_string()),
        }
    }
}
