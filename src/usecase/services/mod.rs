pub mod filter_model;
pub mod option_picker;
pub mod page_window;
pub mod sort_engine;
pub mod view_controller;
