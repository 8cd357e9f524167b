mod app;
mod config;
mod domain;
mod infra;
mod platform;
mod ui;
mod usecase;


use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roster_view=info")),
        )
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            error!("failed to resolve application directories: {err:#}");
            std::process::exit(1);
        }
    };

    info!(
        data_dir = %config.data_dir.display(),
        page_size = config.page_size,
        "starting roster view"
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new().with_title(config.window_title.clone()),
                )
                .with_data_directory(config.webview_dir.clone()),
        )
        .with_context(config)
        .launch(app::App);
}
