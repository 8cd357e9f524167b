use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use tracing::warn;

use crate::usecase::services::page_window::DEFAULT_PAGE_SIZE;

pub const WINDOW_TITLE: &str = "Roster View";
pub const PAGE_SIZE_ENV: &str = "ROSTER_VIEW_PAGE_SIZE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub page_size: usize,
    pub data_dir: PathBuf,
    pub webview_dir: PathBuf,
    pub window_title: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let data_dir = default_data_dir()?;
        let webview_dir = ensure_webview_data_dir(&data_dir)?;
        let page_size = parse_page_size(std::env::var(PAGE_SIZE_ENV).ok().as_deref());

        Ok(Self {
            page_size,
            data_dir,
            webview_dir,
            window_title: WINDOW_TITLE.to_string(),
        })
    }
}

/// Falls back to the default for missing, non-numeric or zero values.
pub fn parse_page_size(raw: Option<&str>) -> usize {
    let Some(raw) = raw else {
        return DEFAULT_PAGE_SIZE;
    };
    match raw.trim().parse::<usize>() {
        Ok(size) if size > 0 => size,
        _ => {
            warn!(value = raw, "invalid {PAGE_SIZE_ENV}, using {DEFAULT_PAGE_SIZE}");
            DEFAULT_PAGE_SIZE
        }
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "hellhbbd", "roster-view")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    Ok(project_dirs.data_local_dir().to_path_buf())
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn page_size_parsing_falls_back_to_default() {
        assert_eq!(parse_page_size(None), DEFAULT_PAGE_SIZE);
        assert_eq!(parse_page_size(Some("25")), 25);
        assert_eq!(parse_page_size(Some(" 100 ")), 100);
        assert_eq!(parse_page_size(Some("0")), DEFAULT_PAGE_SIZE);
        assert_eq!(parse_page_size(Some("many")), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn default_data_dir_uses_app_directory() {
        let data_dir = default_data_dir().expect("data dir should resolve");
        let path = data_dir.to_string_lossy().to_lowercase();
        assert!(path.contains("roster-view"), "unexpected data dir: {path}");
    }

    #[test]
    fn ensure_webview_data_dir_creates_webview2_subdir() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        let temp_dir = std::env::temp_dir().join(format!("roster-view-webview-{nanos}"));
        fs::create_dir_all(&temp_dir).expect("should create temp dir");

        let webview_dir =
            ensure_webview_data_dir(&temp_dir).expect("webview data dir should be created");

        assert_eq!(webview_dir, temp_dir.join("webview2"));
        assert!(webview_dir.is_dir(), "webview2 directory should exist");

        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }
}
