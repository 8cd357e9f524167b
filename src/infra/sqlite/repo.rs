use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rfd::FileDialog;
use tracing::info;

use crate::domain::entities::filter::{Category, LookupOption, QueryPayload};
use crate::domain::entities::player::PlayerRecord;
use crate::infra::export::csv::write_csv;
use crate::infra::sqlite::queries::{fetch_players, ingame_date_range, lookup_options};
use crate::infra::sqlite::schema::validate_save;
use crate::usecase::ports::backend::{BackendError, RosterBackend};

/// Roster backend reading a SQLite save picked by the user.
#[derive(Debug, Default)]
pub struct SqliteRosterBackend {
    save_path: Mutex<Option<PathBuf>>,
}

impl SqliteRosterBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and activates a save; the previous save stays active on error.
    pub fn open_save(&self, path: &Path) -> Result<(), BackendError> {
        validate_save(path)?;
        let mut guard = self
            .save_path
            .lock()
            .map_err(|_| BackendError::Message("save state lock poisoned".to_string()))?;
        *guard = Some(path.to_path_buf());
        info!(path = %path.display(), "save opened");
        Ok(())
    }

    pub fn save_path(&self) -> Result<PathBuf, BackendError> {
        self.save_path
            .lock()
            .map_err(|_| BackendError::Message("save state lock poisoned".to_string()))?
            .clone()
            .ok_or(BackendError::NoSaveLoaded)
    }
}

impl RosterBackend for SqliteRosterBackend {
    fn load_save(&self) -> Result<bool, BackendError> {
        let Some(path) = FileDialog::new()
            .add_filter("Roster Saves", &["sqlite", "db"])
            .pick_file()
        else {
            return Ok(false);
        };

        self.open_save(&path)?;
        Ok(true)
    }

    fn fetch_players(&self, payload: &QueryPayload) -> Result<Vec<PlayerRecord>, BackendError> {
        let path = self.save_path()?;
        Ok(fetch_players(&path, payload)?)
    }

    fn lookup(&self, category: Category) -> Result<Vec<LookupOption>, BackendError> {
        let path = self.save_path()?;
        Ok(lookup_options(&path, category)?)
    }

    fn ingame_date_range(&self) -> Result<(i64, i64), BackendError> {
        let path = self.save_path()?;
        Ok(ingame_date_range(&path)?)
    }

    fn export_to_csv(
        &self,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<(), BackendError> {
        let Some(path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name("players.csv")
            .save_file()
        else {
            return Ok(());
        };

        let written = write_csv(&path, &headers, &rows)?;
        info!(path = %path.display(), rows = written, "players exported");
        Ok(())
    }
}
