use crate::domain::entities::filter::{Category, LookupOption, QueryPayload};
use crate::domain::entities::player::PlayerRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    NoSaveLoaded,
    Message(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::NoSaveLoaded => write!(f, "no save file is loaded"),
            BackendError::Message(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<anyhow::Error> for BackendError {
    fn from(err: anyhow::Error) -> Self {
        BackendError::Message(format!("{err:#}"))
    }
}

/// Request/response boundary to the process that owns the save data.
pub trait RosterBackend: Send + Sync {
    /// Loads a save chosen by the user. `Ok(false)` means nothing changed.
    fn load_save(&self) -> Result<bool, BackendError>;

    /// Complete filtered result set, in backend order.
    fn fetch_players(&self, payload: &QueryPayload) -> Result<Vec<PlayerRecord>, BackendError>;

    fn lookup(&self, category: Category) -> Result<Vec<LookupOption>, BackendError>;

    /// Earliest and latest possible in-game date as serial day counts.
    fn ingame_date_range(&self) -> Result<(i64, i64), BackendError>;

    fn export_to_csv(&self, headers: Vec<String>, rows: Vec<Vec<String>>)
        -> Result<(), BackendError>;
}
