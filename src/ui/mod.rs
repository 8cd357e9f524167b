pub mod reconciler;
pub mod state;
