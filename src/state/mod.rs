// State management module
// Handles the state shared across request handlers

/// Shared application state
pub mod app_state;

pub use app_state::AppState;
