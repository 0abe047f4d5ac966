// Application state shared with every request handler
// Holds the blog store; there is no other in-process mutable state

use crate::blogs::BlogDb;
use std::sync::Arc;

/// Main application state
/// Cheap to clone; all clones share the same store
#[derive(Clone)]
pub struct AppState {
    /// Blog record store
    pub db: Arc<BlogDb>,
}

impl AppState {
    /// Create application state around an opened store
    pub fn new(db: BlogDb) -> Self {
        Self { db: Arc::new(db) }
    }
}
