//! API server state

use std::path::PathBuf;
use std::sync::Arc;

use crate::storage::AirportStore;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Airport store shared by every request
    pub store: Arc<dyn AirportStore>,

    /// Directory holding `index.html` and the `/static` assets
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(store: Arc<dyn AirportStore>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            static_dir: static_dir.into(),
        }
    }
}
