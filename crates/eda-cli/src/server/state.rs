//! Application state for the web server.

use std::sync::Arc;

use eda::{Profiler, ProfilerConfig};

/// Name reported by `GET /health`.
pub const SERVICE_NAME: &str = "dataset-quality";

/// Shared application state. Immutable once the server starts.
#[derive(Clone)]
pub struct AppState {
    /// Profiler used for uploaded files.
    pub profiler: Arc<Profiler>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ProfilerConfig) -> Self {
        Self {
            profiler: Arc::new(Profiler::with_config(config)),
        }
    }

    pub fn config(&self) -> &ProfilerConfig {
        self.profiler.config()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ProfilerConfig::default())
    }
}
