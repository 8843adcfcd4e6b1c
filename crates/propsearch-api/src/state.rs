//! Application state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use propsearch_core::SearchEngine;

/// Application state shared across handlers.
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    start_time: Instant,
}

impl AppState {
    pub fn new(engine: Arc<SearchEngine>) -> Self {
        Self {
            engine,
            start_time: Instant::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}
