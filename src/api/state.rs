//! Application state for the Invoice Generation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::store::RecordStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// engine configuration and the record store.
#[derive(Clone)]
pub struct AppState {
    /// The engine configuration.
    config: Arc<EngineConfig>,
    /// The shared record store.
    store: Arc<RecordStore>,
}

impl AppState {
    /// Creates a new application state with the given configuration and
    /// record store.
    pub fn new(config: EngineConfig, store: RecordStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
        }
    }

    /// Returns a reference to the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns a reference to the record store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }
}
