//! Shared application state.

use std::sync::Arc;

use crate::storage::StorageBackend;

/// Shared application state passed to all handlers.
///
/// Holds the storage backend selected at startup behind the
/// [`StorageBackend`] trait; handlers never learn which engine is running.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn StorageBackend>,
}

impl AppState {
    /// Create a new application state around a connected backend.
    #[must_use]
    pub fn new(store: Arc<dyn StorageBackend>) -> Self {
        Self { store }
    }

    /// Returns a reference to the storage backend.
    #[must_use]
    pub fn store(&self) -> &dyn StorageBackend {
        self.store.as_ref()
    }
}
