// src/state.rs
use std::sync::Arc;

use crate::store::ProductStore;

/// Shared by every handler. The store is chosen once at startup and never swapped.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }
}
