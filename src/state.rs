//! Shared application state for all routes.

use crate::store::EtudiantStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EtudiantStore>,
}

impl AppState {
    pub fn new(store: impl EtudiantStore + 'static) -> Self {
        AppState { store: Arc::new(store) }
    }
}
