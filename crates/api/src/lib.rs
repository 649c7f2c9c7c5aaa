pub mod error;
pub mod handlers;
pub mod inventory_service;
pub mod logging;
pub mod routes;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use inventory_service::{CloseOutcome, InventoryService};

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub inventory_service: Arc<InventoryService>,
}

impl AppState {
    pub fn new(inventory_service: Arc<InventoryService>) -> Self {
        Self { inventory_service }
    }
}
