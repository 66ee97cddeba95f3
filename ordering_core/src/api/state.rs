//! API server state.

use std::sync::Arc;

use record_store_interface::{InMemoryStore, RecordStore};

use crate::types::{Dish, Order};

/// Shared state for the API server.
#[derive(Clone)]
pub struct ApiState {
    /// Store for menu dishes.
    pub dishes: Arc<dyn RecordStore<Dish>>,
    /// Store for customer orders.
    pub orders: Arc<dyn RecordStore<Order>>,
}

impl ApiState {
    /// Create new API state over the given stores.
    pub fn new(dishes: Arc<dyn RecordStore<Dish>>, orders: Arc<dyn RecordStore<Order>>) -> Self {
        Self { dishes, orders }
    }

    /// Create API state backed by fresh in-memory stores. Each call
    /// yields independent collections, so tests never share records.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryStore::<Dish>::new()),
            Arc::new(InMemoryStore::<Order>::new()),
        )
    }
}
