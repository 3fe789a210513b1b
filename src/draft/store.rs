use async_trait::async_trait;
use std::sync::Mutex;

use crate::shared::StoreError;

/// Trait for draft order storage. The order is a single list of user
/// ids, first picker first.
#[async_trait]
pub trait DraftOrderStore: Send + Sync {
    /// Current order, empty when none has been set.
    async fn get_order(&self) -> Result<Vec<String>, StoreError>;
    async fn replace_order(&self, order: Vec<String>) -> Result<(), StoreError>;
}

/// In-memory implementation of DraftOrderStore for development and testing.
pub struct InMemoryDraftOrderStore {
    order: Mutex<Vec<String>>,
}

impl Default for InMemoryDraftOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDraftOrderStore {
    pub fn new() -> Self {
        Self {
            order: Mutex::new(Vec::new()),
        }
    }

    fn lock_order(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        match self.order.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl DraftOrderStore for InMemoryDraftOrderStore {
    async fn get_order(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.lock_order().clone())
    }

    async fn replace_order(&self, order: Vec<String>) -> Result<(), StoreError> {
        *self.lock_order() = order;
        Ok(())
    }
}
