use std::sync::Arc;
use tracing::{debug, instrument};

use super::store::DraftOrderStore;
use crate::shared::StoreError;

/// Result of a rotation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotationOutcome {
    /// First picker moved to the back; carries the new order.
    Rotated(Vec<String>),
    /// Fewer than two users; no write happened.
    Unchanged,
}

/// Keeps the draft order fair across games: whoever picked first last
/// time picks last next time.
pub struct DraftOrderService {
    store: Arc<dyn DraftOrderStore>,
}

impl DraftOrderService {
    pub fn new(store: Arc<dyn DraftOrderStore>) -> Self {
        Self { store }
    }

    /// Moves the first picker to the back of the order.
    #[instrument(skip(self))]
    pub async fn rotate(&self) -> Result<RotationOutcome, StoreError> {
        let mut order = self.store.get_order().await?;
        if order.len() < 2 {
            debug!(len = order.len(), "Draft order too short to rotate");
            return Ok(RotationOutcome::Unchanged);
        }

        order.rotate_left(1);
        self.store.replace_order(order.clone()).await?;
        debug!(new_first = %order[0], "Draft order rotated");
        Ok(RotationOutcome::Rotated(order))
    }

    #[instrument(skip(self, order))]
    pub async fn set_order(&self, order: Vec<String>) -> Result<(), StoreError> {
        debug!(users = order.len(), "Draft order replaced");
        self.store.replace_order(order).await
    }

    pub async fn current_order(&self) -> Result<Vec<String>, StoreError> {
        self.store.get_order().await
    }

    /// Drops a user from the order; false when they were not in it.
    #[instrument(skip(self))]
    pub async fn remove_user(&self, user_id: &str) -> Result<bool, StoreError> {
        let mut order = self.store.get_order().await?;
        let before = order.len();
        order.retain(|id| id != user_id);
        if order.len() == before {
            return Ok(false);
        }
        self.store.replace_order(order).await?;
        debug!(user_id = %user_id, "User removed from draft order");
        Ok(true)
    }

    /// Stored order filtered to known users. Departed users are hidden
    /// without rewriting the stored order.
    pub async fn display_order(&self, known_users: &[String]) -> Result<Vec<String>, StoreError> {
        let order = self.store.get_order().await?;
        Ok(order
            .into_iter()
            .filter(|id| known_users.contains(id))
            .collect())
    }
}
