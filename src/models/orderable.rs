//! Shared shape of every list the admin dashboard can reorder.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Server-assigned entity identifier.
pub type EntityId = i64;

/// An entity held in a client-side ordered list.
///
/// `display_order` is 1-based and dense across a settled collection. The
/// domain fields of implementors are opaque to the list store.
pub trait Orderable: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Payload accepted by the create and update endpoints.
    type Draft: Serialize + Send + Sync;

    /// Path segment of the REST resource, e.g. `courses`.
    const RESOURCE: &'static str;

    fn id(&self) -> EntityId;
    fn display_order(&self) -> i32;
    fn set_display_order(&mut self, order: i32);
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
}

/// Single element of a reorder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEntry {
    pub id: EntityId,
    pub display_order: i32,
}

/// Request body for the reorder endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub items: Vec<OrderEntry>,
}

/// Body returned by the toggle-status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub is_active: bool,
}

/// Renumber `display_order` to `position + 1` for every item.
pub fn renumber<T: Orderable>(items: &mut [T]) {
    for (position, item) in items.iter_mut().enumerate() {
        item.set_display_order(position as i32 + 1);
    }
}

/// Whether `display_order` values are exactly `1..=len` in sequence.
pub fn is_densely_ordered<T: Orderable>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(position, item)| item.display_order() == position as i32 + 1)
}

/// Order entries for the current sequence, as sent to the reorder endpoint.
pub fn order_entries<T: Orderable>(items: &[T]) -> Vec<OrderEntry> {
    items
        .iter()
        .map(|item| OrderEntry {
            id: item.id(),
            display_order: item.display_order(),
        })
        .collect()
}
