//! Client-side list state with optimistic reordering and status toggles.
//!
//! A [`ListStore`] holds the locally rendered copy of one remote collection.
//! Reorders are applied locally as the user drags and only sent on
//! [`ListStore::commit_order`]; status toggles are applied immediately and
//! reconciled against the server's answer. Failures never escape as panics:
//! they revert local state, log a warning and queue a [`Notice`].

mod policy;

pub use policy::*;

use std::collections::HashSet;

use parking_lot::Mutex;

use crate::api::{ListFilters, Pagination, ResourceClient};
use crate::errors::{AppError, Notice};
use crate::models::{order_entries, renumber, EntityId, Orderable};

struct StoreState<T> {
    items: Vec<T>,
    pagination: Option<Pagination>,
    order: MutationState<Vec<T>>,
    /// Bumped on every local move so a commit can tell if it is stale.
    order_epoch: u64,
    toggling: HashSet<EntityId>,
    notices: Vec<Notice>,
}

impl<T> Default for StoreState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
            order: MutationState::Idle,
            order_epoch: 0,
            toggling: HashSet::new(),
            notices: Vec::new(),
        }
    }
}

/// Ordered, locally mutable view of a remote collection.
///
/// Owned by the single page or console command that created it. Methods take
/// `&self` so overlapping calls on one task (e.g. two toggles raced with
/// `tokio::join!`) see each other's in-flight markers.
pub struct ListStore<T: Orderable, C> {
    client: C,
    filters: ListFilters,
    policy: ReconciliationPolicy,
    state: Mutex<StoreState<T>>,
}

impl<T, C> ListStore<T, C>
where
    T: Orderable,
    C: ResourceClient<T>,
{
    pub fn new(client: C) -> Self {
        Self::with_policy(client, ReconciliationPolicy::default())
    }

    pub fn with_policy(client: C, policy: ReconciliationPolicy) -> Self {
        Self {
            client,
            filters: ListFilters::default(),
            policy,
            state: Mutex::new(StoreState::default()),
        }
    }

    pub fn with_filters(mut self, filters: ListFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn policy(&self) -> ReconciliationPolicy {
        self.policy
    }

    /// Replace local state with the server's collection.
    ///
    /// On failure the previous local state is kept untouched and a notice is
    /// queued.
    pub async fn load(&self) -> Result<(), AppError> {
        self.refresh().await.inspect_err(|err| self.notify(err))
    }

    /// [`load`](Self::load) without the notice, for reloads that belong to a
    /// mutation which reports its own failure.
    async fn refresh(&self) -> Result<(), AppError> {
        match self.client.list(&self.filters).await {
            Ok(page) => {
                let mut items = page.items;
                items.sort_by_key(|item| item.display_order());

                let mut state = self.state.lock();
                tracing::debug!(resource = T::RESOURCE, count = items.len(), "Loaded list");
                state.items = items;
                state.pagination = page.pagination;
                state.order = MutationState::Idle;
                state.order_epoch += 1;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    resource = T::RESOURCE,
                    code = err.error_code(),
                    "Failed to load list: {}",
                    err
                );
                Err(err)
            }
        }
    }

    /// Move the entity at `from` to `to` and renumber the whole list.
    ///
    /// Local only; sets the pending flag until [`commit_order`](Self::commit_order).
    /// Refused when the store holds only part of the collection, since the
    /// renumbered subset would collide with the entities left out.
    pub fn move_entity(&self, from: usize, to: usize) -> Result<(), AppError> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        self.ensure_full_collection(state.pagination.as_ref())?;
        let len = state.items.len();

        if from >= len {
            return Err(AppError::OutOfRange { index: from, len });
        }
        if to >= len {
            return Err(AppError::OutOfRange { index: to, len });
        }
        if from == to {
            return Ok(());
        }

        if !state.order.is_pending() {
            state.order = MutationState::Pending(state.items.clone());
        }

        let item = state.items.remove(from);
        state.items.insert(to, item);
        renumber(&mut state.items);
        state.order_epoch += 1;
        Ok(())
    }

    fn ensure_full_collection(&self, pagination: Option<&Pagination>) -> Result<(), AppError> {
        let partial_page = pagination.is_some_and(|page| page.total_pages > 1);
        if self.filters.narrows() || partial_page {
            return Err(AppError::Validation(format!(
                "Clear the filters and show every {} entry before reordering",
                T::RESOURCE
            )));
        }
        Ok(())
    }

    /// Persist the current local order.
    pub async fn commit_order(&self) -> CommitOutcome {
        let (entries, committed, epoch) = {
            let state = self.state.lock();
            if !state.order.is_pending() {
                return CommitOutcome::NothingPending;
            }
            (
                order_entries(&state.items),
                state.items.clone(),
                state.order_epoch,
            )
        };

        match self.client.reorder(&entries).await {
            Ok(()) => {
                let mut state = self.state.lock();
                if state.order_epoch == epoch {
                    state.order = MutationState::Committed;
                } else {
                    // Moved again while in flight: the committed order is the new baseline.
                    state.order = MutationState::Pending(committed);
                }
                tracing::info!(resource = T::RESOURCE, count = entries.len(), "Order committed");
                CommitOutcome::Committed
            }
            Err(err) => {
                tracing::warn!(
                    resource = T::RESOURCE,
                    code = err.error_code(),
                    "Order commit failed, rolling back: {}",
                    err
                );
                self.notify(&err);

                let snapshot = self.state.lock().order.settle(MutationState::RolledBack);
                let restore = match self.policy.rollback {
                    RollbackStrategy::Refetch => match self.refresh().await {
                        Ok(()) => None,
                        Err(_) => snapshot,
                    },
                    RollbackStrategy::Snapshot => snapshot,
                };

                let mut state = self.state.lock();
                if let Some(previous) = restore {
                    state.items = previous;
                }
                state.order = MutationState::RolledBack;
                CommitOutcome::RolledBack(err)
            }
        }
    }

    /// Flip `is_active` for `id` and reconcile with the server.
    ///
    /// A second toggle for an id that is already in flight is ignored.
    pub async fn toggle_status(&self, id: EntityId) -> ToggleOutcome {
        let previous = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            if state.toggling.contains(&id) {
                tracing::debug!(resource = T::RESOURCE, id, "Toggle already in flight");
                return ToggleOutcome::Ignored;
            }
            let Some(item) = state.items.iter_mut().find(|item| item.id() == id) else {
                return ToggleOutcome::Missing;
            };
            let previous = item.is_active();
            if self.policy.toggle == ApplyMode::Optimistic {
                item.set_active(!previous);
            }
            state.toggling.insert(id);
            previous
        };

        let result = self.client.toggle_status(id).await;

        let mut guard = self.state.lock();
        let state = &mut *guard;
        state.toggling.remove(&id);
        let item = state.items.iter_mut().find(|item| item.id() == id);

        match result {
            Ok(update) => {
                if let Some(item) = item {
                    item.set_active(update.is_active);
                }
                tracing::info!(
                    resource = T::RESOURCE,
                    id,
                    is_active = update.is_active,
                    "Status updated"
                );
                ToggleOutcome::Applied(update.is_active)
            }
            Err(err) => {
                if let Some(item) = item {
                    item.set_active(previous);
                }
                tracing::warn!(
                    resource = T::RESOURCE,
                    id,
                    code = err.error_code(),
                    "Status toggle failed, reverted: {}",
                    err
                );
                state.notices.push(Notice::from_error(&err));
                ToggleOutcome::Reverted(err)
            }
        }
    }

    /// Create an entity once the server confirms it.
    pub async fn create(&self, draft: &T::Draft) -> Result<T, AppError> {
        match self.client.create(draft).await {
            Ok(created) => {
                let mut state = self.state.lock();
                state.items.push(created.clone());
                state.items.sort_by_key(|item| item.display_order());
                Ok(created)
            }
            Err(err) => Err(self.fail("create", err)),
        }
    }

    /// Update an entity once the server confirms it.
    pub async fn update(&self, id: EntityId, draft: &T::Draft) -> Result<T, AppError> {
        match self.client.update(id, draft).await {
            Ok(updated) => {
                let mut state = self.state.lock();
                if let Some(existing) = state.items.iter_mut().find(|item| item.id() == id) {
                    *existing = updated.clone();
                }
                Ok(updated)
            }
            Err(err) => Err(self.fail("update", err)),
        }
    }

    /// Delete an entity, then reload to pick up the server's renumbering.
    pub async fn delete(&self, id: EntityId) -> Result<(), AppError> {
        if let Err(err) = self.client.delete(id).await {
            return Err(self.fail("delete", err));
        }

        {
            let mut state = self.state.lock();
            state.items.retain(|item| item.id() != id);
            renumber(&mut state.items);
        }

        // The local renumbering stands in if the reload fails.
        let _ = self.load().await;
        Ok(())
    }

    pub fn items(&self) -> Vec<T> {
        self.state.lock().items.clone()
    }

    pub fn get(&self, id: EntityId) -> Option<T> {
        self.state
            .lock()
            .items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().items.is_empty()
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.state.lock().pagination
    }

    /// Whether local moves have not been committed yet.
    pub fn has_pending_changes(&self) -> bool {
        self.state.lock().order.is_pending()
    }

    pub fn order_phase(&self) -> MutationPhase {
        self.state.lock().order.phase()
    }

    pub fn is_toggling(&self, id: EntityId) -> bool {
        self.state.lock().toggling.contains(&id)
    }

    /// Take the notices queued since the last call.
    pub fn drain_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.state.lock().notices)
    }

    fn notify(&self, err: &AppError) {
        self.state.lock().notices.push(Notice::from_error(err));
    }

    fn fail(&self, action: &str, err: AppError) -> AppError {
        tracing::warn!(
            resource = T::RESOURCE,
            code = err.error_code(),
            "Failed to {}: {}",
            action,
            err
        );
        self.notify(&err);
        err
    }
}
