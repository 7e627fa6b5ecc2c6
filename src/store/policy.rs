//! Reconciliation policy and mutation bookkeeping.

use crate::errors::AppError;

/// When a mutation touches local state relative to the server call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyMode {
    /// Apply locally first, reconcile when the server answers.
    #[default]
    Optimistic,
    /// Leave local state alone until the server confirms.
    Pessimistic,
}

/// How a failed order commit is undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RollbackStrategy {
    /// Discard the local order and reload the list from the server.
    #[default]
    Refetch,
    /// Restore the snapshot taken before the first uncommitted move.
    Snapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconciliationPolicy {
    pub toggle: ApplyMode,
    pub rollback: RollbackStrategy,
}

impl ReconciliationPolicy {
    pub fn pessimistic_toggle(mut self) -> Self {
        self.toggle = ApplyMode::Pessimistic;
        self
    }

    pub fn snapshot_rollback(mut self) -> Self {
        self.rollback = RollbackStrategy::Snapshot;
        self
    }
}

/// Lifecycle of an optimistic mutation carrying the state to restore.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MutationState<S> {
    #[default]
    Idle,
    Pending(S),
    Committed,
    RolledBack,
}

impl<S> MutationState<S> {
    pub fn phase(&self) -> MutationPhase {
        match self {
            MutationState::Idle => MutationPhase::Idle,
            MutationState::Pending(_) => MutationPhase::Pending,
            MutationState::Committed => MutationPhase::Committed,
            MutationState::RolledBack => MutationPhase::RolledBack,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, MutationState::Pending(_))
    }

    /// Take the pending snapshot, leaving `next` in its place.
    pub fn settle(&mut self, next: MutationState<S>) -> Option<S> {
        match std::mem::replace(self, next) {
            MutationState::Pending(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// Snapshot-free view of [`MutationState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationPhase {
    Idle,
    Pending,
    Committed,
    RolledBack,
}

/// Result of [`ListStore::toggle_status`](super::ListStore::toggle_status).
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// Server confirmed; carries the flag the server reported.
    Applied(bool),
    /// Server call failed; the flag is back at its previous value.
    Reverted(AppError),
    /// A toggle for the same id was already in flight.
    Ignored,
    /// No local entity with that id.
    Missing,
}

/// Result of [`ListStore::commit_order`](super::ListStore::commit_order).
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    Committed,
    /// No uncommitted moves, nothing was sent.
    NothingPending,
    /// The reorder call failed and the local order was discarded.
    RolledBack(AppError),
}
