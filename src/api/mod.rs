//! Remote resource access.
//!
//! [`ResourceClient`] is the boundary between the list stores and the REST
//! backend. [`HttpResourceClient`] is the production implementation.

mod envelope;
mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use envelope::*;
pub use http::*;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{EntityId, OrderEntry, Orderable, StatusUpdate};

/// Query filters accepted by list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ListFilters {
    /// Whether the list response can leave out part of the collection.
    pub fn narrows(&self) -> bool {
        self.search.as_deref().is_some_and(|term| !term.trim().is_empty())
            || self.is_active.is_some()
            || self.category.is_some()
            || self.page.is_some_and(|page| page > 1)
    }
}

/// One page of a list response.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

/// CRUD, reorder and status-toggle calls for one resource type.
///
/// A rejected call and a `success: false` payload both surface as `Err`.
#[async_trait]
pub trait ResourceClient<T: Orderable>: Send + Sync {
    async fn list(&self, filters: &ListFilters) -> Result<ListPage<T>, AppError>;
    async fn get(&self, id: EntityId) -> Result<T, AppError>;
    async fn create(&self, draft: &T::Draft) -> Result<T, AppError>;
    async fn update(&self, id: EntityId, draft: &T::Draft) -> Result<T, AppError>;
    async fn toggle_status(&self, id: EntityId) -> Result<StatusUpdate, AppError>;
    async fn reorder(&self, entries: &[OrderEntry]) -> Result<(), AppError>;
    async fn delete(&self, id: EntityId) -> Result<(), AppError>;
}

#[async_trait]
impl<T, C> ResourceClient<T> for Arc<C>
where
    T: Orderable,
    C: ResourceClient<T> + ?Sized,
{
    async fn list(&self, filters: &ListFilters) -> Result<ListPage<T>, AppError> {
        (**self).list(filters).await
    }

    async fn get(&self, id: EntityId) -> Result<T, AppError> {
        (**self).get(id).await
    }

    async fn create(&self, draft: &T::Draft) -> Result<T, AppError> {
        (**self).create(draft).await
    }

    async fn update(&self, id: EntityId, draft: &T::Draft) -> Result<T, AppError> {
        (**self).update(id, draft).await
    }

    async fn toggle_status(&self, id: EntityId) -> Result<StatusUpdate, AppError> {
        (**self).toggle_status(id).await
    }

    async fn reorder(&self, entries: &[OrderEntry]) -> Result<(), AppError> {
        (**self).reorder(entries).await
    }

    async fn delete(&self, id: EntityId) -> Result<(), AppError> {
        (**self).delete(id).await
    }
}
