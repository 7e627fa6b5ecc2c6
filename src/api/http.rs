//! reqwest-backed resource client.

use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};

use super::{parse_envelope, ApiEnvelope, ListFilters, ListPage, Pagination, ResourceClient};
use crate::errors::AppError;
use crate::models::{EntityId, OrderEntry, Orderable, ReorderRequest, StatusUpdate};

/// Longest slice of a non-envelope error body kept in the error message.
const MAX_ERROR_BODY: usize = 200;

/// HTTP client for a single REST resource, e.g. `{base}/courses`.
pub struct HttpResourceClient<T> {
    http: Client,
    base_url: String,
    token: Option<String>,
    _resource: PhantomData<fn() -> T>,
}

impl<T> Clone for HttpResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: self.token.clone(),
            _resource: PhantomData,
        }
    }
}

impl<T: Orderable> HttpResourceClient<T> {
    pub fn new(http: Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            token,
            _resource: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, T::RESOURCE)
    }

    fn item_url(&self, id: EntityId) -> String {
        format!("{}/{}/{}", self.base_url, T::RESOURCE, id)
    }

    /// Send a request and validate the response envelope.
    async fn send<D: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<(D, Option<Pagination>), AppError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        match parse_envelope::<D>(&body) {
            Ok(envelope) if status.is_success() => envelope.into_result(),
            Ok(ApiEnvelope::Failure { message, .. }) => Err(AppError::Rejected(message)),
            Ok(ApiEnvelope::Success { .. }) => Err(AppError::Status {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            }),
            Err(err) if status.is_success() => Err(err),
            Err(_) => {
                let text = String::from_utf8_lossy(&body);
                let message: String = text.chars().take(MAX_ERROR_BODY).collect();
                Err(AppError::Status {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[async_trait]
impl<T: Orderable> ResourceClient<T> for HttpResourceClient<T> {
    async fn list(&self, filters: &ListFilters) -> Result<ListPage<T>, AppError> {
        let request = self.http.get(self.collection_url()).query(filters);
        let (items, pagination) = self.send::<Vec<T>>(request).await?;
        tracing::debug!(resource = T::RESOURCE, count = items.len(), "Listed entities");
        Ok(ListPage { items, pagination })
    }

    async fn get(&self, id: EntityId) -> Result<T, AppError> {
        let request = self.http.get(self.item_url(id));
        Ok(self.send::<T>(request).await?.0)
    }

    async fn create(&self, draft: &T::Draft) -> Result<T, AppError> {
        let request = self.http.post(self.collection_url()).json(draft);
        Ok(self.send::<T>(request).await?.0)
    }

    async fn update(&self, id: EntityId, draft: &T::Draft) -> Result<T, AppError> {
        let request = self.http.put(self.item_url(id)).json(draft);
        Ok(self.send::<T>(request).await?.0)
    }

    async fn toggle_status(&self, id: EntityId) -> Result<StatusUpdate, AppError> {
        let url = format!("{}/toggle-status", self.item_url(id));
        Ok(self.send::<StatusUpdate>(self.http.patch(url)).await?.0)
    }

    async fn reorder(&self, entries: &[OrderEntry]) -> Result<(), AppError> {
        let url = format!("{}/reorder", self.collection_url());
        let body = ReorderRequest {
            items: entries.to_vec(),
        };
        self.send::<IgnoredAny>(self.http.put(url).json(&body)).await?;
        Ok(())
    }

    async fn delete(&self, id: EntityId) -> Result<(), AppError> {
        self.send::<IgnoredAny>(self.http.delete(self.item_url(id))).await?;
        Ok(())
    }
}
