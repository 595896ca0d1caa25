//! `RemoteEntityClient` over the peer services' JSON API.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use sabor_core::client::{LookupError, RemoteEntityClient};
use sabor_core::{EntityId, IdSet};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Builds the HTTP client shared by every [`HttpEntityClient`] of a process.
///
/// # Errors
///
/// Returns the reqwest error if the TLS backend cannot be initialised.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

/// Reads one kind of entity from the service that owns it.
///
/// `GET {base}{resource}/{id}` answers a single entity and
/// `GET {base}{resource}/by-ids?ids=..` a list. A 404 from either means
/// "absent"; any other non-success status is a lookup failure. No retries.
#[derive(Debug, Clone)]
pub struct HttpEntityClient<E> {
    client: Client,
    base_url: String,
    resource: &'static str,
    entity: &'static str,
    _entity: PhantomData<fn() -> E>,
}

impl<E> HttpEntityClient<E> {
    /// Creates a client for `resource` (e.g. `/api/tables`) at `base_url`.
    #[must_use]
    pub fn new(
        client: Client,
        base_url: &str,
        resource: &'static str,
        entity: &'static str,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            resource,
            entity,
            _entity: PhantomData,
        }
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}{}/{suffix}", self.base_url, self.resource)
    }

    fn failure(&self, reason: impl std::fmt::Display) -> LookupError {
        LookupError::new(self.entity, reason.to_string())
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T, LookupError> {
        response
            .json::<T>()
            .await
            .map_err(|e| self.failure(format!("undecodable response: {e}")))
    }
}

#[async_trait]
impl<E> RemoteEntityClient for HttpEntityClient<E>
where
    E: DeserializeOwned + Send + 'static,
{
    type Entity = E;

    async fn get_by_id(&self, id: EntityId) -> Result<Option<E>, LookupError> {
        let url = self.url(&id.to_string());
        debug!(entity = self.entity, %url, "remote lookup");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.failure(e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => self.decode(response).await.map(Some),
            status => Err(self.failure(format!("GET {url} returned {status}"))),
        }
    }

    async fn get_by_ids(&self, ids: &IdSet) -> Result<Vec<E>, LookupError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let url = self.url("by-ids");
        let query: Vec<(&str, EntityId)> = ids.iter().map(|&id| ("ids", id)).collect();
        debug!(entity = self.entity, %url, requested = ids.len(), "remote batch lookup");
        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| self.failure(e))?;

        match response.status() {
            // Peers reconcile their by-ids endpoint, so a partial set comes back
            // as 404 and reads as "none found". Callers therefore reject a
            // partially resolved collection instead of accepting it.
            StatusCode::NOT_FOUND => Ok(Vec::new()),
            status if status.is_success() => self.decode(response).await,
            status => Err(self.failure(format!("GET {url} returned {status}"))),
        }
    }
}
