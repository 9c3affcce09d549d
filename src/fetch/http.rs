//! Reqwest-backed page fetcher.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use serde::de::DeserializeOwned;

use crate::fetch::{BoxFuture, CancelSignal, FetchError, FetchResult, Page, PageFetcher};
use crate::query::QueryKey;

/// Fetches pages over HTTP from a JSON backend.
///
/// Builds `GET {base_url}{endpoint}` with the key's params as the query
/// string and races the request against the cancel signal. No retries.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher<T> {
    base_url: String,
    http: Arc<reqwest::Client>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> HttpPageFetcher<T> {
    /// Creates a fetcher targeting `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Creates a fetcher with a request timeout applied to every call.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: Arc::new(client),
            _marker: PhantomData,
        }
    }
}

impl<T> PageFetcher for HttpPageFetcher<T>
where
    T: DeserializeOwned + Send + Sync,
{
    type Item = T;

    fn fetch_page<'a>(
        &'a self,
        key: &'a QueryKey,
        mut cancel: CancelSignal,
    ) -> BoxFuture<'a, FetchResult<Page<T>>> {
        Box::pin(async move {
            let url = format!("{}{}", self.base_url, key.endpoint);
            debug!(
                "fetching {url} page={} limit={}",
                key.params.page, key.params.limit
            );

            let request = self.http.get(&url).query(&key.params).send();
            let response = tokio::select! {
                _ = cancel.cancelled() => return Err(FetchError::Cancelled),
                res = request => res.map_err(|e| FetchError::Transport(e.to_string()))?,
            };

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::UnexpectedStatus(status.as_u16()));
            }

            let page = tokio::select! {
                _ = cancel.cancelled() => return Err(FetchError::Cancelled),
                body = response.json::<Page<T>>() => {
                    body.map_err(|e| FetchError::Decode(e.to_string()))?
                }
            };

            Ok(page)
        })
    }
}
