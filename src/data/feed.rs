//! Remote link feed provider
//!
//! Serves the link dataset from the cache slot when it is fresh, otherwise
//! performs a live GET against the configured endpoint and repopulates the
//! cache on success. Every failure degrades to "no dataset" for the current
//! pass; nothing is cached in that case, so the next pass retries live.

use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::{Dataset, RequestOptions};
use crate::cache::DatasetStore;
use crate::hooks::Hooks;

/// Errors that can occur when resolving the link dataset
#[derive(Debug, Error)]
pub enum FeedError {
    /// No endpoint URL is configured
    #[error("No endpoint URL has been configured")]
    NotConfigured,

    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Feed responded with HTTP {0}")]
    StatusError(StatusCode),

    /// Failed to parse the response body
    #[error("Failed to parse feed: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Broad class of a feed failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The operator has not configured the feed
    Configuration,
    /// Network failure or non-success HTTP status
    Transport,
    /// Malformed response body
    Decode,
}

impl FeedError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FeedError::NotConfigured => FailureKind::Configuration,
            FeedError::HttpError(_) | FeedError::StatusError(_) => FailureKind::Transport,
            FeedError::ParseError(_) => FailureKind::Decode,
        }
    }
}

/// Outcome of resolving the dataset for one pass
#[derive(Debug)]
pub enum Resolution {
    /// Served from the cache slot, no network traffic
    Cached(Dataset),
    /// Fetched live; cached if non-empty
    Fetched(Dataset),
    /// Nothing usable; the pass proceeds without annotations
    Failed(FeedError),
}

impl Resolution {
    /// The resolved dataset, degrading a failure to an empty one
    pub fn into_dataset(self) -> Dataset {
        match self {
            Resolution::Cached(dataset) | Resolution::Fetched(dataset) => dataset,
            Resolution::Failed(_) => Dataset::empty(),
        }
    }

    pub fn error(&self) -> Option<&FeedError> {
        match self {
            Resolution::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Resolves the link dataset from cache or the remote feed
pub struct LinkProvider {
    /// HTTP client for making requests
    http_client: Client,
    /// Feed URL; `None` is a configuration error
    endpoint: Option<String>,
    /// Cache slot for the last good dataset
    store: Box<dyn DatasetStore>,
    /// Base request options, passed through the request hook on every fetch
    request_options: RequestOptions,
    hooks: Hooks,
}

impl LinkProvider {
    pub fn new(endpoint: Option<String>, store: impl DatasetStore + 'static) -> Self {
        Self {
            http_client: Client::new(),
            endpoint: endpoint.filter(|e| !e.trim().is_empty()),
            store: Box::new(store),
            request_options: RequestOptions::default(),
            hooks: Hooks::default(),
        }
    }

    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_request_options(mut self, request_options: RequestOptions) -> Self {
        self.request_options = request_options;
        self
    }

    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn store(&self) -> &dyn DatasetStore {
        self.store.as_ref()
    }

    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// Resolves the dataset for one pass
    ///
    /// # Behavior
    /// - Without an endpoint, fails with `NotConfigured` (no cache or network access)
    /// - With `cache_bust`, clears the cache slot before reading it
    /// - Returns a fresh, non-empty cached dataset without touching the network
    /// - Otherwise fetches live; see [`LinkProvider::fetch_live`]
    pub async fn resolve(&self, cache_bust: bool) -> Resolution {
        if self.endpoint.is_none() {
            debug!("link feed endpoint is not configured");
            return Resolution::Failed(FeedError::NotConfigured);
        }

        if cache_bust {
            info!("cache bust requested, clearing link dataset");
            if let Err(e) = self.store.invalidate() {
                warn!("Failed to clear link dataset cache: {}", e);
            }
        }

        if let Some(dataset) = self.store.read().filter(|d| !d.is_empty()) {
            debug!("serving {} link entries from cache", dataset.len());
            return Resolution::Cached(dataset);
        }

        match self.fetch_live().await {
            Ok(dataset) => Resolution::Fetched(dataset),
            Err(e) => {
                warn!("Link feed unavailable, continuing without annotations: {}", e);
                Resolution::Failed(e)
            }
        }
    }

    /// Resolves the dataset, degrading any failure to an empty dataset
    pub async fn get_dataset(&self, cache_bust: bool) -> Dataset {
        self.resolve(cache_bust).await.into_dataset()
    }

    /// Fetches the feed from the endpoint, bypassing the cache read
    ///
    /// The parsed dataset goes through the dataset hook and is written to the
    /// cache only when the result is non-empty. On any error the cache is left
    /// untouched.
    pub async fn fetch_live(&self) -> Result<Dataset, FeedError> {
        let endpoint = self.endpoint.as_deref().ok_or(FeedError::NotConfigured)?;
        let options = self
            .hooks
            .filter_request_options(self.request_options.clone());

        info!("fetching link feed from {}", endpoint);
        let response = options.apply(self.http_client.get(endpoint)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::StatusError(status));
        }

        let body = response.text().await?;
        let dataset: Dataset = serde_json::from_str(&body)?;
        let dataset = self.hooks.filter_dataset(dataset);

        if dataset.is_empty() {
            debug!("link feed returned no entries, leaving cache untouched");
        } else if let Err(e) = self.store.write(&dataset) {
            warn!("Failed to cache link dataset: {}", e);
        } else {
            debug!("cached {} link entries", dataset.len());
        }

        Ok(dataset)
    }
}
