//! One render of the plugin listing
//!
//! A `RenderPass` is created at the start of a listing render. It applies the
//! operator's cache-bust override, resolves the dataset exactly once, records
//! operator-facing notices and then answers the per-plugin meta queries.

use log::info;

use crate::annotator::Annotator;
use crate::data::{FailureKind, FeedError, LinkProvider, Resolution};

/// Query parameter that forces the cached dataset to be discarded
pub const CACHE_BUST_PARAM: &str = "cacheBust";

/// Shown to operators when no feed endpoint is configured
pub const MISSING_ENDPOINT_NOTICE: &str = "No endpoint URL has been set. Set the \
    PLUGINLINK_ENDPOINT environment variable (or pass --endpoint) to the URL of the link feed.";

/// Returns true when a request query string carries the cache-bust parameter
///
/// Only the presence of the parameter matters, so `cacheBust`, `cacheBust=`
/// and `cacheBust=1` all qualify. A leading `?` is accepted.
pub fn wants_cache_bust(query: &str) -> bool {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes()).any(|(name, _)| name == CACHE_BUST_PARAM)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
}

/// A message for the operator, displayed by the host outside the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Inputs the host supplies at the start of a pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassRequest {
    /// Discard the cached dataset before reading it
    pub cache_bust: bool,
    /// Result of the host's capability check for the current viewer
    pub can_manage: bool,
}

impl PassRequest {
    pub fn new(can_manage: bool) -> Self {
        Self {
            cache_bust: false,
            can_manage,
        }
    }

    /// Builds a request from the admin page query string
    pub fn from_query(query: &str, can_manage: bool) -> Self {
        Self {
            cache_bust: wants_cache_bust(query),
            can_manage,
        }
    }

    pub fn with_cache_bust(mut self, cache_bust: bool) -> Self {
        self.cache_bust = cache_bust;
        self
    }
}

/// Where the dataset for a pass came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetSource {
    Cache,
    Live,
    Unavailable(FailureKind),
}

/// Dataset resolved once and shared by every row of one listing render
#[derive(Debug)]
pub struct RenderPass {
    /// `None` when the feed is not configured; rows pass through untouched
    annotator: Option<Annotator>,
    notices: Vec<Notice>,
    source: DatasetSource,
}

impl RenderPass {
    pub async fn begin(provider: &LinkProvider, request: &PassRequest) -> Self {
        let resolution = provider.resolve(request.cache_bust).await;

        let source = match &resolution {
            Resolution::Cached(_) => DatasetSource::Cache,
            Resolution::Fetched(_) => DatasetSource::Live,
            Resolution::Failed(e) => DatasetSource::Unavailable(e.kind()),
        };

        if let Some(FeedError::NotConfigured) = resolution.error() {
            info!("link feed endpoint not configured, annotations disabled for this pass");
            return Self {
                annotator: None,
                notices: vec![Notice::error(MISSING_ENDPOINT_NOTICE)],
                source,
            };
        }

        let dataset = resolution.into_dataset();
        let annotator = Annotator::new(&dataset, request.can_manage, provider.hooks().clone());

        Self {
            annotator: Some(annotator),
            notices: Vec::new(),
            source,
        }
    }

    /// Returns the meta list to render for one plugin row
    pub fn annotate(&self, item_id: &str, existing_meta: Vec<String>) -> Vec<String> {
        match self.annotator {
            Some(ref annotator) => annotator.annotate(item_id, existing_meta),
            None => existing_meta,
        }
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn source(&self) -> DatasetSource {
        self.source
    }

    /// Number of distinct plugins that have a link this pass
    pub fn linked_count(&self) -> usize {
        self.annotator.as_ref().map_or(0, |a| a.index().len())
    }
}
