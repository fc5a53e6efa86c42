//! Extension hooks
//!
//! Three pass-through filters that collaborators can replace. Each defaults to
//! the identity function.
//!
//! - `request_options`: rewrites the outbound feed request options
//! - `dataset`: rewrites or filters the parsed feed before it is cached
//! - `link_html`: rewrites the rendered annotation fragment before insertion

use std::fmt;
use std::sync::Arc;

use crate::data::{Dataset, RequestOptions};

pub type RequestOptionsFilter = Arc<dyn Fn(RequestOptions) -> RequestOptions + Send + Sync>;
pub type DatasetFilter = Arc<dyn Fn(Dataset) -> Dataset + Send + Sync>;
pub type LinkHtmlFilter = Arc<dyn Fn(String) -> String + Send + Sync>;

#[derive(Clone)]
pub struct Hooks {
    request_options: RequestOptionsFilter,
    dataset: DatasetFilter,
    link_html: LinkHtmlFilter,
}

impl Hooks {
    pub fn new() -> Self {
        Self {
            request_options: Arc::new(|options| options),
            dataset: Arc::new(|dataset| dataset),
            link_html: Arc::new(|html| html),
        }
    }

    pub fn with_request_options<F>(mut self, filter: F) -> Self
    where
        F: Fn(RequestOptions) -> RequestOptions + Send + Sync + 'static,
    {
        self.request_options = Arc::new(filter);
        self
    }

    pub fn with_dataset<F>(mut self, filter: F) -> Self
    where
        F: Fn(Dataset) -> Dataset + Send + Sync + 'static,
    {
        self.dataset = Arc::new(filter);
        self
    }

    pub fn with_link_html<F>(mut self, filter: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.link_html = Arc::new(filter);
        self
    }

    pub fn filter_request_options(&self, options: RequestOptions) -> RequestOptions {
        (self.request_options)(options)
    }

    pub fn filter_dataset(&self, dataset: Dataset) -> Dataset {
        (self.dataset)(dataset)
    }

    pub fn filter_link_html(&self, html: String) -> String {
        (self.link_html)(html)
    }
}

impl Default for Hooks {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks").finish_non_exhaustive()
    }
}
