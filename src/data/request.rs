//! Options for the outbound feed request

use std::time::Duration;

use reqwest::header::USER_AGENT;
use reqwest::RequestBuilder;

/// Default user agent sent with feed requests
pub const DEFAULT_USER_AGENT: &str = concat!("pluginlink/", env!("CARGO_PKG_VERSION"));

/// Options bag applied to the feed GET request
///
/// Starts from the configured defaults and is passed through the
/// request-options hook before every live fetch, so collaborators can add
/// headers, auth or a timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// Extra request headers, sent in order
    pub headers: Vec<(String, String)>,
    /// Whole-request timeout; `None` leaves the HTTP client default
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
    /// Extra query parameters appended to the endpoint URL
    pub query: Vec<(String, String)>,
    /// Sent as `Authorization: Bearer <token>`
    pub bearer_token: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            timeout: None,
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            query: Vec::new(),
            bearer_token: None,
        }
    }
}

impl RequestOptions {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Applies the options to a request builder
    pub fn apply(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(ref user_agent) = self.user_agent {
            request = request.header(USER_AGENT, user_agent.as_str());
        }
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if !self.query.is_empty() {
            request = request.query(&self.query);
        }
        if let Some(ref token) = self.bearer_token {
            request = request.bearer_auth(token);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        request
    }
}
