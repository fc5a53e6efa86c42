//! Runtime settings derived from CLI arguments and environment

use std::path::PathBuf;
use std::time::Duration;

use log::warn;

use crate::cache::{CacheManager, FileStore, MemoryStore};
use crate::cli::{parse_header_arg, Cli, CliError};
use crate::data::{LinkProvider, RequestOptions};
use crate::hooks::Hooks;
use crate::pass::{wants_cache_bust, PassRequest};

/// Where the dataset slot lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLocation {
    Dir(PathBuf),
    Memory,
}

/// Configuration for one invocation
#[derive(Debug, Clone)]
pub struct Settings {
    /// Feed URL; absence is reported as a notice, not a startup failure
    pub endpoint: Option<String>,
    pub cache: CacheLocation,
    /// Base options for the feed request, before the request hook
    pub request_options: RequestOptions,
    pub pass: PassRequest,
    /// Plugin identifiers to render, in listing order
    pub plugins: Vec<String>,
    pub json: bool,
}

impl Settings {
    /// Creates Settings from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(Settings)` with appropriate settings
    /// * `Err(CliError)` if a header or the timeout is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let mut request_options = RequestOptions::default();
        for header in &cli.headers {
            let (name, value) = parse_header_arg(header)?;
            request_options = request_options.header(name, value);
        }
        match cli.timeout {
            Some(0) => return Err(CliError::InvalidTimeout),
            Some(secs) => request_options = request_options.timeout(Duration::from_secs(secs)),
            None => {}
        }

        let cache = if cli.no_cache {
            CacheLocation::Memory
        } else if let Some(ref dir) = cli.cache_dir {
            CacheLocation::Dir(dir.clone())
        } else {
            match CacheManager::new() {
                Some(manager) => CacheLocation::Dir(manager.dir().to_path_buf()),
                None => {
                    warn!("No cache directory available, caching in memory only");
                    CacheLocation::Memory
                }
            }
        };

        let cache_bust = cli.cache_bust || cli.query.as_deref().is_some_and(wants_cache_bust);

        Ok(Self {
            endpoint: cli.endpoint.clone(),
            cache,
            request_options,
            pass: PassRequest::new(cli.can_manage).with_cache_bust(cache_bust),
            plugins: cli.plugins.clone(),
            json: cli.json,
        })
    }

    /// Builds the provider these settings describe
    pub fn build_provider(&self, hooks: Hooks) -> LinkProvider {
        let provider = match self.cache {
            CacheLocation::Dir(ref dir) => LinkProvider::new(
                self.endpoint.clone(),
                FileStore::new(CacheManager::with_dir(dir.clone())),
            ),
            CacheLocation::Memory => LinkProvider::new(self.endpoint.clone(), MemoryStore::new()),
        };

        provider
            .with_request_options(self.request_options.clone())
            .with_hooks(hooks)
    }
}
