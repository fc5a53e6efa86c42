//! Command-line interface parsing for pluginlink
//!
//! The binary performs a single render pass over the plugin identifiers given
//! on the command line and prints each plugin's meta list.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use reqwest::header::{HeaderName, HeaderValue};
use thiserror::Error;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// A `--header` value is not `Name: value` or is not a valid HTTP header
    #[error("Invalid header: '{0}'. Expected 'Name: value'")]
    InvalidHeader(String),

    /// A zero timeout would fail every request
    #[error("Invalid timeout: must be at least 1 second")]
    InvalidTimeout,
}

/// pluginlink - annotate installed plugins with links to their reference pages
#[derive(Parser, Debug)]
#[command(name = "pluginlink")]
#[command(about = "Annotate installed plugins with links from a remote feed")]
#[command(version)]
pub struct Cli {
    /// Plugin files to render, e.g. akismet/akismet.php
    #[arg(value_name = "PLUGIN")]
    pub plugins: Vec<String>,

    /// URL of the link feed
    #[arg(long, env = "PLUGINLINK_ENDPOINT", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Discard the cached dataset before this pass
    #[arg(long)]
    pub cache_bust: bool,

    /// Admin page query string; a `cacheBust` parameter discards the cache
    #[arg(long, value_name = "QUERY")]
    pub query: Option<String>,

    /// Directory for the cached dataset (defaults to the XDG cache directory)
    #[arg(long, value_name = "DIR", conflicts_with = "no_cache")]
    pub cache_dir: Option<PathBuf>,

    /// Keep the dataset in memory only
    #[arg(long)]
    pub no_cache: bool,

    /// Feed request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Extra request header, may be repeated
    ///
    /// Example: --header "Authorization: Bearer abc123"
    #[arg(long = "header", value_name = "NAME: VALUE")]
    pub headers: Vec<String>,

    /// Whether the viewer holds the capability to see annotations
    #[arg(long, default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    pub can_manage: bool,

    /// Print the meta lists as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parses a `Name: value` header argument.
///
/// # Returns
/// * `Ok((name, value))` with surrounding whitespace trimmed
/// * `Err(CliError::InvalidHeader)` if the separator is missing or either part is invalid
pub fn parse_header_arg(s: &str) -> Result<(String, String), CliError> {
    let invalid = || CliError::InvalidHeader(s.to_string());

    let (name, value) = s.split_once(':').ok_or_else(invalid)?;
    let (name, value) = (name.trim(), value.trim());

    HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
    HeaderValue::from_str(value).map_err(|_| invalid())?;

    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_arg_valid() {
        assert_eq!(
            parse_header_arg("X-Feed-Key: abc").unwrap(),
            ("X-Feed-Key".to_string(), "abc".to_string())
        );
        assert_eq!(
            parse_header_arg("Authorization:Bearer a:b").unwrap(),
            ("Authorization".to_string(), "Bearer a:b".to_string())
        );
    }

    #[test]
    fn test_parse_header_arg_invalid() {
        for bad in ["no separator", ": value", "Bad Name: v", "X-Key: line\nbreak"] {
            let err = parse_header_arg(bad).unwrap_err();
            assert!(err.to_string().contains("Invalid header"), "{}", bad);
        }
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["pluginlink"]);
        assert!(cli.plugins.is_empty());
        assert!(!cli.cache_bust);
        assert!(cli.can_manage);
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_parse_plugins_and_flags() {
        let cli = Cli::parse_from([
            "pluginlink",
            "--endpoint",
            "https://feed.test/links.json",
            "--cache-bust",
            "--header",
            "X-A: 1",
            "--header",
            "X-B: 2",
            "--timeout",
            "10",
            "foo/foo.php",
            "bar/bar.php",
        ]);

        assert_eq!(cli.plugins, vec!["foo/foo.php", "bar/bar.php"]);
        assert_eq!(cli.endpoint.as_deref(), Some("https://feed.test/links.json"));
        assert!(cli.cache_bust);
        assert_eq!(cli.headers.len(), 2);
        assert_eq!(cli.timeout, Some(10));
    }

    #[test]
    fn test_cli_parse_can_manage_false() {
        let cli = Cli::parse_from(["pluginlink", "--can-manage", "false", "foo/foo.php"]);
        assert!(!cli.can_manage);
    }

    #[test]
    fn test_cli_cache_dir_conflicts_with_no_cache() {
        let result = Cli::try_parse_from(["pluginlink", "--cache-dir", "/tmp/x", "--no-cache"]);
        assert!(result.is_err());
    }
}
