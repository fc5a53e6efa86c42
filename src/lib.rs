//! pluginlink library
//!
//! Fetches a plugin-to-URL mapping from a remote feed, caches it for 24 hours
//! and annotates plugin listing rows with a link to each plugin's reference page.

pub mod annotator;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod hooks;
pub mod pass;
