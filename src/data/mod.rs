//! Link data model and the remote feed provider
//!
//! The feed is a JSON array of records, each naming a plugin file and the
//! URL of its reference page:
//!
//! ```json
//! [{ "plugin": "foo/foo.php", "url": "https://notion.so/foo" }]
//! ```
//!
//! Unrecognized fields are ignored.

pub mod feed;
pub mod request;

pub use feed::{FailureKind, FeedError, LinkProvider, Resolution};
pub use request::RequestOptions;

use serde::{Deserialize, Serialize};

/// One row of the remote dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// Plugin file identifier, e.g. `akismet/akismet.php`
    #[serde(rename = "plugin")]
    pub item_id: String,
    /// Reference page for the plugin
    pub url: String,
}

impl LinkEntry {
    pub fn new(item_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            url: url.into(),
        }
    }
}

/// An ordered snapshot of the remote feed
///
/// Immutable once built; a later fetch replaces it wholesale. An empty
/// dataset and an absent one both mean "no annotations available".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    entries: Vec<LinkEntry>,
}

impl Dataset {
    /// Dataset with no entries
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[LinkEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LinkEntry> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<LinkEntry> {
        self.entries
    }
}

impl From<Vec<LinkEntry>> for Dataset {
    fn from(entries: Vec<LinkEntry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<LinkEntry> for Dataset {
    fn from_iter<I: IntoIterator<Item = LinkEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a LinkEntry;
    type IntoIter = std::slice::Iter<'a, LinkEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Dataset {
    type Item = LinkEntry;
    type IntoIter = std::vec::IntoIter<LinkEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
