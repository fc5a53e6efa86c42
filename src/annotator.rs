//! Per-item annotation of the plugin listing
//!
//! The dataset for a pass is indexed once by plugin identifier; each listed
//! plugin is then answered with an O(1) lookup.

use std::collections::HashMap;

use crate::data::Dataset;
use crate::hooks::Hooks;

/// Icon wrapped by every annotation link
pub const LINK_ICON: &str = include_str!("../assets/link-icon.svg");

/// Inline style lining the icon up with the plugin row meta text
const LINK_STYLE: &str =
    "transform: translateY(5px);height: 21px;margin-left: 4px;display: inline-block;";

/// Lookup table from plugin identifier to reference URL
///
/// Built from the dataset in feed order, so a later duplicate identifier
/// replaces an earlier one.
#[derive(Debug, Clone, Default)]
pub struct ItemIndex {
    urls: HashMap<String, String>,
}

impl ItemIndex {
    pub fn build(dataset: &Dataset) -> Self {
        let urls = dataset
            .iter()
            .map(|entry| (entry.item_id.clone(), entry.url.clone()))
            .collect();
        Self { urls }
    }

    pub fn get(&self, item_id: &str) -> Option<&str> {
        self.urls.get(item_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Appends reference links to plugin row meta
#[derive(Debug, Clone)]
pub struct Annotator {
    index: ItemIndex,
    /// Whether the current viewer may see annotations
    can_manage: bool,
    hooks: Hooks,
}

impl Annotator {
    pub fn new(dataset: &Dataset, can_manage: bool, hooks: Hooks) -> Self {
        Self {
            index: ItemIndex::build(dataset),
            can_manage,
            hooks,
        }
    }

    pub fn index(&self) -> &ItemIndex {
        &self.index
    }

    /// Returns the meta list for one plugin row
    ///
    /// # Behavior
    /// - No data at all: returns an empty list, dropping `existing_meta`
    /// - Viewer lacks the capability: returns `existing_meta` unchanged
    /// - Plugin not in the dataset: returns `existing_meta` unchanged
    /// - Otherwise appends one link fragment (after the link hook) to `existing_meta`
    pub fn annotate(&self, item_id: &str, mut existing_meta: Vec<String>) -> Vec<String> {
        if self.index.is_empty() {
            return Vec::new();
        }

        if !self.can_manage {
            return existing_meta;
        }

        if let Some(url) = self.index.get(item_id) {
            let fragment = self.hooks.filter_link_html(link_fragment(url));
            existing_meta.push(fragment);
        }

        existing_meta
    }
}

/// Renders the link-and-icon fragment for a reference URL
///
/// The href is double-quoted, so the minimal entity set is enough to keep the
/// URL inside the attribute.
pub fn link_fragment(url: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank" style="{}">{}</a>"#,
        htmlescape::encode_minimal(url),
        LINK_STYLE,
        LINK_ICON
    )
}
