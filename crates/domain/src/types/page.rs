//! Paging envelope shared by every list endpoint
//!
//! List responses look like `{"_embedded": {"<items>": [...]}, "page": {...}}`.
//! The items key differs per resource, so the embedded part is a type
//! parameter implementing [`EmbeddedItems`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

/// Paging metadata returned with every list call.
#[serde_as]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Page {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub size: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub total_elements: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub total_pages: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub number: u32,
}

impl Page {
    /// The listing matched nothing at all.
    pub fn is_empty(&self) -> bool {
        self.total_pages == 0
    }

    /// This page is the last one.
    ///
    /// A page number past the total is treated as last as well, so a
    /// misbehaving server cannot keep a traversal going forever.
    pub fn is_last(&self) -> bool {
        self.number >= self.total_pages
    }
}

/// The `_embedded` object of a list response.
pub trait EmbeddedItems: DeserializeOwned + Default {
    type Item;

    fn into_items(self) -> Vec<Self::Item>;
}

/// Full list response: embedded items plus paging metadata.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(bound(deserialize = "E: DeserializeOwned + Default"))]
pub struct ListEnvelope<E> {
    /// Absent when the listing is empty.
    #[serde(rename = "_embedded", default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub embedded: E,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub page: Page,
}
