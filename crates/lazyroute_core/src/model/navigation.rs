//! Navigation descriptor model.
//!
//! # Responsibility
//! - Define the read-only shape the router hands to every route loader.
//! - Provide the scroll-key fallback used when the router omits a key.
//!
//! # Invariants
//! - Descriptors are never mutated by the core; loaders only read them.
//! - `Location::key` is `None` for the initial history entry, and callers
//!   must resolve it through `scroll_key` rather than unwrapping.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Sentinel navigation key used when the router does not supply one.
pub const ROOT_SCROLL_KEY: &str = "root";

/// History transition that produced the current location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HistoryAction {
    /// Fresh forward navigation adding a new entry.
    Push,
    /// Fresh navigation replacing the current entry.
    Replace,
    /// Back/forward traversal to a previously visited entry.
    Pop,
}

impl HistoryAction {
    /// Stable wire string (`PUSH|REPLACE|POP`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Push => "PUSH",
            Self::Replace => "REPLACE",
            Self::Pop => "POP",
        }
    }
}

impl Display for HistoryAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One history entry as seen by the router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub pathname: String,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub hash: String,
    /// Unique per history entry. Absent on the very first entry.
    #[serde(default)]
    pub key: Option<String>,
    /// Opaque state attached by whoever pushed the entry.
    #[serde(default)]
    pub state: Option<serde_json::Value>,
}

impl Location {
    /// Creates a location with only a pathname set.
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: String::new(),
            hash: String::new(),
            key: None,
            state: None,
        }
    }

    /// Builder-style key assignment.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Builder-style query string assignment. A leading `?` is kept as given.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Path plus query string, as reported to analytics.
    pub fn path_with_search(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }

    /// Returns the key used for scroll bookkeeping.
    pub fn scroll_key<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.key.as_deref().unwrap_or(fallback)
    }
}

/// Result of matching a location against a route pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMatch {
    pub params: BTreeMap<String, String>,
    pub is_exact: bool,
    /// Pattern that matched, e.g. `/download/:version`.
    pub path: String,
    /// Matched portion of the pathname.
    pub url: String,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Everything the router supplies for one render of one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationDescriptor {
    /// Route pattern that selected this loader.
    pub path: String,
    pub action: HistoryAction,
    pub location: Location,
    #[serde(rename = "match")]
    pub route_match: RouteMatch,
}

impl NavigationDescriptor {
    /// Creates a descriptor whose match covers the full pathname.
    pub fn new(path: impl Into<String>, action: HistoryAction, location: Location) -> Self {
        let path = path.into();
        let url = location.pathname.clone();
        Self {
            route_match: RouteMatch {
                params: BTreeMap::new(),
                is_exact: true,
                path: path.clone(),
                url,
            },
            path,
            action,
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HistoryAction, Location, NavigationDescriptor, ROOT_SCROLL_KEY};

    #[test]
    fn scroll_key_falls_back_to_sentinel() {
        let location = Location::new("/");
        assert_eq!(location.scroll_key(ROOT_SCROLL_KEY), "root");

        let keyed = Location::new("/").with_key("abc123");
        assert_eq!(keyed.scroll_key(ROOT_SCROLL_KEY), "abc123");
    }

    #[test]
    fn path_with_search_concatenates_query() {
        let location = Location::new("/download").with_search("?v=3.0.0");
        assert_eq!(location.path_with_search(), "/download?v=3.0.0");
    }

    #[test]
    fn descriptor_serializes_action_and_match_fields() {
        let descriptor =
            NavigationDescriptor::new("/guide", HistoryAction::Pop, Location::new("/guide"));
        let json = serde_json::to_value(&descriptor).expect("descriptor should serialize");
        assert_eq!(json["action"], "POP");
        assert_eq!(json["match"]["url"], "/guide");
        assert_eq!(json["match"]["is_exact"], true);
    }
}
