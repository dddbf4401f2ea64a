//! Normalization of list responses.
//!
//! Every list endpoint of the platform API answers either with a bare JSON
//! array or with an `{items, nextCursor}` envelope. Both shapes are folded
//! into [`PageState`] at the client boundary so nothing past the remote
//! layer has to care which one the server picked.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Opaque continuation token handed out by the server.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() { None } else { Some(Self(raw)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A list response as it appears on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Page<T> {
    List(Vec<T>),
    Page {
        items: Vec<T>,
        #[serde(default, rename = "nextCursor")]
        next_cursor: Option<Cursor>,
    },
}

/// The canonical shape every list is held in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<Cursor>,
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
        }
    }
}

impl<T> PageState<T> {
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}

pub fn normalize<T>(page: Page<T>) -> PageState<T> {
    match page {
        Page::List(items) => PageState {
            items,
            next_cursor: None,
        },
        Page::Page { items, next_cursor } => PageState {
            items,
            // An empty token is as terminal as a missing one.
            next_cursor: next_cursor.and_then(|c| Cursor::new(c.0)),
        },
    }
}

/// Normalizes an arbitrary JSON value. Anything that is neither a list of
/// `T` nor an envelope around one degrades to an empty, terminal page.
pub fn normalize_value<T: DeserializeOwned>(value: serde_json::Value) -> PageState<T> {
    match value {
        serde_json::Value::Array(_) => PageState {
            items: serde_json::from_value(value).unwrap_or_default(),
            next_cursor: None,
        },
        serde_json::Value::Object(mut obj) => {
            let items = obj
                .remove("items")
                .and_then(|v| serde_json::from_value::<Vec<T>>(v).ok())
                .unwrap_or_default();
            let next_cursor = obj
                .remove("nextCursor")
                .and_then(|v| v.as_str().map(str::to_string))
                .and_then(Cursor::new);
            PageState { items, next_cursor }
        }
        _ => PageState::default(),
    }
}

/// Query parameters shared by every list endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub limit: Option<u32>,
    pub cursor: Option<Cursor>,
    filters: Vec<(String, String)>,
}

impl PageQuery {
    pub fn new(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn with_cursor(mut self, cursor: Option<Cursor>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Adds a filter; empty values are skipped so callers can pass form
    /// fields straight through.
    pub fn filter(mut self, key: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        let value = value.trim();
        if !value.is_empty() {
            self.filters.push((key.to_string(), value.to_string()));
        }
        self
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut out = Vec::with_capacity(self.filters.len() + 2);
        if let Some(limit) = self.limit {
            out.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(cursor) = &self.cursor {
            out.push(("cursor".to_string(), cursor.as_str().to_string()));
        }
        out.extend(self.filters.iter().cloned());
        out
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
