//! A remote-backed list that grows by cursor pages.
//!
//! Phases: `Idle -> Loading -> Loaded`, `Loaded -> LoadingMore -> Loaded`.
//! Every request is stamped with a token; a response whose token is no
//! longer current (superseded by a refresh or a newer load-more) is dropped.

use std::collections::HashSet;

use anyhow::Result;

use crate::page::{Cursor, Page, PageState, normalize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    Loaded,
    LoadingMore,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RequestKind {
    Refresh,
    More,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestToken {
    seq: u64,
    kind: RequestKind,
    cursor: Option<Cursor>,
}

impl RequestToken {
    /// The cursor to send with this request (`None` for a first page).
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn is_refresh(&self) -> bool {
        self.kind == RequestKind::Refresh
    }
}

type KeyFn<T> = Box<dyn Fn(&T) -> String>;

pub struct ListController<T> {
    items: Vec<T>,
    next_cursor: Option<Cursor>,
    phase: ListPhase,
    seq: u64,
    current: Option<u64>,
    dedupe: Option<KeyFn<T>>,
    last_error: Option<String>,
}

impl<T> Default for ListController<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
            phase: ListPhase::Idle,
            seq: 0,
            current: None,
            dedupe: None,
            last_error: None,
        }
    }
}

impl<T> std::fmt::Debug for ListController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("len", &self.items.len())
            .field("next_cursor", &self.next_cursor)
            .field("phase", &self.phase)
            .field("seq", &self.seq)
            .finish()
    }
}

impl<T> ListController<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops appended items whose key is already loaded. Off by default.
    pub fn with_dedupe(mut self, key: impl Fn(&T) -> String + 'static) -> Self {
        self.dedupe = Some(Box::new(key));
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn next_cursor(&self) -> Option<&Cursor> {
        self.next_cursor.as_ref()
    }

    pub fn phase(&self) -> ListPhase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, ListPhase::Loading | ListPhase::LoadingMore)
    }

    pub fn can_load_more(&self) -> bool {
        self.phase == ListPhase::Loaded && self.next_cursor.is_some()
    }

    fn issue(&mut self, kind: RequestKind, cursor: Option<Cursor>) -> RequestToken {
        self.seq += 1;
        self.current = Some(self.seq);
        RequestToken {
            seq: self.seq,
            kind,
            cursor,
        }
    }

    /// Starts a first-page load; any in-flight request is superseded.
    pub fn begin_refresh(&mut self) -> RequestToken {
        self.phase = ListPhase::Loading;
        self.issue(RequestKind::Refresh, None)
    }

    /// Starts a next-page load. `None` at the end of the list or while a
    /// first-page load is running.
    pub fn begin_load_more(&mut self) -> Option<RequestToken> {
        match self.phase {
            ListPhase::Loaded | ListPhase::LoadingMore => {}
            _ => return None,
        }
        let cursor = self.next_cursor.clone()?;
        self.phase = ListPhase::LoadingMore;
        Some(self.issue(RequestKind::More, Some(cursor)))
    }

    fn is_current(&self, token: &RequestToken) -> bool {
        self.current == Some(token.seq)
    }

    /// Applies a response. Returns false (and changes nothing) when the
    /// token was superseded.
    pub fn complete(&mut self, token: &RequestToken, page: PageState<T>) -> bool {
        if !self.is_current(token) {
            tracing::debug!(seq = token.seq, "dropping superseded list response");
            return false;
        }
        self.current = None;
        self.last_error = None;
        match token.kind {
            RequestKind::Refresh => {
                self.items = page.items;
            }
            RequestKind::More => {
                let incoming = page.items;
                match &self.dedupe {
                    Some(key) => {
                        let mut seen: HashSet<String> = self.items.iter().map(key).collect();
                        for item in incoming {
                            if seen.insert(key(&item)) {
                                self.items.push(item);
                            }
                        }
                    }
                    None => self.items.extend(incoming),
                }
            }
        }
        self.next_cursor = page.next_cursor;
        self.phase = ListPhase::Loaded;
        true
    }

    /// Records a failed request. Loaded items are kept.
    pub fn fail(&mut self, token: &RequestToken, message: impl Into<String>) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.current = None;
        self.last_error = Some(message.into());
        self.phase = match token.kind {
            RequestKind::More => ListPhase::Loaded,
            RequestKind::Refresh if self.items.is_empty() => ListPhase::Failed,
            RequestKind::Refresh => ListPhase::Loaded,
        };
        true
    }

    /// Fetches the first page synchronously and replaces the items.
    pub fn refresh(
        &mut self,
        fetch: impl FnOnce(Option<&Cursor>) -> Result<Page<T>>,
    ) -> Result<()> {
        let token = self.begin_refresh();
        self.run(token, fetch)
    }

    /// Fetches the next page synchronously and appends it. Returns false
    /// when there is nothing more to load.
    pub fn load_more(
        &mut self,
        fetch: impl FnOnce(Option<&Cursor>) -> Result<Page<T>>,
    ) -> Result<bool> {
        let Some(token) = self.begin_load_more() else {
            return Ok(false);
        };
        self.run(token, fetch)?;
        Ok(true)
    }

    fn run(
        &mut self,
        token: RequestToken,
        fetch: impl FnOnce(Option<&Cursor>) -> Result<Page<T>>,
    ) -> Result<()> {
        match fetch(token.cursor()) {
            Ok(page) => {
                self.complete(&token, normalize(page));
                Ok(())
            }
            Err(err) => {
                self.fail(&token, format!("{:#}", err));
                Err(err)
            }
        }
    }

    /// Replaces items in place (e.g. after a single-record refresh).
    pub fn replace_where(&mut self, pred: impl Fn(&T) -> bool, item: T) {
        if let Some(slot) = self.items.iter_mut().find(|i| pred(i)) {
            *slot = item;
        }
    }

    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|i| pred(i))
    }
}

#[cfg(test)]
#[path = "tests/cursor_list_tests.rs"]
mod tests;
