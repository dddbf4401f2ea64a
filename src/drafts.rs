//! Client-held edit drafts, keyed by entity id.
//!
//! A draft is seeded from server values the first time its entity shows up
//! in a list and is left alone by later refreshes, so edits in progress
//! survive a reload. A draft lives only as long as its entity is listed.

use std::collections::{HashMap, HashSet};

use crate::error::ValidationError;

mod forms;
pub use self::forms::{
    BusinessDrafts, RateLimitDraft, ReadOnlyDraft, ReviewDraft, StatusDraft, SubscriptionDraft,
};

#[derive(Clone, Debug)]
pub struct DraftStore<D> {
    drafts: HashMap<String, D>,
}

impl<D> Default for DraftStore<D> {
    fn default() -> Self {
        Self {
            drafts: HashMap::new(),
        }
    }
}

impl<D> DraftStore<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a draft for every item that does not have one yet. Returns
    /// how many were created.
    pub fn seed<T>(
        &mut self,
        items: &[T],
        id_of: impl Fn(&T) -> &str,
        make: impl Fn(&T) -> D,
    ) -> usize {
        let mut created = 0;
        for item in items {
            let id = id_of(item);
            if !self.drafts.contains_key(id) {
                self.drafts.insert(id.to_string(), make(item));
                created += 1;
            }
        }
        created
    }

    /// Drops drafts whose entity is not in `ids`. Returns how many were dropped.
    pub fn retain_present<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) -> usize {
        let present: HashSet<&str> = ids.into_iter().collect();
        let before = self.drafts.len();
        self.drafts.retain(|id, _| present.contains(id.as_str()));
        before - self.drafts.len()
    }

    /// The step run after a full list fetch: forget vanished entities, seed
    /// new ones, keep everything else untouched.
    pub fn sync<T>(&mut self, items: &[T], id_of: impl Fn(&T) -> &str, make: impl Fn(&T) -> D) {
        self.retain_present(items.iter().map(&id_of));
        self.seed(items, id_of, make);
    }

    pub fn get(&self, id: &str) -> Option<&D> {
        self.drafts.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut D> {
        self.drafts.get_mut(id)
    }

    /// Applies `f` to an existing draft. Returns false when there is none.
    pub fn update(&mut self, id: &str, f: impl FnOnce(&mut D)) -> bool {
        match self.drafts.get_mut(id) {
            Some(d) => {
                f(d);
                true
            }
            None => false,
        }
    }

    /// Replaces a draft with a fresh one built from server values.
    pub fn reset<T>(&mut self, id: &str, item: &T, make: impl Fn(&T) -> D) {
        self.drafts.insert(id.to_string(), make(item));
    }

    pub fn remove(&mut self, id: &str) -> Option<D> {
        self.drafts.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.drafts.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}

/// The one validation run locally: audited mutations need a reason.
pub fn require_reason(reason: &str) -> Result<String, ValidationError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(ValidationError::reason_required());
    }
    Ok(reason.to_string())
}

#[cfg(test)]
#[path = "tests/drafts_tests.rs"]
mod tests;
