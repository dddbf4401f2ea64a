//! Loading flags for in-flight remote mutations, keyed per action.

use std::cell::RefCell;
use std::collections::BTreeSet;

/// Identifies one action on one entity, rendered as `action:scope:id`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ActionKey {
    pub action: String,
    pub scope: String,
    pub id: String,
}

impl ActionKey {
    pub fn new(action: &str, scope: &str, id: &str) -> Self {
        Self {
            action: action.to_string(),
            scope: scope.to_string(),
            id: id.to_string(),
        }
    }

    pub fn business(action: &str, business_id: &str) -> Self {
        Self::new(action, "business", business_id)
    }
}

impl std::fmt::Display for ActionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.action, self.scope, self.id)
    }
}

/// Tracks which keyed actions are running.
///
/// Everything runs on the UI thread, so the set lives in a `RefCell` and
/// the tracker is shared by reference. Calls with different keys never
/// affect each other; a second call with the same key is not queued and
/// clears the flag when it finishes.
#[derive(Debug, Default)]
pub struct ActionTracker {
    loading: RefCell<BTreeSet<String>>,
}

struct LoadingGuard<'a> {
    loading: &'a RefCell<BTreeSet<String>>,
    key: String,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.loading.borrow_mut().remove(&self.key);
    }
}

impl ActionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `task` with `key` marked as loading. The flag is cleared on
    /// every exit path, including errors and panics.
    pub fn with_action<T, E>(
        &self,
        key: &ActionKey,
        task: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        let key = key.to_string();
        tracing::debug!(action = %key, "action started");
        self.loading.borrow_mut().insert(key.clone());
        let guard = LoadingGuard {
            loading: &self.loading,
            key,
        };
        let out = task();
        if out.is_err() {
            tracing::debug!(action = %guard.key, "action failed");
        }
        drop(guard);
        out
    }

    pub fn is_loading(&self, key: &ActionKey) -> bool {
        self.loading.borrow().contains(&key.to_string())
    }

    /// Whether any action of this kind is running, for list-wide spinners.
    pub fn is_action_loading(&self, action: &str) -> bool {
        let prefix = format!("{}:", action);
        self.loading
            .borrow()
            .iter()
            .any(|k| k.starts_with(&prefix))
    }

    pub fn in_flight(&self) -> Vec<String> {
        self.loading.borrow().iter().cloned().collect()
    }

    pub fn is_idle(&self) -> bool {
        self.loading.borrow().is_empty()
    }
}

#[cfg(test)]
#[path = "tests/actions_tests.rs"]
mod tests;
