//! Operator-local pins and support notes.
//!
//! Hydrated once when the console starts and flushed on every change. The
//! values are plain JSON with no version field.

use std::collections::BTreeMap;

use anyhow::{Context, Result};

use super::KeyValueStore;

pub const PINNED_KEY: &str = "nvi.platformPinnedBusinesses";
pub const SUPPORT_NOTES_KEY: &str = "nvi.platformSupportNotes";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PinnedBusinesses {
    ids: Vec<String>,
}

impl PinnedBusinesses {
    pub fn hydrate(kv: &dyn KeyValueStore) -> Self {
        let ids = kv
            .get(PINNED_KEY)
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
            .unwrap_or_default();
        Self { ids }
    }

    /// Writes `ids` first and adopts them only once the store accepted them.
    fn commit(&mut self, ids: Vec<String>, kv: &mut dyn KeyValueStore) -> Result<()> {
        let raw = serde_json::to_string(&ids).context("serialize pinned businesses")?;
        kv.set(PINNED_KEY, &raw)?;
        self.ids = ids;
        Ok(())
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|p| p == id)
    }

    /// Most recently pinned first.
    pub fn pin(&mut self, id: &str, kv: &mut dyn KeyValueStore) -> Result<bool> {
        if self.contains(id) {
            return Ok(false);
        }
        let mut ids = Vec::with_capacity(self.ids.len() + 1);
        ids.push(id.to_string());
        ids.extend(self.ids.iter().cloned());
        self.commit(ids, kv)?;
        Ok(true)
    }

    pub fn unpin(&mut self, id: &str, kv: &mut dyn KeyValueStore) -> Result<bool> {
        if !self.contains(id) {
            return Ok(false);
        }
        let ids = self.ids.iter().filter(|p| *p != id).cloned().collect();
        self.commit(ids, kv)?;
        Ok(true)
    }

    /// Returns the new pinned state.
    pub fn toggle(&mut self, id: &str, kv: &mut dyn KeyValueStore) -> Result<bool> {
        if self.contains(id) {
            self.unpin(id, kv)?;
            Ok(false)
        } else {
            self.pin(id, kv)?;
            Ok(true)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SupportNotes {
    notes: BTreeMap<String, String>,
}

impl SupportNotes {
    pub fn hydrate(kv: &dyn KeyValueStore) -> Self {
        let notes = kv
            .get(SUPPORT_NOTES_KEY)
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str::<BTreeMap<String, String>>(&raw).ok())
            .unwrap_or_default();
        Self { notes }
    }

    fn commit(&mut self, notes: BTreeMap<String, String>, kv: &mut dyn KeyValueStore) -> Result<()> {
        let raw = serde_json::to_string(&notes).context("serialize support notes")?;
        kv.set(SUPPORT_NOTES_KEY, &raw)?;
        self.notes = notes;
        Ok(())
    }

    pub fn get(&self, business_id: &str) -> Option<&str> {
        self.notes.get(business_id).map(String::as_str)
    }

    /// An empty note removes the entry.
    pub fn set(&mut self, business_id: &str, note: &str, kv: &mut dyn KeyValueStore) -> Result<()> {
        let note = note.trim();
        let mut notes = self.notes.clone();
        if note.is_empty() {
            notes.remove(business_id);
        } else {
            notes.insert(business_id.to_string(), note.to_string());
        }
        self.commit(notes, kv)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.notes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
