//! Backing storage for registered style text.

use indexmap::IndexMap;

use crate::config::StoreMode;

/// Registered style text, in one of the two storage profiles.
#[derive(Debug, Clone)]
pub(crate) enum StyleStore {
    /// One entry per id, kept in first-insertion order.
    Addressable(IndexMap<String, String>),
    /// Every registration in append order, duplicates included.
    AppendOnly(Vec<(String, String)>),
}

impl StyleStore {
    pub(crate) fn new(mode: StoreMode) -> Self {
        match mode {
            StoreMode::Addressable => StyleStore::Addressable(IndexMap::new()),
            StoreMode::AppendOnly => StyleStore::AppendOnly(Vec::new()),
        }
    }

    pub(crate) fn insert(&mut self, id: String, text: String) {
        match self {
            StyleStore::Addressable(map) => {
                map.insert(id, text);
            }
            StyleStore::AppendOnly(list) => list.push((id, text)),
        }
    }

    /// Removes the entry for `id`. Append-only stores are not addressable and
    /// never remove anything.
    pub(crate) fn remove(&mut self, id: &str) -> Option<String> {
        match self {
            StyleStore::Addressable(map) => map.shift_remove(id),
            StyleStore::AppendOnly(_) => None,
        }
    }

    /// Empties the store, returning the ids that were held.
    pub(crate) fn clear(&mut self) -> Vec<String> {
        match self {
            StyleStore::Addressable(map) => map.drain(..).map(|(id, _)| id).collect(),
            StyleStore::AppendOnly(list) => list.drain(..).map(|(id, _)| id).collect(),
        }
    }

    /// Looks up the text for `id`; for append-only stores, the latest registration.
    pub(crate) fn get(&self, id: &str) -> Option<&str> {
        match self {
            StyleStore::Addressable(map) => map.get(id).map(String::as_str),
            StyleStore::AppendOnly(list) => list
                .iter()
                .rev()
                .find(|(entry_id, _)| entry_id == id)
                .map(|(_, text)| text.as_str()),
        }
    }

    pub(crate) fn ids(&self) -> Vec<String> {
        match self {
            StyleStore::Addressable(map) => map.keys().cloned().collect(),
            StyleStore::AppendOnly(list) => list.iter().map(|(id, _)| id.clone()).collect(),
        }
    }

    /// All stored text joined with single spaces, in storage order.
    pub(crate) fn joined(&self) -> String {
        let texts: Vec<&str> = match self {
            StyleStore::Addressable(map) => map.values().map(String::as_str).collect(),
            StyleStore::AppendOnly(list) => list.iter().map(|(_, text)| text.as_str()).collect(),
        };
        texts.join(" ")
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            StyleStore::Addressable(map) => map.len(),
            StyleStore::AppendOnly(list) => list.len(),
        }
    }
}
