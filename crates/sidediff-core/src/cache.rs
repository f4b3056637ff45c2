//! Memoization of the last rendered comparison

use crate::pane::SideBySide;

struct CacheEntry {
    old: String,
    new: String,
    panes: SideBySide,
}

/// Single-entry cache keyed on both input texts.
///
/// Panes are never patched incrementally: any change to either text
/// replaces the entry with a fresh computation.
#[derive(Default)]
pub struct PaneCache {
    entry: Option<CacheEntry>,
    hits: usize,
    misses: usize,
}

impl PaneCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached panes for `(old, new)`, computing them with
    /// `compute` when either text differs from the cached key
    pub fn get_or_compute<F>(&mut self, old: &str, new: &str, compute: F) -> &SideBySide
    where
        F: FnOnce(&str, &str) -> SideBySide,
    {
        let entry = match self.entry.take() {
            Some(entry) if entry.old == old && entry.new == new => {
                self.hits += 1;
                tracing::trace!(hits = self.hits, "pane cache hit");
                entry
            }
            _ => {
                self.misses += 1;
                tracing::debug!(
                    misses = self.misses,
                    old_len = old.len(),
                    new_len = new.len(),
                    "pane cache miss, rebuilding"
                );
                CacheEntry {
                    old: old.to_string(),
                    new: new.to_string(),
                    panes: compute(old, new),
                }
            }
        };
        &self.entry.insert(entry).panes
    }

    /// The most recently computed panes
    pub fn current(&self) -> Option<&SideBySide> {
        self.entry.as_ref().map(|entry| &entry.panes)
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}
