//! Selection state.
//!
//! The engine owns which node ids are selected; the host mirrors it for
//! rendering via [`SelectionManager::ids`] and is notified of changes
//! through [`crate::events::CanvasEvent::SelectionChange`]. When the host
//! deletes nodes it calls [`SelectionManager::retain_existing`] to drop
//! their ids.

use std::collections::HashSet;

/// Tracks the set of selected node ids.
#[derive(Debug, Default, Clone)]
pub struct SelectionManager {
    selected: HashSet<String>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a click on `node_id`.
    ///
    /// Plain click selects exactly that node; shift-click toggles its
    /// membership while leaving the rest of the selection alone. Returns
    /// `true` if the selection changed.
    pub fn handle_interaction(&mut self, node_id: &str, shift: bool) -> bool {
        if shift {
            if !self.selected.remove(node_id) {
                self.selected.insert(node_id.to_string());
            }
            true
        } else {
            self.replace_selection(std::iter::once(node_id.to_string()))
        }
    }

    /// Replace the whole selection. Returns `true` if it changed.
    pub fn replace_selection(&mut self, ids: impl IntoIterator<Item = String>) -> bool {
        let next: HashSet<String> = ids.into_iter().collect();
        if next == self.selected {
            return false;
        }
        self.selected = next;
        true
    }

    /// Add `ids` to the current selection. Returns `true` if it changed.
    pub fn extend(&mut self, ids: impl IntoIterator<Item = String>) -> bool {
        let mut changed = false;
        for id in ids {
            changed |= self.selected.insert(id);
        }
        changed
    }

    /// Empty the selection. Returns `true` if it was non-empty.
    pub fn clear(&mut self) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        self.selected.clear();
        true
    }

    /// Drop ids not present in `existing` (nodes deleted externally).
    /// Returns `true` if anything was pruned.
    pub fn retain_existing(&mut self, existing: &HashSet<&str>) -> bool {
        let before = self.selected.len();
        self.selected.retain(|id| existing.contains(id.as_str()));
        self.selected.len() != before
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.selected.contains(node_id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// Snapshot of the selected ids, sorted for deterministic output.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }
}
