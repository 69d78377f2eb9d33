//! Back/forward navigation history.
//!
//! A linear sequence of visited paths with a current index. Writing while
//! the index sits before the end truncates the "future" entries first, like
//! branching edit history. Stepping past either boundary is a no-op that
//! returns the boundary entry again.

use std::path::{Path, PathBuf};

/// One visited path plus the cursor row it was left at.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    path: PathBuf,
    row: usize,
}

impl HistoryEntry {
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }
}

/// The history navigator.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    entries: Vec<HistoryEntry>,
    idx: usize,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records a new visit. When the index is mid-sequence, everything after
    /// it is discarded before appending.
    pub fn save(&mut self, row: usize, path: PathBuf) {
        let entry = HistoryEntry { path, row };

        if self.entries.is_empty() {
            self.entries.push(entry);
            self.idx = 0;
            return;
        }

        if self.idx < self.entries.len() - 1 {
            self.entries.truncate(self.idx + 1);
        }
        self.entries.push(entry);
        self.idx = self.entries.len() - 1;
    }

    /// Rewrites the cursor row on the current entry. Called just before the
    /// index moves away so the entry carries the row its directory was left
    /// at, not the row it was entered at.
    pub fn update_current_row(&mut self, row: usize) {
        if let Some(entry) = self.entries.get_mut(self.idx) {
            entry.row = row;
        }
    }

    /// Steps back one entry, clamped at the start.
    pub fn previous(&mut self) -> Option<&HistoryEntry> {
        if self.entries.is_empty() {
            return None;
        }
        self.idx = self.idx.saturating_sub(1);
        self.entries.get(self.idx)
    }

    /// Steps forward one entry, clamped at the end.
    pub fn next(&mut self) -> Option<&HistoryEntry> {
        if self.entries.is_empty() {
            return None;
        }
        if self.idx + 1 < self.entries.len() {
            self.idx += 1;
        }
        self.entries.get(self.idx)
    }

    #[cfg(test)]
    fn paths(&self) -> Vec<&Path> {
        self.entries.iter().map(|e| e.path()).collect()
    }
}
