//! Per-path selection memory.
//!
//! Remembers where the cursor was the last time a directory was left, so
//! returning to it restores the position. Table mode remembers a (row, col)
//! pair; tree mode remembers the focused node by its absolute path, because
//! numeric indices are meaningless once children are re-fetched. Entries are
//! overwritten on every departure and never pruned; the map is bounded by
//! the paths visited in one session.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Cursor descriptor remembered for one path.
#[derive(Debug, Clone, PartialEq)]
pub enum Cursor {
    /// Table-mode position. Row 0 is the header and is never selectable.
    Table { row: usize, col: usize },
    /// Tree-mode focus, by the focused child's absolute path.
    Tree { focused: PathBuf },
}

/// Default table cursor: the first selectable row under the header.
pub const DEFAULT_TABLE_CURSOR: (usize, usize) = (1, 0);

#[derive(Debug, Default)]
pub struct SelectionMemory {
    cursors: HashMap<PathBuf, Cursor>,
}

impl SelectionMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembers the cursor for `path`, replacing any prior memory.
    pub fn remember(&mut self, path: &Path, cursor: Cursor) {
        self.cursors.insert(path.to_path_buf(), cursor);
    }

    /// Restores the table cursor for `path`, clamped against the current
    /// entry count: a remembered row beyond the new bottom lands on the last
    /// valid row instead of erroring. `entry_count` excludes the header row.
    pub fn restore_table(&self, path: &Path, entry_count: usize) -> (usize, usize) {
        let (row, col) = match self.cursors.get(path) {
            Some(Cursor::Table { row, col }) => (*row, *col),
            _ => DEFAULT_TABLE_CURSOR,
        };

        if entry_count == 0 {
            return (DEFAULT_TABLE_CURSOR.0, col);
        }
        (row.clamp(1, entry_count), col)
    }

    /// Restores the tree focus for `path`, if one was remembered. The
    /// default of "first child of root, if any" is the browser's concern,
    /// since only it knows the rebuilt node list.
    pub fn restore_tree(&self, path: &Path) -> Option<&Path> {
        match self.cursors.get(path) {
            Some(Cursor::Tree { focused }) => Some(focused.as_path()),
            _ => None,
        }
    }

    /// Drops every memory rooted at `path`, used when the underlying
    /// directory is deleted.
    pub fn purge_subtree(&mut self, path: &Path) {
        self.cursors.retain(|p, _| !p.starts_with(path));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }
}
