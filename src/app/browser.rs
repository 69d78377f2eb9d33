//! The interchangeable presentation-mode browsers.
//!
//! [FileBrowser] is the single capability interface the view controller is
//! written against; [TableBrowser] and [TreeBrowser] are its two variants
//! and [make_browser] selects one from configuration at construction time.
//! Both reconcile a fresh [DirSnapshot] with the per-path selection memory
//! so a rebuild never leaves the cursor out of range.

use std::path::{Path, PathBuf};

use crate::app::memory::{Cursor, SelectionMemory};
use crate::app::tree::{self, ExpansionSet, TreeNode};
use crate::core::entry::Entry;
use crate::core::scan::DirSnapshot;

/// Which presentation variant is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserMode {
    Table,
    Tree,
}

/// One renderable row handed to the presentation layer.
pub struct BrowserRow<'a> {
    pub depth: usize,
    pub entry: &'a Entry,
    pub expanded: bool,
}

/// Scan parameters the tree needs when it re-fetches expanded children.
#[derive(Debug, Clone, Copy)]
pub struct ScanParams {
    pub ignore_case: bool,
    pub show_hidden: bool,
}

/// The capability interface shared by both presentation modes.
pub trait FileBrowser {
    fn mode(&self) -> BrowserMode;

    /// Rebuilds the visible rows from a fresh snapshot. Re-syncing the
    /// directory already on screen keeps the live cursor (clamped against
    /// the new row count); entering a different directory restores the
    /// cursor from `memory`.
    fn sync(
        &mut self,
        snapshot: &DirSnapshot,
        memory: &SelectionMemory,
        expansions: &mut ExpansionSet,
        params: ScanParams,
    );

    fn move_up(&mut self);
    fn move_down(&mut self);

    /// The entry under the cursor, if any.
    fn selected(&self) -> Option<&Entry>;

    /// Cursor row in visible-row terms (table: includes the header row).
    fn cursor_row(&self) -> usize;

    fn visible_len(&self) -> usize;

    /// Saves the current cursor into the selection memory under `dir`,
    /// called when a directory is left.
    fn remember(&self, memory: &mut SelectionMemory, dir: &Path);

    /// Resets the cursor after the visible set changed meaning (filter
    /// edits). The table falls back to the default row; the tree keeps the
    /// focused node when it still matches.
    fn on_filter_changed(&mut self);

    /// Flips the expansion state of the selected directory. Returns true
    /// when the set changed and the view needs a rebuild. A no-op in table
    /// mode.
    fn toggle_expand(&mut self, expansions: &mut ExpansionSet) -> bool;

    /// Renderable rows in display order.
    fn rows(&self) -> Vec<BrowserRow<'_>>;
}

/// Selects the browser variant for the configured mode.
pub fn make_browser(mode: BrowserMode) -> Box<dyn FileBrowser> {
    match mode {
        BrowserMode::Table => Box::new(TableBrowser::new()),
        BrowserMode::Tree => Box::new(TreeBrowser::new()),
    }
}

// ---------------------------------------------------------------------------
// Table mode

/// Flat table over the current snapshot. Row 0 is the header; the cursor
/// lives in 1..=len.
pub struct TableBrowser {
    entries: Vec<Entry>,
    path: Option<PathBuf>,
    row: usize,
    col: usize,
}

impl TableBrowser {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            path: None,
            row: 1,
            col: 0,
        }
    }
}

impl Default for TableBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl FileBrowser for TableBrowser {
    fn mode(&self) -> BrowserMode {
        BrowserMode::Table
    }

    fn sync(
        &mut self,
        snapshot: &DirSnapshot,
        memory: &SelectionMemory,
        _expansions: &mut ExpansionSet,
        _params: ScanParams,
    ) {
        self.entries = snapshot.entries().to_vec();
        if self.path.as_deref() == Some(snapshot.path()) {
            // Re-sync of the directory already on screen (a refresh tick):
            // the live cursor stands, only clamped against the new length.
            self.row = if self.entries.is_empty() {
                1
            } else {
                self.row.clamp(1, self.entries.len())
            };
        } else {
            let (row, col) = memory.restore_table(snapshot.path(), self.entries.len());
            self.row = row;
            self.col = col;
            self.path = Some(snapshot.path().to_path_buf());
        }
    }

    fn move_up(&mut self) {
        if self.row > 1 {
            self.row -= 1;
        }
    }

    fn move_down(&mut self) {
        if self.row < self.entries.len() {
            self.row += 1;
        }
    }

    fn selected(&self) -> Option<&Entry> {
        if self.entries.is_empty() || self.row == 0 {
            return None;
        }
        self.entries.get(self.row - 1)
    }

    fn cursor_row(&self) -> usize {
        self.row
    }

    fn visible_len(&self) -> usize {
        self.entries.len()
    }

    fn remember(&self, memory: &mut SelectionMemory, dir: &Path) {
        memory.remember(
            dir,
            Cursor::Table {
                row: self.row,
                col: self.col,
            },
        );
    }

    fn on_filter_changed(&mut self) {
        // A remembered numeric row is meaningless once the visible set
        // changed, so fall back to the default.
        self.row = 1;
        self.col = 0;
    }

    fn toggle_expand(&mut self, _expansions: &mut ExpansionSet) -> bool {
        false
    }

    fn rows(&self) -> Vec<BrowserRow<'_>> {
        self.entries
            .iter()
            .map(|entry| BrowserRow {
                depth: 0,
                entry,
                expanded: false,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tree mode

/// Expandable tree rooted at the current directory. Selection identity is
/// the focused node's absolute path, never an index.
pub struct TreeBrowser {
    nodes: Vec<TreeNode>,
    root: Option<PathBuf>,
    focused: Option<PathBuf>,
    idx: usize,
}

impl TreeBrowser {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            focused: None,
            idx: 0,
        }
    }

    fn flat_len(&self) -> usize {
        let mut rows = Vec::new();
        tree::flatten(&self.nodes, 0, &mut rows);
        rows.len()
    }

    fn path_at(&self, idx: usize) -> Option<PathBuf> {
        let mut rows = Vec::new();
        tree::flatten(&self.nodes, 0, &mut rows);
        rows.get(idx).map(|r| r.node.entry().path().to_path_buf())
    }

    /// Position of `path` in the flattened rows. The rebuilt tree is walked
    /// by path equality on every refresh; correctness over
    /// micro-optimization.
    fn position_of(&self, path: &Path) -> Option<usize> {
        let mut rows = Vec::new();
        tree::flatten(&self.nodes, 0, &mut rows);
        rows.iter().position(|r| r.node.entry().path() == path)
    }

    fn refocus(&mut self) {
        self.focused = self.path_at(self.idx);
    }
}

impl Default for TreeBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl FileBrowser for TreeBrowser {
    fn mode(&self) -> BrowserMode {
        BrowserMode::Tree
    }

    fn sync(
        &mut self,
        snapshot: &DirSnapshot,
        memory: &SelectionMemory,
        expansions: &mut ExpansionSet,
        params: ScanParams,
    ) {
        self.nodes = tree::assemble_from_snapshot(
            snapshot,
            params.ignore_case,
            params.show_hidden,
            expansions,
        );

        // A focus carried over from another directory must not shadow the
        // memory for this one.
        if self.root.as_deref() != Some(snapshot.path()) {
            self.root = Some(snapshot.path().to_path_buf());
            self.focused = None;
        }

        // Prefer the focus the browser already had, then the remembered
        // focus for this path, then the first child of the root.
        let remembered = self
            .focused
            .clone()
            .or_else(|| memory.restore_tree(snapshot.path()).map(Path::to_path_buf));

        self.idx = remembered
            .as_deref()
            .and_then(|p| self.position_of(p))
            .unwrap_or(0);
        self.refocus();
    }

    fn move_up(&mut self) {
        if self.idx > 0 {
            self.idx -= 1;
            self.refocus();
        }
    }

    fn move_down(&mut self) {
        if self.idx + 1 < self.flat_len() {
            self.idx += 1;
            self.refocus();
        }
    }

    fn selected(&self) -> Option<&Entry> {
        let mut rows = Vec::new();
        tree::flatten(&self.nodes, 0, &mut rows);
        rows.get(self.idx).map(|r| r.node.entry())
    }

    fn cursor_row(&self) -> usize {
        self.idx
    }

    fn visible_len(&self) -> usize {
        self.flat_len()
    }

    fn remember(&self, memory: &mut SelectionMemory, dir: &Path) {
        if let Some(focused) = &self.focused {
            memory.remember(
                dir,
                Cursor::Tree {
                    focused: focused.clone(),
                },
            );
        }
    }

    fn on_filter_changed(&mut self) {
        // Keep the focused node; sync() re-matches it by path and falls
        // back to the first row when it no longer passes the filter.
    }

    fn toggle_expand(&mut self, expansions: &mut ExpansionSet) -> bool {
        let Some(entry) = self.selected() else {
            return false;
        };
        if !entry.is_dir() {
            return false;
        }
        let path = entry.path().to_path_buf();
        if expansions.contains(&path) {
            expansions.remove(&path);
        } else {
            expansions.insert(&path);
        }
        true
    }

    fn rows(&self) -> Vec<BrowserRow<'_>> {
        let mut rows = Vec::new();
        tree::flatten(&self.nodes, 0, &mut rows);
        rows.into_iter()
            .map(|r| BrowserRow {
                depth: r.depth,
                entry: r.node.entry(),
                expanded: r.node.expanded(),
            })
            .collect()
    }
}
