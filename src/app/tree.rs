//! Tree-mode expansion state and tree assembly.
//!
//! The [ExpansionSet] records which directories the user keeps expanded,
//! keyed by absolute path. On every rebuild the assembly re-fetches a fresh
//! snapshot per expanded directory and recurses, so multi-level expansion
//! survives any refresh. A node carries its backing [Entry] as a plain typed
//! field, set at construction.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::core::entry::Entry;
use crate::core::error::ScanError;
use crate::core::scan::scan;

/// Set of absolute directory paths currently expanded.
#[derive(Debug, Default)]
pub struct ExpansionSet {
    paths: HashSet<PathBuf>,
}

impl ExpansionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &Path) {
        self.paths.insert(path.to_path_buf());
    }

    pub fn remove(&mut self, path: &Path) {
        self.paths.remove(path);
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    /// Drops `path` and every descendant, used when the underlying
    /// directory is deleted. An orphaned expansion entry must never survive
    /// to the next rebuild.
    pub fn purge_subtree(&mut self, path: &Path) {
        self.paths.retain(|p| !p.starts_with(path));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// One node of the assembled tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    entry: Entry,
    children: Vec<TreeNode>,
    expanded: bool,
}

impl TreeNode {
    #[inline]
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    #[inline]
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    #[inline]
    pub fn expanded(&self) -> bool {
        self.expanded
    }
}

/// A flattened view row: a node plus its indentation depth.
#[derive(Debug, Clone, Copy)]
pub struct FlatNode<'a> {
    pub depth: usize,
    pub node: &'a TreeNode,
}

/// Scans `path` and builds one child node per visible entry, recursing
/// immediately into every child directory present in `expansions`.
///
/// A child that can no longer be scanned (deleted or unreadable since it was
/// expanded) is dropped from the expansion set and shown collapsed; the
/// failure never propagates past that subtree.
pub fn assemble_children(
    path: &Path,
    filter: &str,
    ignore_case: bool,
    show_hidden: bool,
    expansions: &mut ExpansionSet,
) -> Result<Vec<TreeNode>, ScanError> {
    let snapshot = scan(path, filter, ignore_case, show_hidden)?;

    let mut nodes = Vec::with_capacity(snapshot.len());
    for entry in snapshot.entries() {
        nodes.push(build_node(entry, ignore_case, show_hidden, expansions));
    }
    Ok(nodes)
}

/// Builds one node, recursing into its children when it is an expanded
/// directory. A stale expansion entry, whether the child can no longer be
/// scanned or is no longer a directory at all, is dropped from the set and
/// the node shown collapsed.
fn build_node(
    entry: &Entry,
    ignore_case: bool,
    show_hidden: bool,
    expansions: &mut ExpansionSet,
) -> TreeNode {
    let mut children = Vec::new();
    let mut expanded = false;

    if expansions.contains(entry.path()) {
        if entry.is_dir() {
            match assemble_children(entry.path(), "", ignore_case, show_hidden, expansions) {
                Ok(ch) => {
                    children = ch;
                    expanded = true;
                }
                Err(_) => {
                    expansions.remove(entry.path());
                }
            }
        } else {
            // e.g. a deleted directory recreated as a same-named file
            expansions.remove(entry.path());
        }
    }

    TreeNode {
        entry: entry.clone(),
        children,
        expanded,
    }
}

/// Builds the top level from an already-taken snapshot instead of scanning
/// the root a second time; expanded child directories are still re-fetched
/// recursively.
pub fn assemble_from_snapshot(
    snapshot: &crate::core::scan::DirSnapshot,
    ignore_case: bool,
    show_hidden: bool,
    expansions: &mut ExpansionSet,
) -> Vec<TreeNode> {
    let mut nodes = Vec::with_capacity(snapshot.len());
    for entry in snapshot.entries() {
        nodes.push(build_node(entry, ignore_case, show_hidden, expansions));
    }
    nodes
}

/// Depth-first flattening of the assembled tree into renderable rows.
pub fn flatten<'a>(nodes: &'a [TreeNode], depth: usize, out: &mut Vec<FlatNode<'a>>) {
    for node in nodes {
        out.push(FlatNode { depth, node });
        if node.expanded {
            flatten(&node.children, depth + 1, out);
        }
    }
}
