//! The directory scanner for faro.
//!
//! [scan] reads the direct children of one directory and produces a
//! [DirSnapshot]: an immutable, ordered record of what was visible there for
//! a given filter at one point in time. Snapshots are never diffed, only
//! replaced wholesale by the next scan of the same path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::entry::Entry;
use crate::core::error::ScanError;

/// One scan result: the path it was taken for, the filter that was applied,
/// and the retained entries in directory-listing order (no implicit sort).
#[derive(Debug, Clone)]
pub struct DirSnapshot {
    path: PathBuf,
    filter: String,
    entries: Vec<Entry>,
}

impl DirSnapshot {
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reads the direct children of `path`, applying the substring filter and the
/// hidden-entry policy.
///
/// An entry is retained iff `filter` is a substring of its name (case-folded
/// when `ignore_case` is set; an empty filter retains everything). Entries
/// whose metadata cannot be read are skipped, the scan continues; only a
/// whole-directory failure becomes a [ScanError], and the caller keeps the
/// prior snapshot on screen in that case.
pub fn scan(
    path: &Path,
    filter: &str,
    ignore_case: bool,
    show_hidden: bool,
) -> Result<DirSnapshot, ScanError> {
    let read_dir = fs::read_dir(path).map_err(|e| ScanError::new(path.to_path_buf(), e))?;

    let folded_filter = if ignore_case {
        filter.to_lowercase()
    } else {
        filter.to_string()
    };

    let mut entries = Vec::with_capacity(64);
    for item in read_dir {
        let item = match item {
            Ok(i) => i,
            Err(_) => continue,
        };
        let name = item.file_name();

        if !show_hidden && is_hidden(&item) {
            continue;
        }

        if !folded_filter.is_empty() {
            let name_str = name.to_string_lossy();
            let matched = if ignore_case {
                name_str.to_lowercase().contains(&folded_filter)
            } else {
                name_str.contains(folded_filter.as_str())
            };
            if !matched {
                continue;
            }
        }

        let md = match item.metadata() {
            Ok(md) => md,
            Err(_) => continue,
        };

        if let Some(entry) = Entry::from_metadata(path, name, &md) {
            entries.push(entry);
        }
    }

    Ok(DirSnapshot {
        path: path.to_path_buf(),
        filter: filter.to_string(),
        entries,
    })
}

/// Platform hidden-entry convention: a leading dot on unix, the hidden
/// attribute on windows.
#[cfg(unix)]
fn is_hidden(item: &fs::DirEntry) -> bool {
    use std::os::unix::ffi::OsStrExt;
    item.file_name().as_bytes().first() == Some(&b'.')
}

#[cfg(windows)]
fn is_hidden(item: &fs::DirEntry) -> bool {
    use std::os::windows::fs::MetadataExt;
    item.metadata()
        .map(|md| md.file_attributes() & 0x2 != 0)
        .unwrap_or(false)
}

#[cfg(not(any(unix, windows)))]
fn is_hidden(_item: &fs::DirEntry) -> bool {
    false
}
