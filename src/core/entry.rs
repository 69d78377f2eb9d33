//! The entry model for faro.
//!
//! [Entry] is one filesystem object as observed by a single scan. Entries are
//! immutable snapshots: a new scan produces entirely new values, nothing is
//! mutated in place except the `visible` flag the presentation layer may
//! clear. Identity is the absolute path, which by construction always equals
//! `parent.join(name)`.

use std::ffi::{OsStr, OsString};
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::core::format::format_permissions;

/// A single file or directory record produced by the scanner.
#[derive(Debug, Clone)]
pub struct Entry {
    name: OsString,
    path: PathBuf,
    parent: PathBuf,
    size: u64,
    is_dir: bool,
    permission: String,
    owner: String,
    group: String,
    accessed: SystemTime,
    modified: SystemTime,
    created: Option<SystemTime>,
    visible: bool,
}

impl Entry {
    /// Builds an entry from a directory listing item and its metadata.
    ///
    /// Returns `None` when the access or modify time cannot be read, which
    /// happens when the file is racing an external deletion; the scanner
    /// skips such entries and continues.
    pub fn from_metadata(parent: &Path, name: OsString, md: &Metadata) -> Option<Self> {
        let accessed = md.accessed().ok()?;
        let modified = md.modified().ok()?;
        // Birth time is absent on filesystems without support; never guessed.
        let created = md.created().ok();

        let (owner, group) = owner_group(md);

        Some(Entry {
            path: parent.join(&name),
            parent: parent.to_path_buf(),
            size: md.len(),
            is_dir: md.is_dir(),
            permission: format_permissions(md),
            owner,
            group,
            accessed,
            modified,
            created,
            visible: true,
            name,
        })
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn name_str(&self) -> std::borrow::Cow<'_, str> {
        self.name.to_string_lossy()
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn parent(&self) -> &Path {
        &self.parent
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    #[inline]
    pub fn permission(&self) -> &str {
        &self.permission
    }

    #[inline]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[inline]
    pub fn group(&self) -> &str {
        &self.group
    }

    #[inline]
    pub fn accessed(&self) -> SystemTime {
        self.accessed
    }

    #[inline]
    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    #[inline]
    pub fn created(&self) -> Option<SystemTime> {
        self.created
    }

    #[inline]
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Entry {}

/// Owner and group display names. Numeric fallback when the id has no
/// matching account, as an id can outlive its passwd entry.
#[cfg(unix)]
fn owner_group(md: &Metadata) -> (String, String) {
    use std::os::unix::fs::MetadataExt;
    use uzers::{get_group_by_gid, get_user_by_uid};

    let uid = md.uid();
    let gid = md.gid();

    let owner = get_user_by_uid(uid)
        .map(|u| u.name().to_string_lossy().into_owned())
        .unwrap_or_else(|| uid.to_string());
    let group = get_group_by_gid(gid)
        .map(|g| g.name().to_string_lossy().into_owned())
        .unwrap_or_else(|| gid.to_string());

    (owner, group)
}

#[cfg(not(unix))]
fn owner_group(_md: &Metadata) -> (String, String) {
    (String::new(), String::new())
}
