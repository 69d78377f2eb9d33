//! The copy/move register.
//!
//! Holds at most one pending paste source. Setting a copy source clears any
//! pending move source and vice versa; pasting both at once is undefined in
//! the UI contract, so exactly one operation can be pending at a time. A
//! successful paste clears the consumed slot; a failed paste leaves it
//! populated so the user can retry with another name or destination.

use std::path::{Path, PathBuf};

use crate::core::entry::Entry;
use crate::core::error::OpError;
use crate::core::fsops;

/// Which register slot a paste consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteKind {
    Copy,
    Move,
}

#[derive(Debug, Default)]
pub struct Register {
    copy_source: Option<Entry>,
    move_source: Option<Entry>,
}

impl Register {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn copy_source(&self) -> Option<&Entry> {
        self.copy_source.as_ref()
    }

    #[inline]
    pub fn move_source(&self) -> Option<&Entry> {
        self.move_source.as_ref()
    }

    /// The kind of paste currently pending, if any.
    pub fn pending(&self) -> Option<PasteKind> {
        if self.copy_source.is_some() {
            Some(PasteKind::Copy)
        } else if self.move_source.is_some() {
            Some(PasteKind::Move)
        } else {
            None
        }
    }

    /// Marks the path a pending paste would consume, for highlighting.
    pub fn marked_path(&self) -> Option<&Path> {
        self.copy_source
            .as_ref()
            .or(self.move_source.as_ref())
            .map(|e| e.path())
    }

    pub fn set_copy_source(&mut self, entry: Entry) {
        self.move_source = None;
        self.copy_source = Some(entry);
    }

    pub fn set_move_source(&mut self, entry: Entry) {
        self.copy_source = None;
        self.move_source = Some(entry);
    }

    pub fn clear(&mut self) {
        self.copy_source = None;
        self.move_source = None;
    }

    /// Pastes the pending source as `dest_dir/new_name`.
    ///
    /// Copy is a recursive copy; move is a rename. Both fail with a name
    /// conflict when the destination exists. Returns `Ok(None)` when no
    /// source is pending.
    pub fn paste(
        &mut self,
        dest_dir: &Path,
        new_name: &str,
    ) -> Result<Option<PasteKind>, OpError> {
        let Some(kind) = self.pending() else {
            return Ok(None);
        };
        if new_name.is_empty() {
            return Err(OpError::EmptyName);
        }

        let target: PathBuf = dest_dir.join(new_name);
        match kind {
            PasteKind::Copy => {
                let source = self.copy_source.as_ref().map(|e| e.path().to_path_buf());
                if let Some(src) = source {
                    fsops::copy_any(&src, &target)?;
                    self.copy_source = None;
                }
            }
            PasteKind::Move => {
                let source = self.move_source.as_ref().map(|e| e.path().to_path_buf());
                if let Some(src) = source {
                    fsops::rename(&src, &target)?;
                    self.move_source = None;
                }
            }
        }
        Ok(Some(kind))
    }
}
