//! Core engine pieces for faro.
//!
//! Everything below is UI-free:
//! - [entry]: the per-file metadata model (see [Entry]).
//! - [scan]: directory scanning into a [DirSnapshot].
//! - [fsops]: create/rename/remove/copy primitives.
//! - [format]: display formatting for sizes, times and permissions.
//! - [refresh]: the background refresh timer.
//! - [terminal]: terminal setup/teardown and the crossterm/ratatui event loop.
//! - [error]: the scan and file-operation error types.

pub mod entry;
pub mod error;
pub mod format;
pub mod fsops;
pub mod refresh;
pub mod scan;
pub mod terminal;

pub use entry::Entry;
pub use error::{OpError, ScanError};
pub use format::{clip_to_width, format_entry_size, format_entry_time, format_permissions};
pub use refresh::RefreshScheduler;
pub use scan::{DirSnapshot, scan};
