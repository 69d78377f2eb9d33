//! Application layer: navigation and view state.
//!
//! - [state]: the [AppState] facade the event loop talks to.
//! - [browser]: the [FileBrowser] trait and its table/tree variants.
//! - [history]: back/forward navigation over visited paths.
//! - [memory]: per-path selection memory.
//! - [register]: the single-slot copy/move register.
//! - [tree]: expansion set and tree assembly.

pub mod browser;
pub mod history;
pub mod memory;
pub mod register;
pub mod state;
pub mod tree;

pub use browser::{BrowserMode, BrowserRow, FileBrowser, make_browser};
pub use state::{ActionMode, AppState, KeypressResult};
