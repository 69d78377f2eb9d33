//! Terminal UI for faro.
//!
//! - [render]: the top-level frame renderer used by the event loop.
//! - [table]: the flat table pane (metadata columns, header row).
//! - [tree]: the expandable tree pane.
//! - [overlays]: prompt, confirmation and error dialogs drawn above the pane.
//!
//! These modules read the application state and produce widgets; they own no
//! browsing logic.

pub mod overlays;
pub mod render;
pub mod table;
pub mod tree;

pub use render::render;
