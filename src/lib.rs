//! Internal library crate for faro.
//!
//! The shipped application is the `faro` binary (`src/main.rs`).
//!
//! This library exists to share code between targets (binary, tests) and to
//! keep modules organized; it is not a library for external use.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;
pub mod utils;
