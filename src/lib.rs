// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorKey)
    clippy::module_name_repetitions
)]

//! # Caretpad
//!
//! A minimal plain-text editor for the terminal.
//!
//! The editing core is a row buffer plus a caret that is published to a
//! render callback after every key. The host wraps it in a ratatui UI with:
//! - A line-number gutter
//! - Open, save and reload
//! - File watching for external edits
//!
//! ## Architecture
//!
//! Caretpad uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`editor`]: Rows, caret and key transitions
//! - [`io`]: Text load/save and file names
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`config`]: Persisted flag defaults
//! - [`watcher`]: File watching

pub mod app;
pub mod config;
pub mod editor;
pub mod io;
pub mod perf;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{CaretPosition, EditorKey, EditorSession, ScreenPoint, TextBuffer};
}
