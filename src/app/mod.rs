//! Terminal host and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete host state, including the editor session
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use input::editor_key;
pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
    watch_enabled: bool,
    gutter_visible: bool,
}

impl App {
    /// Create a new application, optionally editing `file_path`.
    pub const fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            watch_enabled: false,
            gutter_visible: true,
        }
    }

    /// Enable or disable file watching.
    #[must_use]
    pub const fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    /// Show or hide the line-number gutter.
    #[must_use]
    pub const fn with_gutter_visible(mut self, visible: bool) -> Self {
        self.gutter_visible = visible;
        self
    }
}
