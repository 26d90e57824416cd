use std::path::PathBuf;

use crate::app::{Model, ToastLevel};
use crate::editor::EditorKey;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Apply one editor key to the session
    Key(EditorKey),

    // File
    /// Save the buffer
    Save,
    /// Show the open-file prompt
    StartOpen,
    /// Update the open-file prompt text
    OpenInput(String),
    /// Open the path in the prompt
    SubmitOpen,
    /// Close the open-file prompt
    CancelOpen,
    /// Reload the current file from disk
    Reload,
    /// File changed externally
    FileChanged,
    /// Toggle file watching
    ToggleWatch,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// File reads and writes are left to the side-effect pass.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset confirmation flags on any action other than the confirmed one.
    // Save preserves the quit flag so Ctrl+S can complete a pending quit.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }
    if !matches!(msg, Message::Reload) {
        model.reload_confirmed = false;
    }
    if !matches!(msg, Message::SubmitOpen | Message::OpenInput(_)) {
        model.open_confirmed = false;
    }

    match msg {
        Message::Key(key) => {
            model.session.handle_key(key);
        }

        Message::StartOpen => {
            let current = model
                .file_path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default();
            model.open_prompt = Some(current);
        }
        Message::OpenInput(text) => {
            model.open_prompt = Some(text);
        }
        Message::CancelOpen => {
            model.open_prompt = None;
        }
        Message::SubmitOpen => {
            let Some(text) = model.open_prompt.as_deref().map(str::trim) else {
                return model;
            };
            if text.is_empty() {
                model.open_prompt = None;
                model.show_toast(ToastLevel::Info, "No file selected");
                return model;
            }
            if model.session.is_dirty() && !model.open_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Enter again to open anyway, or Esc to cancel",
                );
                model.open_confirmed = true;
                return model;
            }
            model.pending_open = Some(PathBuf::from(text));
            model.open_prompt = None;
            model.open_confirmed = false;
        }
        Message::Reload => {
            if model.file_path.is_none() {
                model.show_toast(ToastLevel::Info, "Nothing to reload");
            } else if model.session.is_dirty() && !model.reload_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+R again to discard them",
                );
                model.reload_confirmed = true;
            } else {
                model.reload_confirmed = false;
                model.pending_reload = true;
            }
        }
        Message::ToggleWatch => {
            model.watch_enabled = !model.watch_enabled;
        }
        Message::Save | Message::FileChanged | Message::Redraw => {}

        Message::Resize(width, height) => {
            model.resize(width, height);
        }

        Message::Quit => {
            if model.session.is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }

    // Footer rows come and go with the prompt and toasts.
    model.ensure_caret_visible();
    model
}
