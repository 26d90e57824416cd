use std::time::Duration;

use crate::app::{App, Message, Model, ToastLevel};
use crate::watcher::FileWatcher;

impl App {
    /// Watch the model's file, reporting failure as a toast.
    pub(super) fn start_watcher(model: &mut Model) -> Option<FileWatcher> {
        let Some(path) = model.file_path.clone() else {
            model.watch_enabled = false;
            model.show_toast(ToastLevel::Info, "Nothing to watch: save the buffer first");
            return None;
        };
        match FileWatcher::new(&path, Duration::from_millis(200)) {
            Ok(watcher) => Some(watcher),
            Err(err) => {
                model.watch_enabled = false;
                model.show_toast(ToastLevel::Warning, format!("Watch unavailable: {err}"));
                tracing::warn!(path = %path.display(), %err, "failed to watch file");
                None
            }
        }
    }

    pub(super) fn handle_message_side_effects(
        &self,
        model: &mut Model,
        file_watcher: &mut Option<FileWatcher>,
        msg: &Message,
    ) {
        match msg {
            Message::Save => match model.save() {
                Ok(path) => {
                    let name = model.display_name();
                    model.show_toast(ToastLevel::Info, format!("Saved {name}"));
                    crate::perf::log_event("file.save", path.display().to_string());
                    if model.quit_confirmed {
                        model.should_quit = true;
                    }
                }
                Err(err) => {
                    model.show_toast(ToastLevel::Error, format!("Save failed: {err:#}"));
                }
            },
            Message::SubmitOpen => {
                let Some(path) = model.pending_open.take() else {
                    return;
                };
                if let Err(err) = model.open_path(path) {
                    model.show_toast(ToastLevel::Error, format!("Open failed: {err:#}"));
                } else {
                    let name = model.display_name();
                    model.show_toast(ToastLevel::Info, format!("Opened {name}"));
                }
            }
            Message::Reload => {
                if !std::mem::take(&mut model.pending_reload) {
                    return;
                }
                match model.reload_from_disk() {
                    Ok(_) => model.show_toast(ToastLevel::Info, "Reloaded"),
                    Err(err) => {
                        model.show_toast(ToastLevel::Error, format!("Reload failed: {err:#}"));
                    }
                }
            }
            Message::FileChanged => {
                if model.disk_matches_buffer() {
                    return;
                }
                if model.session.is_dirty() {
                    model.show_toast(
                        ToastLevel::Warning,
                        "File changed on disk; Ctrl+R to reload and discard edits",
                    );
                    return;
                }
                if let Err(err) = model.reload_from_disk() {
                    model.show_toast(ToastLevel::Error, format!("Reload failed: {err:#}"));
                    tracing::warn!(%err, "reload after file change failed");
                }
            }
            Message::ToggleWatch => {
                if model.watch_enabled {
                    *file_watcher = Self::start_watcher(model);
                    if file_watcher.is_some() {
                        model.show_toast(ToastLevel::Info, "Watching file changes");
                    }
                } else {
                    *file_watcher = None;
                    model.show_toast(ToastLevel::Info, "Watch disabled");
                }
            }
            _ => {}
        }
    }
}
