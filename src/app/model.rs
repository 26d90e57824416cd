use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::editor::EditorSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete host state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The editing session (rows and caret)
    pub session: EditorSession,
    /// File the buffer was opened from or last saved to
    pub file_path: Option<PathBuf>,
    /// Whether file watching is enabled
    pub watch_enabled: bool,
    /// Whether the line-number gutter is shown
    pub gutter_visible: bool,
    /// Index of the first visible row
    pub scroll_offset: usize,
    /// Path being typed into the open prompt
    pub open_prompt: Option<String>,
    /// Path accepted from the prompt, waiting to be loaded
    pub(super) pending_open: Option<PathBuf>,
    /// Set when a confirmed reload is waiting to be performed
    pub(super) pending_reload: bool,
    width: u16,
    height: u16,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Set after first quit attempt with unsaved changes; allows second quit to proceed
    pub quit_confirmed: bool,
    /// Set after first reload attempt with unsaved changes; allows second reload to discard
    pub reload_confirmed: bool,
    /// Set after first open attempt with unsaved changes; allows second open to discard
    pub open_confirmed: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("caret", &self.session.caret())
            .field("rows", &self.session.rows().len())
            .field("watch_enabled", &self.watch_enabled)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a new model around `session`.
    pub fn new(session: EditorSession, file_path: Option<PathBuf>, terminal_size: (u16, u16)) -> Self {
        Self {
            session,
            file_path,
            watch_enabled: false,
            gutter_visible: true,
            scroll_offset: 0,
            open_prompt: None,
            pending_open: None,
            pending_reload: false,
            width: terminal_size.0,
            height: terminal_size.1,
            toast: None,
            should_quit: false,
            quit_confirmed: false,
            reload_confirmed: false,
            open_confirmed: false,
        }
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub(super) const fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Rows left for text once the footer bars are drawn.
    pub fn text_height(&self) -> usize {
        let footer_rows =
            1 + u16::from(self.open_prompt.is_some()) + u16::from(self.toast.is_some());
        usize::from(self.height.saturating_sub(footer_rows))
    }

    /// File name shown in the status bar.
    pub fn display_name(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string())
    }

    /// Scroll so the caret row is inside the text area.
    pub(super) fn ensure_caret_visible(&mut self) {
        let caret_row = self.session.caret().row_index - 1;
        let visible = self.text_height();
        if visible == 0 {
            self.scroll_offset = caret_row;
            return;
        }
        if caret_row < self.scroll_offset {
            self.scroll_offset = caret_row;
        } else if caret_row >= self.scroll_offset + visible {
            self.scroll_offset = caret_row + 1 - visible;
        }
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
        self.ensure_caret_visible();
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            self.ensure_caret_visible();
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Replace the buffer with the contents of `path`.
    pub(super) fn open_path(&mut self, path: PathBuf) -> Result<()> {
        self.session.open_file(Some(&path))?;
        self.file_path = Some(path);
        self.scroll_offset = 0;
        self.ensure_caret_visible();
        Ok(())
    }

    /// Re-read the current file. Returns false when the buffer has no file.
    pub(super) fn reload_from_disk(&mut self) -> Result<bool> {
        let Some(path) = self.file_path.clone() else {
            return Ok(false);
        };
        self.open_path(path)?;
        Ok(true)
    }

    /// Whether the file on disk holds exactly the serialized buffer.
    pub(super) fn disk_matches_buffer(&self) -> bool {
        self.file_path
            .as_deref()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .is_some_and(|text| text == self.session.buffer().serialize())
    }

    /// Save to the current file, or to a timestamped name when there is none.
    pub(super) fn save(&mut self) -> Result<PathBuf> {
        let path = self.file_path.clone().unwrap_or_else(|| {
            PathBuf::from(crate::io::suggested_file_name(crate::io::now_local()))
        });
        self.session.save_file(&path)?;
        self.file_path = Some(path.clone());
        Ok(path)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(EditorSession::default(), None, (80, 24))
    }
}
