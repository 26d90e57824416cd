use std::path::Path;

use anyhow::Result;

use super::{
    BoundsError, CaretController, CaretGeometry, CaretPosition, EditorKey, Row, ScreenPoint,
    TextBuffer,
};

/// Seed text shown in a fresh session.
pub const PLACEHOLDER: &str = "Start typing here ...";

/// One editing session: a buffer and the caret that walks it.
///
/// Each call to [`handle_key`](Self::handle_key) applies exactly one
/// transition and publishes exactly one caret value.
#[derive(Debug)]
pub struct EditorSession {
    buffer: TextBuffer,
    caret: CaretController,
}

impl EditorSession {
    /// Create a session seeded with [`PLACEHOLDER`].
    pub fn new() -> Self {
        Self::with_seed(PLACEHOLDER)
    }

    /// Create a session seeded with `seed`, caret at the end of the last row.
    pub fn with_seed(seed: &str) -> Self {
        let buffer = TextBuffer::with_seed(seed);
        let row_index = buffer.row_count();
        let column_index = buffer.row_len(row_index - 1).unwrap_or_default();
        Self {
            buffer,
            caret: CaretController::new(CaretPosition::new(row_index, column_index)),
        }
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: CaretGeometry) -> Self {
        self.caret = self.caret.with_geometry(geometry);
        self
    }

    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn rows(&self) -> &[Row] {
        self.buffer.rows()
    }

    pub const fn caret(&self) -> CaretPosition {
        self.caret.position()
    }

    pub fn screen_point(&self) -> ScreenPoint {
        self.caret.screen_point(&self.buffer)
    }

    pub const fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Register the render callback; it fires now and after every change.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(CaretPosition, ScreenPoint) + 'static,
    {
        self.caret.subscribe(&self.buffer, callback);
    }

    /// Drop the render callback.
    pub fn unsubscribe(&mut self) {
        self.caret.unsubscribe();
    }

    /// Apply one key and publish the resulting caret.
    pub fn handle_key(&mut self, key: EditorKey) -> CaretPosition {
        let current = self.caret.position();
        let proposal = self.transition(key, current).unwrap_or_else(|err| {
            tracing::debug!(%err, ?key, "key recovered at buffer edge");
            current
        });
        if key.edits() {
            tracing::trace!(?key, rows = self.buffer.row_count(), "buffer edited");
        }
        self.caret.publish(proposal, &self.buffer)
    }

    /// Replace every row with the lines of `raw`.
    ///
    /// The caret goes to row 1, one column short of the end of that row.
    pub fn open_text(&mut self, raw: &str) -> CaretPosition {
        let rows = crate::io::load_text(raw);
        tracing::debug!(rows = rows.len(), "buffer replaced");
        self.buffer.replace_all(rows.into_iter().map(|row| row.content));
        let first_len = self.buffer.row_len(0).unwrap_or_default();
        // quirk, matches reference: End would be first_len
        self.caret
            .publish(CaretPosition::new(1, first_len.saturating_sub(1)), &self.buffer)
    }

    /// Load `path` into the session. `None` is a no-op.
    ///
    /// Returns whether a file was loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read as UTF-8 text.
    pub fn open_file(&mut self, path: Option<&Path>) -> Result<bool> {
        let Some(path) = path else {
            return Ok(false);
        };
        let raw = crate::io::read_file(path)?;
        self.open_text(&raw);
        tracing::info!(path = %path.display(), rows = self.buffer.row_count(), "opened file");
        Ok(true)
    }

    /// Serialize the rows and mark the buffer clean.
    pub fn save_text(&mut self) -> String {
        let text = self.buffer.serialize();
        self.buffer.mark_clean();
        text
    }

    /// Write the rows to `path` and mark the buffer clean.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_file(&mut self, path: &Path) -> Result<()> {
        crate::io::write_file(path, &self.buffer.serialize())?;
        self.buffer.mark_clean();
        tracing::info!(path = %path.display(), rows = self.buffer.row_count(), "saved file");
        Ok(())
    }

    fn transition(
        &mut self,
        key: EditorKey,
        caret: CaretPosition,
    ) -> Result<CaretPosition, BoundsError> {
        let CaretPosition {
            row_index: row,
            column_index: column,
        } = caret;
        match key {
            EditorKey::Enter => {
                // quirk, matches reference: appends rather than splitting the row
                self.buffer.split_row_at_caret(row - 1)?;
                Ok(CaretPosition::new(row + 1, 0))
            }
            EditorKey::Space => self.insert(caret, " "),
            EditorKey::Char(ch) if ch.is_control() => Ok(caret),
            EditorKey::Char(ch) => self.insert(caret, ch.encode_utf8(&mut [0; 4])),
            EditorKey::ArrowLeft => Ok(CaretPosition::new(row, column.saturating_sub(1))),
            EditorKey::ArrowRight => Ok(CaretPosition::new(row, column + 1)),
            EditorKey::ArrowUp => self.vertical(row.saturating_sub(1), column),
            EditorKey::ArrowDown => self.vertical(row + 1, column),
            EditorKey::Home => Ok(CaretPosition::new(row, 0)),
            EditorKey::End => Ok(CaretPosition::new(row, self.row_len_at(row)?)),
            EditorKey::Backspace | EditorKey::Delete => self.delete_before(caret),
        }
    }

    fn insert(&mut self, caret: CaretPosition, text: &str) -> Result<CaretPosition, BoundsError> {
        let index = caret.row_index - 1;
        let content = self.buffer.insert_at(index, caret.column_index, text)?;
        self.buffer.set_content(index, content)?;
        Ok(CaretPosition::new(caret.row_index, caret.column_index + 1))
    }

    fn vertical(&self, target: usize, column: usize) -> Result<CaretPosition, BoundsError> {
        let len = self.row_len_at(target)?;
        Ok(CaretPosition::new(target, column.min(len)))
    }

    /// Remove the char before the caret, dropping an emptied last row.
    fn delete_before(&mut self, caret: CaretPosition) -> Result<CaretPosition, BoundsError> {
        let CaretPosition {
            row_index: row,
            column_index: column,
        } = caret;
        let index = row - 1;
        if let Some(target) = column.checked_sub(1) {
            let content = self.buffer.delete_at(index, target)?;
            self.buffer.set_content(index, content)?;
        }

        let emptied = self.buffer.row(index)?.is_empty();
        let last = index + 1 == self.buffer.row_count();
        if emptied && last && self.buffer.remove_last_row().is_some() {
            let previous = row - 1;
            return Ok(CaretPosition::new(previous, self.row_len_at(previous)?));
        }
        Ok(CaretPosition::new(row, column.saturating_sub(1)))
    }

    /// Length of the 1-based row `row_index`.
    fn row_len_at(&self, row_index: usize) -> Result<usize, BoundsError> {
        match row_index.checked_sub(1) {
            Some(index) => self.buffer.row_len(index),
            None => Err(BoundsError::Row {
                row: row_index,
                rows: self.buffer.row_count(),
            }),
        }
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}
