use super::BoundsError;

/// One line of text in the buffer.
///
/// `index` is display metadata. Rows are addressed by their position in the
/// buffer, and `index` is only reassigned when the rows are rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub index: usize,
    pub content: String,
}

impl Row {
    pub fn new(index: usize, content: impl Into<String>) -> Self {
        Self {
            index,
            content: content.into(),
        }
    }

    /// Length of the row in chars.
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// An ordered, never-empty sequence of rows.
///
/// Row arguments are 0-based positions. Columns are counted in chars.
pub struct TextBuffer {
    rows: Vec<Row>,
    dirty: bool,
}

impl TextBuffer {
    /// Create a buffer from seed text, one row per line.
    pub fn with_seed(seed: &str) -> Self {
        let mut buffer = Self {
            rows: Vec::new(),
            dirty: false,
        };
        buffer.replace_all(seed.split('\n'));
        buffer
    }

    /// Create a buffer holding a single empty row.
    pub fn empty() -> Self {
        Self::with_seed("")
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The row at a 0-based position.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError::Row`] if `row` is past the last row.
    pub fn row(&self, row: usize) -> Result<&Row, BoundsError> {
        self.rows.get(row).ok_or(BoundsError::Row {
            row: row + 1,
            rows: self.rows.len(),
        })
    }

    /// Length in chars of the row at a 0-based position.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError::Row`] if `row` is past the last row.
    pub fn row_len(&self, row: usize) -> Result<usize, BoundsError> {
        self.row(row).map(Row::len)
    }

    /// Whether the rows changed since creation, load, or the last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Content of `row` with `text` inserted before char `column`.
    ///
    /// The column is not validated: a column past the end appends.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError::Row`] if `row` does not exist.
    pub fn insert_at(&self, row: usize, column: usize, text: &str) -> Result<String, BoundsError> {
        let content = &self.row(row)?.content;
        let at = byte_offset(content, column);
        let mut out = String::with_capacity(content.len() + text.len());
        out.push_str(&content[..at]);
        out.push_str(text);
        out.push_str(&content[at..]);
        Ok(out)
    }

    /// Content of `row` with the char at `column` removed.
    ///
    /// A column at or past the end leaves the content unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError::Row`] if `row` does not exist.
    pub fn delete_at(&self, row: usize, column: usize) -> Result<String, BoundsError> {
        let content = &self.row(row)?.content;
        let start = byte_offset(content, column);
        let end = byte_offset(content, column + 1);
        let mut out = String::with_capacity(content.len());
        out.push_str(&content[..start]);
        out.push_str(&content[end..]);
        Ok(out)
    }

    /// Replace the content of `row`.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError::Row`] if `row` does not exist.
    pub fn set_content(&mut self, row: usize, content: String) -> Result<(), BoundsError> {
        let rows = self.rows.len();
        let slot = self
            .rows
            .get_mut(row)
            .ok_or(BoundsError::Row { row: row + 1, rows })?;
        debug_assert!(!content.contains('\n'), "row content must not contain newlines");
        slot.content = content;
        self.dirty = true;
        Ok(())
    }

    /// Append an empty row after the last row.
    ///
    /// `row` is the caret row; it must exist but its content is not split.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError::Row`] if `row` does not exist.
    pub fn split_row_at_caret(&mut self, row: usize) -> Result<(), BoundsError> {
        self.row(row)?;
        let index = self.rows.len();
        self.rows.push(Row::new(index, String::new()));
        self.dirty = true;
        Ok(())
    }

    /// Drop the final row. The only remaining row is never dropped.
    pub fn remove_last_row(&mut self) -> Option<Row> {
        if self.rows.len() <= 1 {
            return None;
        }
        let removed = self.rows.pop();
        self.dirty = true;
        removed
    }

    /// Rebuild every row from `lines`, reassigning indices `0..n`.
    ///
    /// An empty iterator leaves a single empty row. The buffer is marked clean.
    pub fn replace_all<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows = lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| Row::new(index, line))
            .collect();
        if self.rows.is_empty() {
            self.rows.push(Row::new(0, String::new()));
        }
        self.dirty = false;
    }

    /// Flatten the rows into newline-separated text.
    pub fn serialize(&self) -> String {
        crate::io::save_text(&self.rows)
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("rows", &format_args!("{} rows", self.rows.len()))
            .field("dirty", &self.dirty)
            .finish()
    }
}

/// Byte offset of char `column`, or the end of `content` past the last char.
fn byte_offset(content: &str, column: usize) -> usize {
    content
        .char_indices()
        .nth(column)
        .map_or(content.len(), |(offset, _)| offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(lines: &[&str]) -> TextBuffer {
        let mut buf = TextBuffer::empty();
        buf.replace_all(lines.iter().copied());
        buf
    }

    // --- Construction ---

    #[test]
    fn test_empty_buffer_has_one_row() {
        let buf = TextBuffer::empty();
        assert_eq!(buf.row_count(), 1);
        assert_eq!(buf.row(0).unwrap().content, "");
    }

    #[test]
    fn test_seed_with_newlines_becomes_rows() {
        let buf = TextBuffer::with_seed("one\ntwo");
        assert_eq!(buf.row_count(), 2);
        assert_eq!(buf.row(1).unwrap(), &Row::new(1, "two"));
    }

    #[test]
    fn test_new_buffer_is_clean() {
        assert!(!TextBuffer::with_seed("hello").is_dirty());
    }

    #[test]
    fn test_row_out_of_bounds_is_error() {
        let buf = buffer(&["a", "b"]);
        assert_eq!(buf.row(2), Err(BoundsError::Row { row: 3, rows: 2 }));
        assert!(buf.row_len(5).is_err());
    }

    // --- insert_at ---

    #[test]
    fn test_insert_at_start_middle_end() {
        let buf = buffer(&["hllo"]);
        assert_eq!(buf.insert_at(0, 0, "_").unwrap(), "_hllo");
        assert_eq!(buf.insert_at(0, 1, "e").unwrap(), "hello");
        assert_eq!(buf.insert_at(0, 4, "!").unwrap(), "hllo!");
    }

    #[test]
    fn test_insert_at_past_end_appends() {
        let buf = buffer(&["ab"]);
        assert_eq!(buf.insert_at(0, 10, "c").unwrap(), "abc");
    }

    #[test]
    fn test_insert_at_counts_chars_not_bytes() {
        let buf = buffer(&["café"]);
        assert_eq!(buf.insert_at(0, 4, "s").unwrap(), "cafés");
        assert_eq!(buf.insert_at(0, 3, "-").unwrap(), "caf-é");
    }

    #[test]
    fn test_insert_at_missing_row_is_error() {
        let buf = buffer(&["a"]);
        assert!(buf.insert_at(1, 0, "x").is_err());
    }

    #[test]
    fn test_insert_at_does_not_mutate() {
        let buf = buffer(&["a"]);
        let _ = buf.insert_at(0, 1, "b").unwrap();
        assert_eq!(buf.row(0).unwrap().content, "a");
        assert!(!buf.is_dirty());
    }

    // --- delete_at ---

    #[test]
    fn test_delete_at_removes_char_after_column() {
        let buf = buffer(&["abc"]);
        assert_eq!(buf.delete_at(0, 0).unwrap(), "bc");
        assert_eq!(buf.delete_at(0, 1).unwrap(), "ac");
        assert_eq!(buf.delete_at(0, 2).unwrap(), "ab");
    }

    #[test]
    fn test_delete_at_end_is_unchanged() {
        let buf = buffer(&["abc"]);
        assert_eq!(buf.delete_at(0, 3).unwrap(), "abc");
        assert_eq!(buf.delete_at(0, 30).unwrap(), "abc");
    }

    #[test]
    fn test_delete_at_multibyte() {
        let buf = buffer(&["naïve"]);
        assert_eq!(buf.delete_at(0, 2).unwrap(), "nave");
    }

    // --- Row structure ---

    #[test]
    fn test_set_content_marks_dirty() {
        let mut buf = buffer(&["a"]);
        buf.set_content(0, "b".to_string()).unwrap();
        assert_eq!(buf.row(0).unwrap().content, "b");
        assert!(buf.is_dirty());
        buf.mark_clean();
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_split_row_at_caret_appends_empty_row_at_end() {
        let mut buf = buffer(&["one", "two"]);
        buf.split_row_at_caret(0).unwrap();
        assert_eq!(buf.row_count(), 3);
        assert_eq!(buf.row(2).unwrap(), &Row::new(2, ""));
        // quirk, matches reference: existing rows are not split
        assert_eq!(buf.row(0).unwrap().content, "one");
        assert_eq!(buf.row(1).unwrap().content, "two");
    }

    #[test]
    fn test_split_row_at_caret_rejects_missing_row() {
        let mut buf = buffer(&["one"]);
        assert_eq!(
            buf.split_row_at_caret(3),
            Err(BoundsError::Row { row: 4, rows: 1 })
        );
        assert_eq!(buf.row_count(), 1);
    }

    #[test]
    fn test_remove_last_row() {
        let mut buf = buffer(&["one", "two"]);
        assert_eq!(buf.remove_last_row(), Some(Row::new(1, "two")));
        assert_eq!(buf.row_count(), 1);
    }

    #[test]
    fn test_remove_last_row_keeps_only_row() {
        let mut buf = buffer(&["only"]);
        assert_eq!(buf.remove_last_row(), None);
        assert_eq!(buf.row_count(), 1);
    }

    #[test]
    fn test_replace_all_reassigns_indices() {
        let mut buf = buffer(&["x"]);
        buf.split_row_at_caret(0).unwrap();
        buf.replace_all(["a", "b", "c"]);
        let indices: Vec<usize> = buf.rows().iter().map(|row| row.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_replace_all_with_nothing_keeps_one_row() {
        let mut buf = buffer(&["a", "b"]);
        buf.replace_all(Vec::<String>::new());
        assert_eq!(buf.row_count(), 1);
        assert!(buf.row(0).unwrap().is_empty());
    }

    #[test]
    fn test_serialize_joins_rows() {
        let buf = buffer(&["line1", "line2", ""]);
        assert_eq!(buf.serialize(), "line1\nline2\n");
    }
}
