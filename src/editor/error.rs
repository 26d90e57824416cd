use thiserror::Error;

/// A caret or buffer address that falls outside the rows it refers to.
///
/// Rows are reported 1-based, matching [`CaretPosition`](super::CaretPosition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoundsError {
    #[error("row {row} is outside 1..={rows}")]
    Row { row: usize, rows: usize },
    #[error("column {column} is outside 0..={len} on row {row}")]
    Column { row: usize, column: usize, len: usize },
}
