//! Terminal UI.
//!
//! - [`render`]: rows, gutter and terminal cursor
//! - `status`: footer bars (prompt, toast, status line)

mod render;
mod status;

pub use render::{caret_cell, line_number_width, render};
