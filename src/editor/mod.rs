//! Row buffer and caret state machine.
//!
//! A [`TextBuffer`] owns the rows, a [`CaretController`] owns the caret and
//! notifies a single render callback, and an [`EditorSession`] pairs the two
//! and applies one transition per [`EditorKey`].

mod buffer;
mod caret;
mod error;
mod keys;
mod session;

pub use buffer::{Row, TextBuffer};
pub use caret::{CaretController, CaretGeometry, CaretPosition, ScreenPoint};
pub use error::BoundsError;
pub use keys::EditorKey;
pub use session::{EditorSession, PLACEHOLDER};
