use super::{BoundsError, TextBuffer};

/// Caret position: 1-based row, 0-based char column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretPosition {
    pub row_index: usize,
    pub column_index: usize,
}

impl CaretPosition {
    pub const fn new(row_index: usize, column_index: usize) -> Self {
        Self {
            row_index,
            column_index,
        }
    }

    /// Row 1, column 0.
    pub const fn origin() -> Self {
        Self::new(1, 0)
    }
}

impl Default for CaretPosition {
    fn default() -> Self {
        Self::origin()
    }
}

/// Caret location in presentation units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Fixed monospace grid used to place the caret.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretGeometry {
    pub column_width: f64,
    pub row_height: f64,
    pub left: f64,
    pub top: f64,
}

impl CaretGeometry {
    /// Translate a caret into a screen point.
    ///
    /// The row is clamped to `[1, rows]` and the column is already
    /// non-negative, so nothing above or left of the first cell is produced.
    #[allow(clippy::cast_precision_loss)]
    pub fn project(&self, caret: CaretPosition, rows: usize) -> ScreenPoint {
        let row = caret.row_index.clamp(1, rows.max(1));
        ScreenPoint {
            x: caret.column_index as f64 * self.column_width + self.left,
            y: row as f64 * self.row_height + self.top,
        }
    }
}

impl Default for CaretGeometry {
    fn default() -> Self {
        Self {
            column_width: 9.9,
            row_height: 20.0,
            left: 50.0,
            top: 2.0,
        }
    }
}

type RenderCallback = Box<dyn FnMut(CaretPosition, ScreenPoint)>;

/// Holds the caret and notifies one render callback on every change.
pub struct CaretController {
    position: CaretPosition,
    geometry: CaretGeometry,
    on_render: Option<RenderCallback>,
}

impl CaretController {
    pub fn new(position: CaretPosition) -> Self {
        Self {
            position,
            geometry: CaretGeometry::default(),
            on_render: None,
        }
    }

    #[must_use]
    pub const fn with_geometry(mut self, geometry: CaretGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub const fn position(&self) -> CaretPosition {
        self.position
    }

    /// Screen point of the current caret within `buffer`.
    pub fn screen_point(&self, buffer: &TextBuffer) -> ScreenPoint {
        self.geometry.project(self.position, buffer.row_count())
    }

    /// Register the render callback, replacing any previous one.
    ///
    /// The callback is invoked immediately with the current caret.
    pub fn subscribe<F>(&mut self, buffer: &TextBuffer, callback: F)
    where
        F: FnMut(CaretPosition, ScreenPoint) + 'static,
    {
        let mut callback: RenderCallback = Box::new(callback);
        callback(self.position, self.screen_point(buffer));
        self.on_render = Some(callback);
    }

    pub fn unsubscribe(&mut self) {
        self.on_render = None;
    }

    /// Check that `caret` addresses a row and column of `buffer`.
    ///
    /// # Errors
    ///
    /// Returns the first bound the caret violates.
    pub fn check(caret: CaretPosition, buffer: &TextBuffer) -> Result<CaretPosition, BoundsError> {
        let rows = buffer.row_count();
        if caret.row_index == 0 || caret.row_index > rows {
            return Err(BoundsError::Row {
                row: caret.row_index,
                rows,
            });
        }
        let len = buffer.row_len(caret.row_index - 1)?;
        if caret.column_index > len {
            return Err(BoundsError::Column {
                row: caret.row_index,
                column: caret.column_index,
                len,
            });
        }
        Ok(caret)
    }

    /// Constrain `caret` to the nearest position inside `buffer`.
    pub fn clamp(caret: CaretPosition, buffer: &TextBuffer) -> CaretPosition {
        let row_index = caret.row_index.clamp(1, buffer.row_count());
        let len = buffer.row_len(row_index - 1).unwrap_or_default();
        CaretPosition::new(row_index, caret.column_index.min(len))
    }

    /// Store `proposal`, clamped to `buffer`, and notify the render callback.
    pub fn publish(&mut self, proposal: CaretPosition, buffer: &TextBuffer) -> CaretPosition {
        let position = Self::check(proposal, buffer).unwrap_or_else(|err| {
            let clamped = Self::clamp(proposal, buffer);
            tracing::debug!(%err, ?clamped, "caret clamped to buffer");
            clamped
        });
        self.position = position;
        let point = self.screen_point(buffer);
        if let Some(callback) = self.on_render.as_mut() {
            callback(position, point);
        }
        position
    }
}

impl Default for CaretController {
    fn default() -> Self {
        Self::new(CaretPosition::origin())
    }
}

impl std::fmt::Debug for CaretController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaretController")
            .field("position", &self.position)
            .field("geometry", &self.geometry)
            .field("subscribed", &self.on_render.is_some())
            .finish()
    }
}
