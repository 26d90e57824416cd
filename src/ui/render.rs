use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::app::Model;
use crate::editor::{CaretPosition, Row};

use super::status;

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let prompt_active = model.open_prompt.is_some();
    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(prompt_active) + u16::from(toast_active);

    let text_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let toast_area = Rect {
        y: area.y
            + area
                .height
                .saturating_sub(1 + u16::from(prompt_active) + u16::from(toast_active)),
        height: 1,
        ..area
    };
    let prompt_area = Rect {
        y: area.y + area.height.saturating_sub(1 + u16::from(prompt_active)),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    render_rows(model, frame, text_area);

    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    if prompt_active {
        status::render_open_prompt(model, frame, prompt_area);
    }
    status::render_status_bar(model, frame, status_area);
}

fn render_rows(model: &Model, frame: &mut Frame, area: Rect) {
    let rows = model.session.rows();
    let gutter_width = if model.gutter_visible {
        line_number_width(rows.len()) + 1
    } else {
        0
    };

    let visible_height = area.height as usize;
    let start = model.scroll_offset.min(rows.len());
    let end = (start + visible_height).min(rows.len());

    let content: Vec<Line> = rows[start..end]
        .iter()
        .map(|row| {
            let mut spans = Vec::with_capacity(2);
            if model.gutter_visible {
                let number = format!(
                    "{:>width$} ",
                    row.index + 1,
                    width = usize::from(gutter_width - 1)
                );
                spans.push(Span::styled(number, Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::raw(row.content.as_str()));
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);

    // The terminal cursor stands in for the caret; hidden while the prompt has focus.
    if model.open_prompt.is_none()
        && let Some((x, y)) = caret_cell(
            rows,
            model.session.caret(),
            model.scroll_offset,
            area,
            gutter_width,
        )
    {
        frame.set_cursor_position(Position::new(x, y));
    }
}

/// Terminal cell for `caret`, or `None` when its row is scrolled out of `area`.
///
/// Columns are measured in display width so wide characters push the cursor
/// by two cells.
pub fn caret_cell(
    rows: &[Row],
    caret: CaretPosition,
    scroll_offset: usize,
    area: Rect,
    gutter_width: u16,
) -> Option<(u16, u16)> {
    let row_idx = caret.row_index.checked_sub(1)?;
    let screen_row = row_idx.checked_sub(scroll_offset)?;
    if screen_row >= usize::from(area.height) {
        return None;
    }
    let row = rows.get(row_idx)?;
    let cells: usize = row
        .content
        .chars()
        .take(caret.column_index)
        .map(|ch| ch.width().unwrap_or(0))
        .sum();
    let max_x = area.width.saturating_sub(1);
    let x = u16::try_from(cells)
        .unwrap_or(u16::MAX)
        .saturating_add(gutter_width)
        .min(max_x);
    let y = u16::try_from(screen_row).ok()?;
    Some((area.x + x, area.y + y))
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
