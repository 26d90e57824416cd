use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::{Model, ToastLevel};

pub fn render_open_prompt(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(path) = model.open_prompt.as_deref() else {
        return;
    };
    let label = "Open: ";
    let text = format!("{label}{path}  Enter: open  Esc: cancel");
    let bar = Paragraph::new(text).style(Style::default().bg(Color::Blue).fg(Color::White));
    frame.render_widget(bar, area);

    let typed = u16::try_from(label.width() + path.width()).unwrap_or(u16::MAX);
    let x = area.x + typed.min(area.width.saturating_sub(1));
    frame.set_cursor_position(Position::new(x, area.y));
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model.display_name();
    let dirty_indicator = if model.session.is_dirty() {
        " [modified]"
    } else {
        ""
    };
    let watch_indicator = if model.watch_enabled {
        " [watching]"
    } else {
        ""
    };
    let caret = model.session.caret();

    let status = format!(
        " EDIT  {filename}{dirty_indicator}{watch_indicator}  Ln {}, Col {}  ^S save  ^O open  ^Q quit",
        caret.row_index,
        caret.column_index + 1
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::Magenta).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
