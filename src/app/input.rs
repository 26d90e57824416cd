use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;

use crate::app::{App, Message, Model};
use crate::editor::EditorKey;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        &self,
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => self.handle_key(*key, model),
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            Event::FocusGained => Some(Message::Redraw),
            _ => None,
        }
    }

    pub(super) fn handle_key(&self, key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if let Some(path) = model.open_prompt.as_ref() {
            return match key.code {
                KeyCode::Esc => Some(Message::CancelOpen),
                KeyCode::Enter => Some(Message::SubmitOpen),
                KeyCode::Backspace => {
                    let mut next = path.clone();
                    next.pop();
                    Some(Message::OpenInput(next))
                }
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    let mut next = path.clone();
                    next.push(c);
                    Some(Message::OpenInput(next))
                }
                _ => None,
            };
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => Some(Message::Save),
                KeyCode::Char('o') => Some(Message::StartOpen),
                KeyCode::Char('r') => Some(Message::Reload),
                KeyCode::Char('w') => Some(Message::ToggleWatch),
                KeyCode::Char('q' | 'c') => Some(Message::Quit),
                _ => None,
            };
        }

        editor_key(key).map(Message::Key)
    }

    pub(super) fn view(&self, model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

/// Translate a terminal key into an editor key.
///
/// Keys held with Control or Alt, and keys outside the editor's set, map to
/// `None`.
pub fn editor_key(key: KeyEvent) -> Option<EditorKey> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Enter => Some(EditorKey::Enter),
        KeyCode::Left => Some(EditorKey::ArrowLeft),
        KeyCode::Right => Some(EditorKey::ArrowRight),
        KeyCode::Up => Some(EditorKey::ArrowUp),
        KeyCode::Down => Some(EditorKey::ArrowDown),
        KeyCode::Home => Some(EditorKey::Home),
        KeyCode::End => Some(EditorKey::End),
        KeyCode::Backspace => Some(EditorKey::Backspace),
        KeyCode::Delete => Some(EditorKey::Delete),
        KeyCode::Char(c) => EditorKey::from_char(c),
        _ => None,
    }
}
