use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::editor::EditorSession;
use crate::watcher::FileWatcher;

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Build the session for the configured file.
    ///
    /// A path that does not exist yet starts an empty buffer that will be
    /// saved there; no path starts the placeholder buffer.
    pub(super) fn initial_session(&self) -> Result<(EditorSession, Option<String>)> {
        match self.file_path.as_deref() {
            Some(path) if path.exists() => {
                let mut session = EditorSession::new();
                session.open_file(Some(path))?;
                Ok((session, None))
            }
            Some(path) => Ok((
                EditorSession::with_seed(""),
                Some(format!("New file {}", path.display())),
            )),
            None => Ok((EditorSession::new(), None)),
        }
    }

    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial file cannot be read, the terminal
    /// cannot be initialized, or the event loop hits an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let read_scope = crate::perf::scope("app.read_file");
        let (session, notice) = self.initial_session()?;
        drop(read_scope);

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal: caretpad requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);

        let mut model = Model::new(session, self.file_path.clone(), (size.width, size.height));
        model.watch_enabled = self.watch_enabled;
        model.gutter_visible = self.gutter_visible;
        model.session.subscribe(crate::perf::log_caret);
        model.ensure_caret_visible();
        if let Some(notice) = notice {
            model.show_toast(ToastLevel::Info, notice);
        }

        let result = self.event_loop(&mut terminal, &mut model);
        model.session.unsubscribe();

        ratatui::restore();
        result
    }

    /// Apply one message: pure update, then its side effects.
    fn dispatch(&self, model: &mut Model, file_watcher: &mut Option<FileWatcher>, msg: Message) {
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        self.handle_message_side_effects(model, file_watcher, &side_msg);
    }

    fn event_loop(&self, terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut file_watcher = if model.watch_enabled {
            Self::start_watcher(model)
        } else {
            None
        };
        let mut watched_path = model.file_path.clone();
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            // Recreate watcher if the open file changed (open prompt, first save)
            if model.watch_enabled && model.file_path != watched_path {
                file_watcher = Self::start_watcher(model);
                watched_path.clone_from(&model.file_path);
            }

            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                crate::perf::log_event(
                    "event.resize.apply",
                    format!("frame={frame_idx} width={width} height={height}"),
                );
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            if model.watch_enabled
                && file_watcher
                    .as_mut()
                    .is_some_and(FileWatcher::take_change_ready)
            {
                self.dispatch(model, &mut file_watcher, Message::FileChanged);
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Coalesce key repeat bursts into a single render.
                let mut handled = 0_u32;
                loop {
                    let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    let msg =
                        self.handle_event(&event::read()?, model, event_ms, &mut resize_debouncer);
                    if let Some(msg) = msg {
                        crate::perf::log_event(
                            "event.message",
                            format!("frame={frame_idx} msg={msg:?}"),
                        );
                        self.dispatch(model, &mut file_watcher, msg);
                        handled += 1;
                        needs_render = true;
                    }
                    if !event::poll(Duration::ZERO)? {
                        break;
                    }
                }
                if handled > 1 {
                    crate::perf::log_event(
                        "event.drain",
                        format!("frame={frame_idx} handled={handled}"),
                    );
                }
            }

            if needs_render {
                frame_idx += 1;
                let draw_start = Instant::now();
                terminal.draw(|frame| self.view(model, frame))?;
                if crate::perf::is_debug_log_enabled() {
                    crate::perf::log_event(
                        "frame.draw",
                        format!(
                            "frame={} draw_ms={:.3} rows={} scroll={}",
                            frame_idx,
                            draw_start.elapsed().as_secs_f64() * 1000.0,
                            model.session.rows().len(),
                            model.scroll_offset
                        ),
                    );
                }
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
