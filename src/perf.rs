//! Opt-in timing scopes and the render debug log.
//!
//! Scopes print to stderr when `--perf` is set. The debug log is a plain
//! file that records host events and every published caret.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::editor::{CaretPosition, ScreenPoint};

static ENABLED: AtomicBool = AtomicBool::new(false);
static DEBUG_LOG: LazyLock<Mutex<DebugLog>> = LazyLock::new(|| Mutex::new(DebugLog::closed()));

#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        eprintln!("[perf] {}: {:.2} ms", self.name, elapsed_ms);
    }
}

#[derive(Debug)]
struct DebugLog {
    start: Instant,
    writer: Option<BufWriter<File>>,
}

impl DebugLog {
    fn closed() -> Self {
        Self {
            start: Instant::now(),
            writer: None,
        }
    }

    fn open(path: &Path) -> std::io::Result<Self> {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "caretpad render debug log start")?;
        writer.flush()?;
        Ok(Self {
            start: Instant::now(),
            writer: Some(writer),
        })
    }

    fn write(&mut self, name: &str, detail: &str) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        if let Some(writer) = self.writer.as_mut() {
            let _ = writeln!(writer, "[{elapsed_ms:>10.3} ms] {name}: {detail}");
            let _ = writer.flush();
        }
    }
}

fn debug_log() -> MutexGuard<'static, DebugLog> {
    DEBUG_LOG.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

/// Start writing the debug log to `path`, or stop when `None`.
pub fn set_debug_log_path(path: Option<&Path>) -> std::io::Result<()> {
    let next = match path {
        Some(path) => DebugLog::open(path)?,
        None => DebugLog::closed(),
    };
    *debug_log() = next;
    Ok(())
}

pub fn is_debug_log_enabled() -> bool {
    debug_log().writer.is_some()
}

pub fn log_event(name: &str, detail: impl AsRef<str>) {
    let mut log = debug_log();
    if log.writer.is_none() {
        return;
    }
    log.write(name, detail.as_ref());
}

/// Render callback that records each published caret.
pub fn log_caret(caret: CaretPosition, point: ScreenPoint) {
    log_event(
        "caret.render",
        format!(
            "row={} col={} x={:.1} y={:.1}",
            caret.row_index, caret.column_index, point.x, point.y
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_set_enabled_toggles_runtime_flag() {
        set_enabled(true);
        assert!(is_enabled());

        set_enabled(false);
        assert!(!is_enabled());
    }

    #[test]
    fn test_debug_log_records_events_and_carets() {
        let temp_file = NamedTempFile::new().unwrap();
        set_debug_log_path(Some(temp_file.path())).unwrap();
        assert!(is_debug_log_enabled());
        log_event("test.event", "hello world");
        log_caret(CaretPosition::new(2, 3), ScreenPoint { x: 79.7, y: 42.0 });
        set_debug_log_path(None).unwrap();
        assert!(!is_debug_log_enabled());

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("caretpad render debug log start"));
        assert!(content.contains("test.event: hello world"));
        assert!(content.contains("caret.render: row=2 col=3 x=79.7 y=42.0"));
    }
}
