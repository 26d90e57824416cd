//! Change notifications for the open file.
//!
//! Uses the notify crate; events are drained from a channel by the event loop
//! and settled by a debounce before a reload is requested.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// The paths an event must touch to concern the watched file.
#[derive(Debug, Clone)]
struct WatchTarget {
    root: PathBuf,
    path: PathBuf,
    name: Option<OsString>,
}

impl WatchTarget {
    fn new(path: &Path) -> Self {
        // Events arrive with canonical absolute paths.
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self {
            root: watch_root_for(&path),
            name: path.file_name().map(std::ffi::OsStr::to_os_string),
            path,
        }
    }

    fn matches(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.root
                || path == &self.path
                || self
                    .name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}

/// Watches a single file and reports debounced changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    target: WatchTarget,
    debounce: Duration,
    pending_since: Option<Instant>,
}

impl FileWatcher {
    /// Start watching `path`.
    ///
    /// # Errors
    /// Returns an error if the platform watcher cannot be created or the
    /// parent directory cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        let target = WatchTarget::new(path.as_ref());
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&target.root, RecursiveMode::NonRecursive)?;
        tracing::debug!(path = %target.path.display(), "watching file");

        Ok(Self {
            _watcher: watcher,
            rx,
            target,
            debounce,
            pending_since: None,
        })
    }

    pub fn target_path(&self) -> &Path {
        &self.target.path
    }

    /// Returns true once a change has settled for the debounce period.
    pub fn take_change_ready(&mut self) -> bool {
        let mut relevant = 0u32;
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(ev) if self.target.matches(&ev) => relevant += 1,
                Ok(_) => {}
                Err(err) => tracing::warn!(%err, "file watcher error"),
            }
        }
        if relevant > 0 {
            crate::perf::log_event(
                "watcher.poll",
                format!("relevant={relevant} target={}", self.target.path.display()),
            );
            self.pending_since = Some(Instant::now());
        }

        match self.pending_since {
            Some(since) if since.elapsed() >= self.debounce => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::EventKind;
    use tempfile::tempdir;

    fn event_for(path: PathBuf) -> Event {
        Event {
            kind: EventKind::Any,
            paths: vec![path],
            attrs: notify::event::EventAttributes::new(),
        }
    }

    #[test]
    fn test_directory_level_event_matches_watched_file() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("notes.txt");
        std::fs::write(&path, "hi").expect("write");

        let target = WatchTarget::new(&path);
        assert!(target.matches(&event_for(canonical_dir)));
        assert!(target.matches(&event_for(path)));
    }

    #[test]
    fn test_sibling_file_event_is_ignored() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("notes.txt");
        std::fs::write(&path, "hi").expect("write");

        let target = WatchTarget::new(&path);
        assert!(!target.matches(&event_for(canonical_dir.join("other.txt"))));
    }

    #[test]
    fn test_watch_root_for_relative_file_is_dot() {
        assert_eq!(watch_root_for(Path::new("notes.txt")), PathBuf::from("."));
    }

    #[test]
    fn test_real_file_modification_detected() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("watched.txt");
        std::fs::write(&path, "original").expect("write");

        let mut watcher = FileWatcher::new(&path, Duration::from_millis(50)).expect("watcher");
        assert_eq!(watcher.target_path(), path.as_path());

        // Give the backend time to register the watch
        std::thread::sleep(Duration::from_millis(500));
        std::fs::write(&path, "modified").expect("write");

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut detected = false;
        while Instant::now() < deadline {
            if watcher.take_change_ready() {
                detected = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        assert!(detected, "watcher should report the modification within 5 seconds");
    }
}
