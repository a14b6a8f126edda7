//! File system watcher feeding the refresh bridge.
//!
//! Wraps a debounced notify watcher and emits [`WatchEvent`]s over a
//! channel the host drains from its event loop. Delivery is
//! at-least-once; ordering across distinct files is not guaranteed.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use notify_debouncer_mini::{DebounceEventResult, DebouncedEventKind, new_debouncer};

/// Events from the file watcher.
#[derive(Debug, Clone)]
pub enum WatchEvent {
    /// A file was modified or created.
    FileChanged(PathBuf),
    /// An error occurred.
    Error(String),
}

/// Watches a project root and reports file changes.
pub struct FileWatcher {
    rx: mpsc::Receiver<WatchEvent>,
    // Kept alive for the lifetime of the watch.
    _watcher: notify_debouncer_mini::Debouncer<notify::RecommendedWatcher>,
}

impl FileWatcher {
    /// Create a new watcher over `root`, debouncing bursts of writes.
    pub fn new(root: &Path, debounce_ms: u64) -> Result<Self> {
        let (tx, rx) = mpsc::channel();

        let tx_clone = tx.clone();
        let mut debouncer = new_debouncer(
            Duration::from_millis(debounce_ms),
            move |res: DebounceEventResult| match res {
                Ok(events) => {
                    for event in events {
                        if matches!(
                            event.kind,
                            DebouncedEventKind::Any | DebouncedEventKind::AnyContinuous
                        ) && is_relevant(&event.path)
                        {
                            let _ = tx_clone.send(WatchEvent::FileChanged(event.path));
                        }
                    }
                }
                Err(e) => {
                    let _ = tx_clone.send(WatchEvent::Error(e.to_string()));
                }
            },
        )?;

        debouncer
            .watcher()
            .watch(root, notify::RecursiveMode::Recursive)?;

        Ok(Self {
            rx,
            _watcher: debouncer,
        })
    }

    /// Try to receive a watch event (non-blocking).
    pub fn try_recv(&self) -> Option<WatchEvent> {
        self.rx.try_recv().ok()
    }
}

/// The bridge reconciles anything the editor may have open, so only
/// hidden paths (VCS internals, our own state directory) and the config
/// file itself are filtered out.
fn is_relevant(path: &Path) -> bool {
    if path.components().any(|c| {
        c.as_os_str()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
    }) {
        return false;
    }

    if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
        if file_name == "tether.toml" {
            return false;
        }
    }

    true
}
