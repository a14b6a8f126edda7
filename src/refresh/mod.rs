//! Reconciles external file changes with open editor buffers.
//!
//! Driven by the editor's file-watch events: for every changed path the
//! bridge decides, per matching buffer, whether it is safe to reload from
//! disk. Unsaved local edits are never overwritten. Decisions are
//! transient; re-evaluating the same path is harmless.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::RefreshSettings;
use crate::editor::{BufferId, EditorPort, Severity};
use crate::watcher::{FileWatcher, WatchEvent};

/// Per-buffer outcome of one external change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshDecision {
    /// The buffer is clean; its content was reloaded from disk.
    Reload,
    /// The buffer has unsaved modifications; left untouched, user warned.
    SkipUnsavedConflict,
    /// The buffer does not correspond to the changed path.
    SkipUnaffected,
}

pub struct RefreshBridge {
    settings: RefreshSettings,
}

impl RefreshBridge {
    pub fn new(settings: RefreshSettings) -> Self {
        Self { settings }
    }

    /// Whether file-change-driven reload is active at all. Initialized
    /// once at startup from configuration.
    pub fn enabled(&self) -> bool {
        self.settings.auto_reload
    }

    /// Decide what to do with one buffer for a changed path. Pure with
    /// respect to editor state: nothing is mutated here.
    pub fn decide(editor: &dyn EditorPort, buffer: BufferId, path: &Path) -> RefreshDecision {
        match editor.buffer_path(buffer) {
            Some(buffer_path) if paths_match(&buffer_path, path) => {
                if editor.buffer_modified(buffer) {
                    RefreshDecision::SkipUnsavedConflict
                } else {
                    RefreshDecision::Reload
                }
            }
            _ => RefreshDecision::SkipUnaffected,
        }
    }

    /// Handle one external change notification for `path`.
    ///
    /// Returns the decision taken for each matching buffer; an empty
    /// result means no open buffer was affected (or auto-reload is off).
    pub fn on_external_change(
        &self,
        editor: &mut dyn EditorPort,
        path: &Path,
    ) -> Vec<(BufferId, RefreshDecision)> {
        if !self.settings.auto_reload {
            return Vec::new();
        }

        let mut outcomes = Vec::new();
        for buffer in editor.buffers_for_path(path) {
            let decision = Self::decide(&*editor, buffer, path);
            match decision {
                RefreshDecision::Reload => {
                    if let Err(err) = editor.reload_buffer(buffer) {
                        warn!(path = %path.display(), error = %err, "buffer reload failed");
                    } else {
                        debug!(path = %path.display(), buffer, "reloaded buffer from disk");
                        if self.settings.show_notifications {
                            editor.notify(
                                Severity::Info,
                                &format!("reloaded {} from disk", path.display()),
                            );
                        }
                    }
                }
                RefreshDecision::SkipUnsavedConflict => {
                    // Non-fatal: the warning is the whole point, the
                    // buffer content is left alone.
                    editor.notify(
                        Severity::Warn,
                        &format!(
                            "{} changed on disk but has unsaved edits; not reloading",
                            path.display()
                        ),
                    );
                }
                RefreshDecision::SkipUnaffected => {}
            }
            outcomes.push((buffer, decision));
        }
        outcomes
    }

    /// Drain pending watcher events into the bridge. Called from the
    /// host's event loop; returns how many change events were handled.
    pub fn drain(&self, watcher: &FileWatcher, editor: &mut dyn EditorPort) -> usize {
        let mut handled = 0;
        while let Some(event) = watcher.try_recv() {
            match event {
                WatchEvent::FileChanged(path) => {
                    self.on_external_change(editor, &path);
                    handled += 1;
                }
                WatchEvent::Error(err) => {
                    warn!(error = %err, "file watcher reported an error");
                }
            }
        }
        handled
    }
}

/// Path equality for buffer matching: canonical where possible so the
/// watcher and the editor can disagree about symlinks or relative parts.
fn paths_match(a: &Path, b: &Path) -> bool {
    canonical(a) == canonical(b)
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
