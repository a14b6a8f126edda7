//! The seam between this crate and the host editor.
//!
//! Everything the session core needs from the editor goes through
//! [`EditorPort`]: buffer validity and identity, terminal window
//! creation and visibility, reloads, and user-facing notifications.
//! The host supplies the implementation; the core never talks to
//! rendering, keymaps, or command registration directly.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::WindowSettings;

/// Opaque handle into the editor's buffer space.
///
/// The core never owns buffer lifecycle; it only tracks handles and asks
/// the editor whether they are still live.
pub type BufferId = u64;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

pub trait EditorPort {
    /// Create a terminal buffer and window for an assistant process and
    /// make it visible and focused. `pid` is attached to the window's
    /// input channel when the editor supports it.
    fn create_terminal(
        &mut self,
        title: &str,
        pid: Option<u32>,
        window: &WindowSettings,
    ) -> Result<BufferId>;

    /// Whether the buffer handle still refers to a live buffer.
    fn buffer_is_valid(&self, buffer: BufferId) -> bool;

    /// The file path backing the buffer, if any.
    fn buffer_path(&self, buffer: BufferId) -> Option<PathBuf>;

    /// Whether the buffer has unsaved local modifications.
    fn buffer_modified(&self, buffer: BufferId) -> bool;

    /// Reload the buffer's content from disk.
    fn reload_buffer(&mut self, buffer: BufferId) -> Result<()>;

    /// All live buffers currently backed by `path`.
    fn buffers_for_path(&self, path: &Path) -> Vec<BufferId>;

    /// Whether any window currently displays the buffer.
    fn window_visible(&self, buffer: BufferId) -> bool;

    /// Show the buffer in a window laid out per `window`.
    fn show_window(&mut self, buffer: BufferId, window: &WindowSettings);

    /// Hide every window displaying the buffer. The buffer stays alive.
    fn hide_window(&mut self, buffer: BufferId);

    /// Move focus to the window displaying the buffer.
    fn focus_window(&mut self, buffer: BufferId);

    /// Switch the focused window into direct-input (terminal insert) mode.
    fn enter_insert_mode(&mut self);

    /// The file behind the currently focused buffer, if any.
    fn current_file(&self) -> Option<PathBuf>;

    /// Surface a message to the user.
    fn notify(&mut self, severity: Severity, message: &str);
}
