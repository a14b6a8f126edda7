//! The per-instance toggle/open/focus state machine.
//!
//! All mutation of session state flows through here: the manager owns the
//! [`InstanceRegistry`] and a [`ProcessSpawner`], and is handed the
//! editor seam on every call. Launch and visibility requests are
//! fire-and-forget; failures are detected lazily on the next interaction.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;
use crate::domain::{ProjectKey, SessionError, WindowState};
use crate::editor::{BufferId, EditorPort, Severity};
use crate::project;
use crate::pty::ProcessSpawner;

use super::command::{compose, wrap_for_root};
use super::instance::Instance;
use super::registry::InstanceRegistry;

/// What a toggle ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A fresh process was launched and its window focused.
    Launched,
    /// An existing hidden session was made visible and focused.
    Shown,
    /// A visible session's window was hidden; the process stays alive.
    Hidden,
}

pub struct SessionManager {
    config: Config,
    registry: InstanceRegistry,
    spawner: Box<dyn ProcessSpawner>,
}

impl SessionManager {
    pub fn new(config: Config, spawner: Box<dyn ProcessSpawner>) -> Self {
        Self {
            config,
            registry: InstanceRegistry::new(),
            spawner,
        }
    }

    /// Show, hide, or create the session for the project owning `path`
    /// (the editor's current file when `path` is `None`).
    ///
    /// Repeated toggles with no other state change cycle the window
    /// between hidden and focused without ever duplicating the process.
    pub fn toggle(
        &mut self,
        editor: &mut dyn EditorPort,
        path: Option<&Path>,
    ) -> Result<ToggleOutcome, SessionError> {
        let command = self.config.assistant.command.clone();
        self.toggle_command(editor, path, command)
    }

    /// Like [`toggle`](Self::toggle), but a fresh launch uses the named
    /// command variant. A session that is already running is toggled
    /// without altering the command it was started with.
    pub fn toggle_with_variant(
        &mut self,
        editor: &mut dyn EditorPort,
        path: Option<&Path>,
        variant: &str,
    ) -> Result<ToggleOutcome, SessionError> {
        let command = compose(
            &self.config.assistant.command,
            variant,
            &self.config.assistant.variants,
        );
        self.toggle_command(editor, path, command)
    }

    fn toggle_command(
        &mut self,
        editor: &mut dyn EditorPort,
        path: Option<&Path>,
        command: String,
    ) -> Result<ToggleOutcome, SessionError> {
        let key = self.resolve_key(editor, path);

        let existing = self
            .registry
            .get(&key, &*editor)
            .map(|instance| (instance.buffer(), instance.process_running()));

        match existing {
            Some((buffer, true)) => {
                let outcome = if editor.window_visible(buffer) {
                    editor.hide_window(buffer);
                    debug!(key = %key, "hiding assistant window");
                    ToggleOutcome::Hidden
                } else {
                    editor.show_window(buffer, &self.config.window);
                    editor.focus_window(buffer);
                    debug!(key = %key, "showing assistant window");
                    ToggleOutcome::Shown
                };
                if let Some(instance) = self.registry.get(&key, &*editor) {
                    instance.window_state = match outcome {
                        ToggleOutcome::Hidden => WindowState::Closed,
                        _ => WindowState::Focused,
                    };
                }
                self.registry.set_current(&key);
                Ok(outcome)
            }
            Some((buffer, false)) => {
                // Process exited out-of-band: the entry is stale even if
                // the editor still reports a window for it.
                warn!(key = %key, "assistant process exited; relaunching");
                if editor.window_visible(buffer) {
                    editor.hide_window(buffer);
                }
                self.registry.remove(&key);
                self.launch(editor, key, &command)?;
                Ok(ToggleOutcome::Launched)
            }
            None => {
                self.launch(editor, key, &command)?;
                Ok(ToggleOutcome::Launched)
            }
        }
    }

    /// Deliver `text` to the session owning `file_path`, creating the
    /// session first if none is live.
    ///
    /// Payload problems (`NothingToSend`) are checked before any session
    /// is created, so a bad send never leaves a new process behind.
    pub fn send_text(
        &mut self,
        editor: &mut dyn EditorPort,
        file_path: &Path,
        text: &str,
    ) -> Result<(), SessionError> {
        if text.trim().is_empty() {
            let err = SessionError::nothing_to_send("empty payload");
            editor.notify(Severity::Warn, &err.to_string());
            return Err(err);
        }
        if file_path.as_os_str().is_empty() {
            let err = SessionError::nothing_to_send("no file path given");
            editor.notify(Severity::Warn, &err.to_string());
            return Err(err);
        }
        if file_path.is_dir() {
            let err = SessionError::nothing_to_send(format!(
                "{} is a directory, not a file",
                file_path.display()
            ));
            editor.notify(Severity::Warn, &err.to_string());
            return Err(err);
        }

        let key = self.resolve_key(editor, Some(file_path));

        if self.registry.get(&key, &*editor).is_none() {
            let command = self.config.assistant.command.clone();
            self.launch(editor, key.clone(), &command)?;
        }

        let Some(instance) = self.registry.get(&key, &*editor) else {
            return Err(SessionError::NoChannel);
        };

        if !instance.process_running() {
            warn!(key = %key, "send aborted: assistant process is gone");
            editor.notify(
                Severity::Warn,
                "assistant session is no longer accepting input",
            );
            return Err(SessionError::NoChannel);
        }

        if let Err(err) = instance.send_input(text) {
            warn!(key = %key, error = %err, "failed to write to assistant channel");
            editor.notify(
                Severity::Warn,
                "assistant session is no longer accepting input",
            );
            return Err(SessionError::NoChannel);
        }

        let buffer = instance.buffer();
        instance.window_state = WindowState::Focused;

        if !editor.window_visible(buffer) {
            editor.show_window(buffer, &self.config.window);
        }
        editor.focus_window(buffer);
        editor.enter_insert_mode();
        self.registry.set_current(&key);
        Ok(())
    }

    /// Send a file mention (`@<path relative to the project root>`) to the
    /// session owning `path`.
    pub fn send_file(
        &mut self,
        editor: &mut dyn EditorPort,
        path: &Path,
    ) -> Result<(), SessionError> {
        let key = self.resolve_key(editor, Some(path));
        let mention = path.strip_prefix(key.as_path()).unwrap_or(path);
        let text = format!("@{}\n", mention.display());
        self.send_text(editor, path, &text)
    }

    /// The terminal buffer of the most recently addressed session, if it
    /// is still live.
    pub fn current_buffer(&mut self, editor: &dyn EditorPort) -> Option<BufferId> {
        let key = self.registry.current()?.clone();
        self.registry
            .get(&key, editor)
            .map(|instance| instance.buffer())
    }

    pub fn current_key(&self) -> Option<&ProjectKey> {
        self.registry.current()
    }

    pub fn session_count(&self) -> usize {
        self.registry.len()
    }

    pub fn has_session(&self, key: &ProjectKey) -> bool {
        self.registry.contains(key)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Launch a fresh process for `key`, register it, and focus its
    /// window. The launch itself is fire-and-forget: success here means
    /// the process and window were created, not that the assistant is up.
    fn launch(
        &mut self,
        editor: &mut dyn EditorPort,
        key: ProjectKey,
        command: &str,
    ) -> Result<(), SessionError> {
        let full_command = wrap_for_root(command, key.as_path(), &self.config.shell);

        let process = self
            .spawner
            .spawn(&full_command, key.as_path())
            .map_err(SessionError::Launch)?;

        let title = format!("assistant [{}]", key.name());
        let buffer = editor
            .create_terminal(&title, process.pid(), &self.config.window)
            .map_err(SessionError::Launch)?;

        debug!(key = %key, buffer, pid = ?process.pid(), "launched assistant session");

        let mut instance = Instance::new(key.clone(), buffer, process);
        instance.window_state = WindowState::Focused;
        self.registry.put(key.clone(), instance);
        self.registry.set_current(&key);

        editor.focus_window(buffer);
        if self.config.window.enter_insert {
            editor.enter_insert_mode();
        }
        Ok(())
    }

    fn resolve_key(&self, editor: &dyn EditorPort, path: Option<&Path>) -> ProjectKey {
        let target = path.map(Path::to_path_buf).or_else(|| editor.current_file());
        match target {
            Some(p) => project::resolve(&p, self.config.git.use_root),
            None => {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                project::resolve(&cwd, self.config.git.use_root)
            }
        }
    }
}
