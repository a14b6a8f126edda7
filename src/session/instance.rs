//! One managed assistant session bound to a project root.

use anyhow::Result;

use crate::domain::{ProjectKey, WindowState};
use crate::editor::BufferId;
use crate::pty::AssistantProcess;

/// A live terminal session: exclusive owner of its process handle, weak
/// tracker of its editor buffer.
///
/// The buffer belongs to the editor; the instance only remembers the
/// handle so the registry can confirm it is still live on access.
pub struct Instance {
    key: ProjectKey,
    buffer: BufferId,
    process: Box<dyn AssistantProcess>,
    pub window_state: WindowState,
}

impl Instance {
    pub fn new(key: ProjectKey, buffer: BufferId, process: Box<dyn AssistantProcess>) -> Self {
        Self {
            key,
            buffer,
            process,
            window_state: WindowState::Open,
        }
    }

    pub fn key(&self) -> &ProjectKey {
        &self.key
    }

    pub fn buffer(&self) -> BufferId {
        self.buffer
    }

    pub fn pid(&self) -> Option<u32> {
        self.process.pid()
    }

    /// Whether the underlying process is still alive. Lazy: only called
    /// on access, never from a background watcher.
    pub fn process_running(&self) -> bool {
        self.process.is_running()
    }

    /// Deliver text to the process's input channel.
    pub fn send_input(&mut self, text: &str) -> Result<()> {
        self.process.send_input(text)
    }
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("key", &self.key)
            .field("buffer", &self.buffer)
            .field("pid", &self.pid())
            .field("window_state", &self.window_state)
            .finish()
    }
}
