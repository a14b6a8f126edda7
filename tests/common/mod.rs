//! Shared test utilities: a git fixture repo, an in-memory editor, and a
//! recording process spawner.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use tempfile::TempDir;

use tether::config::WindowSettings;
use tether::editor::{BufferId, EditorPort, Severity};
use tether::pty::{AssistantProcess, ProcessSpawner};

/// Creates a temporary git repository for testing
pub fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let repo_path = temp_dir.path();

    Command::new("git")
        .args(["init"])
        .current_dir(repo_path)
        .output()
        .expect("Failed to init git repo");

    Command::new("git")
        .args(["config", "user.email", "test@test.com"])
        .current_dir(repo_path)
        .output()
        .expect("Failed to configure git email");

    Command::new("git")
        .args(["config", "user.name", "Test User"])
        .current_dir(repo_path)
        .output()
        .expect("Failed to configure git name");

    fs::write(repo_path.join("main.rs"), "fn main() {}\n").expect("Failed to write initial file");

    Command::new("git")
        .args(["add", "."])
        .current_dir(repo_path)
        .output()
        .expect("Failed to git add");

    Command::new("git")
        .args(["commit", "-m", "initial"])
        .current_dir(repo_path)
        .output()
        .expect("Failed to git commit");

    temp_dir
}

/// One buffer in the fake editor.
pub struct FakeBuffer {
    pub path: Option<PathBuf>,
    pub content: String,
    pub modified: bool,
    pub valid: bool,
    pub visible: bool,
    pub terminal_pid: Option<u32>,
    pub title: Option<String>,
}

/// In-memory stand-in for the host editor.
#[derive(Default)]
pub struct FakeEditor {
    buffers: HashMap<BufferId, FakeBuffer>,
    next_id: BufferId,
    pub focused: Option<BufferId>,
    pub insert_mode_entries: usize,
    pub notifications: Vec<(Severity, String)>,
    pub current_file: Option<PathBuf>,
}

impl FakeEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a file-backed buffer with the given in-memory content.
    pub fn open_file(&mut self, path: &Path, content: &str) -> BufferId {
        self.next_id += 1;
        let id = self.next_id;
        self.buffers.insert(
            id,
            FakeBuffer {
                path: Some(path.to_path_buf()),
                content: content.to_string(),
                modified: false,
                valid: true,
                visible: true,
                terminal_pid: None,
                title: None,
            },
        );
        id
    }

    pub fn buffer(&self, id: BufferId) -> &FakeBuffer {
        self.buffers.get(&id).expect("buffer should exist")
    }

    /// Simulate unsaved local edits.
    pub fn edit_buffer(&mut self, id: BufferId, content: &str) {
        let buf = self.buffers.get_mut(&id).expect("buffer should exist");
        buf.content = content.to_string();
        buf.modified = true;
    }

    /// Simulate the editor discarding a buffer (e.g. `:bdelete`).
    pub fn invalidate(&mut self, id: BufferId) {
        if let Some(buf) = self.buffers.get_mut(&id) {
            buf.valid = false;
        }
    }

    /// Number of live terminal buffers.
    pub fn terminal_count(&self) -> usize {
        self.buffers
            .values()
            .filter(|b| b.valid && b.terminal_pid.is_some())
            .count()
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.notifications
            .iter()
            .filter(|(sev, _)| *sev == Severity::Warn)
            .map(|(_, msg)| msg.as_str())
            .collect()
    }
}

impl EditorPort for FakeEditor {
    fn create_terminal(
        &mut self,
        title: &str,
        pid: Option<u32>,
        _window: &WindowSettings,
    ) -> Result<BufferId> {
        self.next_id += 1;
        let id = self.next_id;
        self.buffers.insert(
            id,
            FakeBuffer {
                path: None,
                content: String::new(),
                modified: false,
                valid: true,
                visible: true,
                terminal_pid: pid,
                title: Some(title.to_string()),
            },
        );
        self.focused = Some(id);
        Ok(id)
    }

    fn buffer_is_valid(&self, buffer: BufferId) -> bool {
        self.buffers.get(&buffer).map(|b| b.valid).unwrap_or(false)
    }

    fn buffer_path(&self, buffer: BufferId) -> Option<PathBuf> {
        self.buffers
            .get(&buffer)
            .filter(|b| b.valid)
            .and_then(|b| b.path.clone())
    }

    fn buffer_modified(&self, buffer: BufferId) -> bool {
        self.buffers
            .get(&buffer)
            .map(|b| b.modified)
            .unwrap_or(false)
    }

    fn reload_buffer(&mut self, buffer: BufferId) -> Result<()> {
        let Some(buf) = self.buffers.get_mut(&buffer) else {
            bail!("no such buffer");
        };
        let Some(path) = buf.path.clone() else {
            bail!("buffer has no backing file");
        };
        buf.content = fs::read_to_string(&path)?;
        buf.modified = false;
        Ok(())
    }

    fn buffers_for_path(&self, path: &Path) -> Vec<BufferId> {
        let wanted = canonical(path);
        let mut ids: Vec<BufferId> = self
            .buffers
            .iter()
            .filter(|(_, b)| b.valid)
            .filter(|(_, b)| {
                b.path
                    .as_deref()
                    .map(|p| canonical(p) == wanted)
                    .unwrap_or(false)
            })
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    fn window_visible(&self, buffer: BufferId) -> bool {
        self.buffers
            .get(&buffer)
            .map(|b| b.valid && b.visible)
            .unwrap_or(false)
    }

    fn show_window(&mut self, buffer: BufferId, _window: &WindowSettings) {
        if let Some(buf) = self.buffers.get_mut(&buffer) {
            buf.visible = true;
        }
    }

    fn hide_window(&mut self, buffer: BufferId) {
        if let Some(buf) = self.buffers.get_mut(&buffer) {
            buf.visible = false;
        }
        if self.focused == Some(buffer) {
            self.focused = None;
        }
    }

    fn focus_window(&mut self, buffer: BufferId) {
        if let Some(buf) = self.buffers.get_mut(&buffer) {
            buf.visible = true;
            self.focused = Some(buffer);
        }
    }

    fn enter_insert_mode(&mut self) {
        self.insert_mode_entries += 1;
    }

    fn current_file(&self) -> Option<PathBuf> {
        self.current_file.clone()
    }

    fn notify(&mut self, severity: Severity, message: &str) {
        self.notifications.push((severity, message.to_string()));
    }
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Shared, inspectable state of one fake assistant process.
pub struct FakeProcessState {
    pub pid: u32,
    pub running: bool,
    pub sent: Vec<String>,
}

struct FakeProcess {
    state: Arc<Mutex<FakeProcessState>>,
}

impl AssistantProcess for FakeProcess {
    fn pid(&self) -> Option<u32> {
        Some(self.state.lock().unwrap().pid)
    }

    fn is_running(&self) -> bool {
        self.state.lock().unwrap().running
    }

    fn send_input(&mut self, input: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.running {
            bail!("assistant process has exited");
        }
        state.sent.push(input.to_string());
        Ok(())
    }
}

/// Everything recorded about one spawn call.
pub struct SpawnRecord {
    pub command: String,
    pub cwd: PathBuf,
    pub state: Arc<Mutex<FakeProcessState>>,
}

/// Recording spawner handing out fake processes.
#[derive(Default)]
pub struct FakeSpawner {
    next_pid: AtomicU32,
    pub spawned: Arc<Mutex<Vec<SpawnRecord>>>,
}

impl FakeSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the spawn log, shared with the spawner after it is boxed.
    pub fn log(&self) -> Arc<Mutex<Vec<SpawnRecord>>> {
        self.spawned.clone()
    }
}

impl ProcessSpawner for FakeSpawner {
    fn spawn(&self, command: &str, cwd: &Path) -> Result<Box<dyn AssistantProcess>> {
        let pid = 1000 + self.next_pid.fetch_add(1, Ordering::SeqCst);
        let state = Arc::new(Mutex::new(FakeProcessState {
            pid,
            running: true,
            sent: Vec::new(),
        }));
        self.spawned.lock().unwrap().push(SpawnRecord {
            command: command.to_string(),
            cwd: cwd.to_path_buf(),
            state: state.clone(),
        });
        Ok(Box::new(FakeProcess { state }))
    }
}
