//! Pseudo-terminal channel to the assistant process.
//!
//! [`ProcessSpawner`] and [`AssistantProcess`] are the seam the session
//! core talks through; [`PtySpawner`] is the shipped implementation,
//! running the launch command under the user's shell on a PTY. A reader
//! thread drains the PTY (the process would block on a full buffer
//! otherwise) into a bounded, ANSI-stripped scrollback.

use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{Context, Result, bail};
use portable_pty::{Child, CommandBuilder, MasterPty, PtySize, native_pty_system};
use tracing::debug;

/// A live assistant process reachable through its input channel.
///
/// The channel becomes invalid when the process exits; writes after that
/// fail rather than wait.
pub trait AssistantProcess: Send {
    fn pid(&self) -> Option<u32>;

    /// Whether the process is still alive. Checked lazily by callers;
    /// nothing watches the process proactively.
    fn is_running(&self) -> bool;

    /// Write bytes to the process's input channel.
    fn send_input(&mut self, input: &str) -> Result<()>;
}

/// Creates processes attached to a pseudo-terminal from a command string.
pub trait ProcessSpawner {
    fn spawn(&self, command: &str, cwd: &Path) -> Result<Box<dyn AssistantProcess>>;
}

/// Terminal scrollback - stores the last N lines of output.
#[derive(Debug)]
pub struct ScrollbackBuffer {
    lines: VecDeque<String>,
    max_lines: usize,
}

impl ScrollbackBuffer {
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(max_lines),
            max_lines,
        }
    }

    pub fn push(&mut self, line: String) {
        if self.lines.len() >= self.max_lines {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// The last N lines, oldest first.
    pub fn last_n(&self, n: usize) -> Vec<String> {
        self.lines.iter().rev().take(n).rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Spawns assistant processes on a native PTY under `$SHELL -c`.
pub struct PtySpawner {
    shell: String,
    rows: u16,
    cols: u16,
}

impl PtySpawner {
    pub fn new() -> Self {
        let shell = std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string());
        Self {
            shell,
            rows: 30,
            cols: 100,
        }
    }

    pub fn with_size(mut self, rows: u16, cols: u16) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }
}

impl Default for PtySpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSpawner for PtySpawner {
    fn spawn(&self, command: &str, cwd: &Path) -> Result<Box<dyn AssistantProcess>> {
        let pty_system = native_pty_system();
        let pair = pty_system
            .openpty(PtySize {
                rows: self.rows,
                cols: self.cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .context("Failed to open PTY")?;

        let mut cmd = CommandBuilder::new(&self.shell);
        cmd.arg("-c");
        cmd.arg(command);
        cmd.cwd(cwd);

        let child = pair
            .slave
            .spawn_command(cmd)
            .context("Failed to spawn assistant in PTY")?;
        let reader = pair
            .master
            .try_clone_reader()
            .context("Failed to clone PTY reader")?;
        let writer = pair
            .master
            .take_writer()
            .context("Failed to take PTY writer")?;

        let scrollback = Arc::new(Mutex::new(ScrollbackBuffer::new(200)));
        let running = Arc::new(AtomicBool::new(true));

        let scrollback_clone = scrollback.clone();
        let running_clone = running.clone();
        thread::spawn(move || {
            let buf_reader = BufReader::new(reader);
            for line in buf_reader.lines() {
                match line {
                    Ok(text) => {
                        let clean = strip_ansi_codes(&text);
                        if !clean.trim().is_empty() {
                            if let Ok(mut buf) = scrollback_clone.lock() {
                                buf.push(clean);
                            }
                        }
                    }
                    Err(_) => break,
                }
            }
            running_clone.store(false, Ordering::SeqCst);
        });

        debug!(command, cwd = %cwd.display(), "spawned assistant process");

        Ok(Box::new(PtyProcess {
            scrollback,
            writer,
            _master: pair.master,
            child,
            running,
        }))
    }
}

/// A running PTY-backed assistant process.
pub struct PtyProcess {
    scrollback: Arc<Mutex<ScrollbackBuffer>>,
    writer: Box<dyn Write + Send>,
    // Keeps the master end open for the lifetime of the session.
    _master: Box<dyn MasterPty + Send>,
    child: Box<dyn Child + Send + Sync>,
    running: Arc<AtomicBool>,
}

impl PtyProcess {
    /// The last N lines of ANSI-stripped output.
    pub fn tail(&self, n: usize) -> Vec<String> {
        self.scrollback
            .lock()
            .map(|b| b.last_n(n))
            .unwrap_or_default()
    }
}

impl AssistantProcess for PtyProcess {
    fn pid(&self) -> Option<u32> {
        self.child.process_id()
    }

    fn is_running(&self) -> bool {
        if !self.running.load(Ordering::SeqCst) {
            return false;
        }
        match self.pid() {
            Some(pid) => is_process_alive(pid),
            None => false,
        }
    }

    fn send_input(&mut self, input: &str) -> Result<()> {
        if !self.is_running() {
            bail!("assistant process has exited");
        }
        self.writer.write_all(input.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Check whether a process is alive without signalling it (`kill -0`).
#[cfg(unix)]
pub fn is_process_alive(pid: u32) -> bool {
    unsafe { libc::kill(pid as i32, 0) == 0 }
}

#[cfg(not(unix))]
pub fn is_process_alive(_pid: u32) -> bool {
    true
}

/// Strip ANSI escape codes from a string.
fn strip_ansi_codes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip escape sequence
            if chars.peek() == Some(&'[') {
                chars.next();
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
        } else if c == '\r' {
            // Skip carriage return
        } else if c.is_ascii_control() && c != '\n' && c != '\t' {
            // Skip other control characters
        } else {
            result.push(c);
        }
    }

    result
}
