//! Tether - drive an AI assistant CLI from your editor
//!
//! Tether manages one interactive assistant terminal session per project
//! root. The host editor calls [`session::SessionManager`] to toggle,
//! focus, and feed sessions; the [`refresh::RefreshBridge`] keeps the
//! assistant's view of the project consistent with files changing on disk
//! by reconciling watcher events against open buffers.
//!
//! The editor itself stays behind the [`editor::EditorPort`] seam: tether
//! owns processes and session state, never windows or buffers.

pub mod config;
pub mod domain;
pub mod editor;
pub mod project;
pub mod pty;
pub mod refresh;
pub mod session;
pub mod watcher;

pub use domain::*;
