//! Settings configuration types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Assistant launch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantSettings {
    /// Base command used to launch the assistant CLI
    #[serde(default = "default_command")]
    pub command: String,

    /// Named command variants: extra arguments appended to the base
    /// command on a fresh launch (e.g. `continue = "--continue"`)
    #[serde(default)]
    pub variants: HashMap<String, String>,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            command: default_command(),
            variants: HashMap::new(),
        }
    }
}

/// Terminal window layout, handed through to the editor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSettings {
    /// Where the editor should place the terminal split
    #[serde(default = "default_position")]
    pub position: String,

    /// Fraction of the screen the terminal split takes
    #[serde(default = "default_split_ratio")]
    pub split_ratio: f32,

    /// Enter direct-input mode as soon as the window opens
    #[serde(default = "default_enter_insert")]
    pub enter_insert: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            position: default_position(),
            split_ratio: default_split_ratio(),
            enter_insert: default_enter_insert(),
        }
    }
}

/// File-change refresh settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshSettings {
    /// Reload clean buffers when their file changes on disk.
    /// Read once at startup; not expected to change while running.
    #[serde(default = "default_auto_reload")]
    pub auto_reload: bool,

    /// Debounce window for bursts of writes to the same file
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Notify the user when a buffer is reloaded
    #[serde(default = "default_show_notifications")]
    pub show_notifications: bool,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            auto_reload: default_auto_reload(),
            debounce_ms: default_debounce_ms(),
            show_notifications: default_show_notifications(),
        }
    }
}

/// Project root resolution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitSettings {
    /// Key sessions on the enclosing git toplevel when one exists.
    /// When false, every session is keyed on the working directory.
    #[serde(default = "default_use_root")]
    pub use_root: bool,
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            use_root: default_use_root(),
        }
    }
}

/// Shell wrapping applied to project-rooted launch commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellSettings {
    /// Token joining the pushd, command, and popd parts
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Command that enters the project root
    #[serde(default = "default_pushd")]
    pub pushd: String,

    /// Command that returns to the previous directory
    #[serde(default = "default_popd")]
    pub popd: String,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            pushd: default_pushd(),
            popd: default_popd(),
        }
    }
}

fn default_command() -> String {
    "claude".to_string()
}

fn default_position() -> String {
    "botright".to_string()
}

fn default_split_ratio() -> f32 {
    0.3
}

fn default_enter_insert() -> bool {
    true
}

fn default_auto_reload() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_show_notifications() -> bool {
    true
}

fn default_use_root() -> bool {
    true
}

fn default_separator() -> String {
    "&&".to_string()
}

fn default_pushd() -> String {
    "pushd".to_string()
}

fn default_popd() -> String {
    "popd".to_string()
}
