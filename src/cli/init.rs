//! Init command implementation

use anyhow::{Context, Result, bail};
use std::path::Path;
use tracing::info;

/// Default configuration content for tether init
pub const DEFAULT_CONFIG: &str = r#"# Tether Configuration
# ====================
#
# Tether opens one assistant terminal session per project root and keeps
# your editor's buffers in sync with changes the assistant makes on disk.

# The assistant CLI and its launch variants.
#
# Available options:
#   command  - Base command used to launch the assistant (default: "claude")
#   variants - Named extra arguments layered onto the base command.
#              Variants only affect fresh launches; a running session
#              keeps the command it was started with.
[assistant]
command = "claude"

[assistant.variants]
continue = "--continue"
resume = "--resume"
verbose = "--verbose"

# Terminal window layout (interpreted by the editor).
#
# Available options:
#   position     - Placement of the terminal split (default: "botright")
#   split_ratio  - Fraction of the screen the split takes (default: 0.3)
#   enter_insert - Enter direct-input mode when the window opens (default: true)
[window]
position = "botright"
split_ratio = 0.3
enter_insert = true

# Reloading buffers when files change on disk.
#
# Available options:
#   auto_reload        - Reload clean buffers automatically (default: true)
#   debounce_ms        - Debounce window for write bursts (default: 300)
#   show_notifications - Announce reloads (default: true)
#
# Buffers with unsaved edits are never reloaded, only warned about.
[refresh]
auto_reload = true
debounce_ms = 300
show_notifications = true

# Session addressing.
#
#   use_root - Key sessions on the enclosing git toplevel (default: true).
#              When false, sessions are keyed on the working directory.
[git]
use_root = true

# Shell wrapping for project-rooted launches:
#   <pushd> <root> <separator> <command> <separator> <popd>
[shell]
separator = "&&"
pushd = "pushd"
popd = "popd"
"#;

/// Write the default configuration to `<dir>/.tether/config.toml`.
pub fn init_command(dir: &Path, force: bool) -> Result<()> {
    let config_dir = dir.join(".tether");
    let config_path = config_dir.join("config.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            config_path.display()
        );
    }

    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory {}", config_dir.display()))?;
    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    info!(path = %config_path.display(), "wrote default config");
    println!("Created {}", config_path.display());
    Ok(())
}
