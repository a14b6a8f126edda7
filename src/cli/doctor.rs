//! Doctor command implementation

use anyhow::Result;
use std::path::Path;
use std::process::Command;

use tether::config::Config;
use tether::session::compose;

/// Check the assistant binary and show the launch command every variant
/// would produce.
pub fn doctor_command(work_dir: &Path) -> Result<()> {
    let config = Config::from_dir(work_dir)?;

    let binary = config
        .assistant
        .command
        .split_whitespace()
        .next()
        .unwrap_or_default();

    let available = binary_available(binary);
    println!(
        "assistant binary:  {} ({})",
        binary,
        if available { "found" } else { "NOT FOUND" }
    );
    println!("base command:      {}", config.assistant.command);

    let mut names: Vec<&String> = config.assistant.variants.keys().collect();
    names.sort();
    for name in names {
        println!(
            "variant {:<10} {}",
            name,
            compose(&config.assistant.command, name, &config.assistant.variants)
        );
    }

    println!(
        "auto-reload:       {}",
        if config.refresh.auto_reload { "on" } else { "off" }
    );
    println!(
        "session keying:    {}",
        if config.git.use_root {
            "git toplevel"
        } else {
            "working directory"
        }
    );

    Ok(())
}

fn binary_available(binary: &str) -> bool {
    if binary.is_empty() {
        return false;
    }
    Command::new("which")
        .arg(binary)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
