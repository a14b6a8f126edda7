//! Resolve command implementation

use anyhow::Result;
use std::path::Path;

use tether::config::Config;
use tether::project;

/// Print the session key a file path resolves to, honoring the project's
/// `[git] use_root` setting.
pub fn resolve_command(work_dir: &Path, file: &Path) -> Result<()> {
    let config = Config::from_dir(work_dir)?;
    let key = project::resolve(file, config.git.use_root);
    println!("{key}");
    Ok(())
}
