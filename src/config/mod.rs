//! Configuration loading and management

mod settings;

pub use settings::{
    AssistantSettings, GitSettings, RefreshSettings, ShellSettings, WindowSettings,
};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure. Read-only to the session core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Assistant launch settings
    #[serde(default)]
    pub assistant: AssistantSettings,

    /// Terminal window layout
    #[serde(default)]
    pub window: WindowSettings,

    /// File-change refresh settings
    #[serde(default)]
    pub refresh: RefreshSettings,

    /// Project root resolution settings
    #[serde(default)]
    pub git: GitSettings,

    /// Shell wrapping for project-rooted launches
    #[serde(default)]
    pub shell: ShellSettings,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from a directory
    /// Looks for: .tether/config.toml (preferred) or tether.toml (legacy),
    /// then the user-level config, then built-in defaults
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let new_path = dir.join(".tether/config.toml");
        if new_path.exists() {
            return Self::from_file(&new_path);
        }

        let legacy_path = dir.join("tether.toml");
        if legacy_path.exists() {
            return Self::from_file(&legacy_path);
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Self::from_file(&user_path);
            }
        }

        Ok(Self::with_defaults())
    }

    /// Per-user fallback config: ~/.tether/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".tether").join("config.toml"))
    }

    /// Create a config with sensible defaults
    pub fn with_defaults() -> Self {
        let mut config = Self::default();

        config
            .assistant
            .variants
            .insert("continue".to_string(), "--continue".to_string());
        config
            .assistant
            .variants
            .insert("resume".to_string(), "--resume".to_string());
        config
            .assistant
            .variants
            .insert("verbose".to_string(), "--verbose".to_string());

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_seed_the_standard_variants() {
        let config = Config::with_defaults();
        assert_eq!(config.assistant.command, "claude");
        assert_eq!(
            config.assistant.variants.get("continue").map(String::as_str),
            Some("--continue")
        );
        assert!(config.refresh.auto_reload);
        assert_eq!(config.refresh.debounce_ms, 300);
        assert!(config.git.use_root);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [assistant]
            command = "claude --model opus"

            [refresh]
            auto_reload = false
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.assistant.command, "claude --model opus");
        assert!(!config.refresh.auto_reload);
        assert_eq!(config.shell.separator, "&&");
        assert_eq!(config.window.position, "botright");
    }

    #[test]
    fn from_dir_prefers_the_project_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("tether.toml"),
            "[assistant]\ncommand = \"claude-dev\"\n",
        )
        .expect("write config");

        let config = Config::from_dir(dir.path()).expect("load config");
        assert_eq!(config.assistant.command, "claude-dev");
    }

    #[test]
    fn variants_parse_as_a_plain_table() {
        let config: Config = toml::from_str(
            r#"
            [assistant.variants]
            continue = "--continue"
            ide = "--ide"
            "#,
        )
        .expect("config should parse");

        assert_eq!(
            config.assistant.variants.get("ide").map(String::as_str),
            Some("--ide")
        );
    }
}
