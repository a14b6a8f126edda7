use std::fmt;
use std::path::{Path, PathBuf};

/// Canonical identifier for a project session.
///
/// Wraps the resolved project root (or the working directory when no root
/// could be discovered). Comparison is component-based, so trailing
/// separators never produce distinct keys; symlink differences are
/// collapsed during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectKey(PathBuf);

impl ProjectKey {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self(root.into())
    }

    /// The project root this key identifies.
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Short human-readable name (the root's final component).
    pub fn name(&self) -> String {
        self.0
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| self.0.display().to_string())
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl From<&Path> for ProjectKey {
    fn from(path: &Path) -> Self {
        Self(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_separator_does_not_change_the_key() {
        let a = ProjectKey::new("/tmp/project");
        let b = ProjectKey::new("/tmp/project/");
        assert_eq!(a, b);
    }

    #[test]
    fn name_is_the_final_component() {
        let key = ProjectKey::new("/home/user/src/widgets");
        assert_eq!(key.name(), "widgets");
    }
}
