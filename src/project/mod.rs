//! Project identity resolution.
//!
//! Maps an arbitrary file path to the [`ProjectKey`] its session is
//! addressed by: the enclosing git toplevel when one exists, otherwise the
//! current working directory. Resolution never fails; absence of version
//! control is a normal case.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::ProjectKey;

/// Find the git repository root for a given path.
/// Returns None if the path is not inside a git repository.
pub fn find_git_root(path: &Path) -> Option<PathBuf> {
    let start_dir = if path.is_file() { path.parent()? } else { path };

    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(start_dir)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if root.is_empty() {
        None
    } else {
        Some(PathBuf::from(root))
    }
}

/// Resolve the session key for a path.
///
/// With `use_git_root` set, paths under the same repository (including
/// separate worktrees, which each have their own toplevel) collapse to one
/// key. Without it, or when no repository encloses the path, the key is
/// the canonical working directory.
pub fn resolve(path: &Path, use_git_root: bool) -> ProjectKey {
    if use_git_root {
        if let Some(root) = find_git_root(path) {
            return ProjectKey::new(canonical(&root));
        }
        debug!(path = %path.display(), "no git root; keying on working directory");
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    ProjectKey::new(canonical(&cwd))
}

/// Canonicalize, collapsing symlinks and relative components. Paths that
/// cannot be canonicalized (e.g. not yet on disk) are used as given.
fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
