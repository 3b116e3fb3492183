//! Well-known per-project file locations and path normalization.

use std::path::{Path, PathBuf};

/// Name of the project-local override file.
pub const CONFIG_FILE_NAME: &str = ".codemaprc";

/// Name of the project ignore-source file.
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Path to the override file for a project root.
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Path to the ignore-source file for a project root.
pub fn gitignore_path(root: &Path) -> PathBuf {
    root.join(GITIGNORE_FILE_NAME)
}

/// Rewrite `\` separators to `/`.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Path of `path` relative to `root`, `/`-separated.
///
/// Returns `None` when `path` does not live under `root`.
pub fn relative_slash_path(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let joined = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    Some(normalize_separators(&joined))
}
