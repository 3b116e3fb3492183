//! Translation of `.gitignore` rules into exclusion patterns.
//!
//! Only a subset of gitignore syntax is understood. Negated rules (`!foo`)
//! are dropped. Root-relative rules (`/foo`) are not anchored: they get the
//! same `**/` prefix as every other rule and so match at any depth.

use crate::paths::gitignore_path;
use std::path::Path;
use tracing::{debug, warn};

/// Dot-files that look like directories by name but are files.
const HIDDEN_FILES: &[&str] = &[
    ".env",
    ".gitignore",
    ".gitattributes",
    ".editorconfig",
    ".prettierrc",
    ".eslintrc",
    ".npmrc",
    ".nvmrc",
    ".dockerignore",
    ".python-version",
    ".ruby-version",
    ".node-version",
];

/// Dot-files recognized as files when they end a multi-segment rule.
const HIDDEN_FILE_SEGMENTS: &[&str] = &[
    ".env",
    ".gitignore",
    ".gitattributes",
    ".editorconfig",
    ".prettierrc",
    ".eslintrc",
    ".npmrc",
    ".nvmrc",
    ".dockerignore",
];

/// Dot-directories recognized when they end a multi-segment rule.
const HIDDEN_DIRS: &[&str] = &[
    ".venv",
    ".git",
    ".svn",
    ".hg",
    ".tox",
    ".nox",
    ".mypy_cache",
    ".pytest_cache",
    ".eggs",
    ".cache",
    ".npm",
    ".yarn",
];

/// Translate one gitignore line into an exclusion pattern.
///
/// Returns `None` for blank lines, comments, and negated rules.
pub fn translate(line: &str) -> Option<String> {
    let line = line.trim_end();
    if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
        return None;
    }

    let (line, is_dir) = match line.strip_suffix('/') {
        Some(rest) => (rest, true),
        None => (line, false),
    };
    let (line, is_root_relative) = match line.strip_prefix('/') {
        Some(rest) => (rest, true),
        None => (line, false),
    };
    // `/` alone names nothing once stripped.
    if line.is_empty() {
        return None;
    }

    if !line.contains('/') {
        return Some(translate_name(line));
    }

    let mut pattern = if is_root_relative || !line.starts_with("**/") {
        format!("**/{line}")
    } else {
        line.to_string()
    };

    if (is_dir || looks_like_directory(&pattern)) && !pattern.ends_with("/**") {
        pattern.push_str("/**");
    }

    Some(pattern)
}

/// Translate a rule with no `/` in it.
fn translate_name(name: &str) -> String {
    if HIDDEN_FILES.contains(&name) {
        return format!("**/{name}");
    }

    let has_wildcard = name.contains('*');
    let has_extension = name.contains('.') && !name.starts_with('.');

    if has_wildcard || has_extension {
        format!("**/{name}")
    } else {
        format!("**/{name}/**")
    }
}

/// Guess whether a multi-segment rule names a directory from its last segment.
fn looks_like_directory(pattern: &str) -> bool {
    let last = pattern
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();

    if last.contains('*') {
        return false;
    }
    if HIDDEN_FILE_SEGMENTS.contains(&last) {
        return false;
    }
    if HIDDEN_DIRS.contains(&last) {
        return true;
    }
    if last.starts_with('.') && last.matches('.').count() == 1 {
        return true;
    }
    !last.contains('.')
}

/// Translate every rule in an ignore document, in order.
pub fn parse(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter_map(translate)
        .collect()
}

/// Read and translate `<root>/.gitignore`.
pub fn read_patterns(root: &Path) -> crate::Result<Vec<String>> {
    let content = std::fs::read_to_string(gitignore_path(root))?;
    Ok(parse(&content))
}

/// Patterns from `<root>/.gitignore`, or none if it is missing or unreadable.
pub fn load_patterns(root: &Path) -> Vec<String> {
    let path = gitignore_path(root);
    if !path.exists() {
        debug!("No ignore file at {}", path.display());
        return Vec::new();
    }

    match read_patterns(root) {
        Ok(patterns) => {
            debug!("Translated {} ignore rules from {}", patterns.len(), path.display());
            patterns
        }
        Err(e) => {
            warn!("Ignoring unreadable {}: {}", path.display(), e);
            Vec::new()
        }
    }
}
