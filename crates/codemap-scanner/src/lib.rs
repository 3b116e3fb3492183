//! codemap-scanner: Source file discovery.
//!
//! Walks a project root, keeps files whose suffix belongs to a configured
//! language, and drops those matched by the exclusion patterns. Files are
//! produced lazily in file-name order.

use codemap_core::languages::{self, Language};
use codemap_core::paths::relative_slash_path;
use codemap_core::{Config, ExclusionSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// A source file selected for symbol extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Path as visited, i.e. joined onto the scan root.
    pub path: PathBuf,
    /// Path relative to the scan root, `/`-separated.
    pub relative_path: String,
    pub language: Language,
}

/// File discovery configured from a [`Config`].
pub struct Walker {
    config: Config,
    languages: Option<Vec<String>>,
}

impl Walker {
    /// Create a new walker with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            languages: None,
        }
    }

    /// Index these languages instead of the configured ones.
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    /// Start a fresh walk of `root`.
    pub fn discover(&self, root: &Path) -> Discover {
        let names = self.languages.as_ref().unwrap_or(&self.config.languages);
        Discover::new(root, languages::resolve(names), self.config.exclusion_set())
    }
}

/// Walk `root` with the languages and exclusions of `config`.
pub fn discover(root: &Path, config: &Config) -> Discover {
    Discover::new(root, config.resolved_languages(), config.exclusion_set())
}

/// Lazy iterator over the files of one walk.
///
/// Dropping it ends the walk. Calling [`discover`] again starts over.
pub struct Discover {
    root: PathBuf,
    entries: walkdir::IntoIter,
    languages: Vec<Language>,
    exclusions: ExclusionSet,
    found: usize,
    finished: bool,
}

impl Discover {
    fn new(root: &Path, languages: Vec<Language>, exclusions: ExclusionSet) -> Self {
        info!("Discovering files under {}", root.display());
        debug!(
            "Languages: {:?}, {} exclusion patterns",
            languages,
            exclusions.len()
        );

        let entries = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        Self {
            root: root.to_path_buf(),
            entries,
            languages,
            exclusions,
            found: 0,
            finished: false,
        }
    }

    /// Language of `path` by suffix, if it is one being indexed.
    fn language_of(&self, path: &Path) -> Option<Language> {
        let ext = path.extension()?.to_str()?;
        let language = languages::language_for(&format!(".{ext}"))?;
        self.languages.contains(&language).then_some(language)
    }
}

impl Iterator for Discover {
    type Item = DiscoveredFile;

    fn next(&mut self) -> Option<DiscoveredFile> {
        loop {
            let entry = match self.entries.next() {
                Some(Ok(entry)) => entry,
                Some(Err(e)) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
                None => {
                    if !self.finished {
                        self.finished = true;
                        info!("Discovery complete: {} files", self.found);
                    }
                    return None;
                }
            };

            if entry.depth() == 0 {
                continue;
            }

            let file_type = entry.file_type();

            if file_type.is_dir() {
                let excluded = relative_slash_path(entry.path(), &self.root)
                    .is_some_and(|rel| self.exclusions.excludes_dir(&rel));
                if excluded {
                    debug!("Pruning excluded directory {}", entry.path().display());
                    self.entries.skip_current_dir();
                }
                continue;
            }

            if !file_type.is_file() {
                continue;
            }

            let Some(language) = self.language_of(entry.path()) else {
                continue;
            };

            let Some(relative_path) = relative_slash_path(entry.path(), &self.root) else {
                debug!("{} is not under the scan root", entry.path().display());
                continue;
            };

            if self.exclusions.is_excluded(&relative_path) {
                debug!("Excluded {}", relative_path);
                continue;
            }

            self.found += 1;
            return Some(DiscoveredFile {
                path: entry.into_path(),
                relative_path,
                language,
            });
        }
    }
}

/// Count the lines of a file. Unreadable files count as empty.
///
/// `\n`, `\r\n` and a lone `\r` each end a line.
pub fn count_lines(path: &Path) -> usize {
    match std::fs::read(path) {
        Ok(bytes) => count_line_breaks(&bytes),
        Err(e) => {
            debug!("Cannot count lines of {}: {}", path.display(), e);
            0
        }
    }
}

fn count_line_breaks(bytes: &[u8]) -> usize {
    let mut lines = 0;
    let mut iter = bytes.iter().peekable();
    while let Some(&b) = iter.next() {
        match b {
            b'\n' => lines += 1,
            b'\r' => {
                iter.next_if_eq(&&b'\n');
                lines += 1;
            }
            _ => {}
        }
    }
    match bytes.last() {
        Some(b'\n' | b'\r') | None => lines,
        Some(_) => lines + 1,
    }
}
