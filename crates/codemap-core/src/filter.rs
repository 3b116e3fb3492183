//! Path filtering against exclusion patterns.
//!
//! Patterns use `/`-separated segments. A segment is either `**`, matching
//! zero or more whole path segments, or a single-segment glob where `*` and
//! `?` never cross a `/`. Matching is case-sensitive and a leading `.` is
//! not special.

use crate::paths::normalize_separators;
use glob::{MatchOptions, Pattern};

const SEGMENT_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// One `/`-delimited piece of a compiled pattern.
#[derive(Debug, Clone)]
enum Segment {
    /// `**`
    AnyDepth,
    Glob(Pattern),
    /// Text the glob syntax rejects (e.g. an unclosed `[`); compared verbatim.
    Literal(String),
}

impl Segment {
    fn parse(text: &str) -> Self {
        if text == "**" {
            return Segment::AnyDepth;
        }
        match Pattern::new(&collapse_stars(text)) {
            Ok(pattern) => Segment::Glob(pattern),
            Err(_) => Segment::Literal(text.to_string()),
        }
    }

    fn matches(&self, segment: &str) -> bool {
        match self {
            Segment::AnyDepth => true,
            Segment::Glob(pattern) => pattern.matches_with(segment, SEGMENT_OPTIONS),
            Segment::Literal(text) => text == segment,
        }
    }
}

/// Fold runs of `*` into one; within a segment `**` means the same as `*`.
fn collapse_stars(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '*' && out.ends_with('*') {
            continue;
        }
        out.push(c);
    }
    out
}

/// A compiled exclusion pattern.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    segments: Vec<Segment>,
}

impl GlobPattern {
    /// Compile a pattern. Never fails; `\` separators are treated as `/`.
    pub fn new(pattern: &str) -> Self {
        let source = normalize_separators(pattern);
        let segments = source.split('/').map(Segment::parse).collect();
        Self { source, segments }
    }

    /// The normalized pattern text.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// `true` if the pattern contains a `**` segment.
    pub fn has_any_depth(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::AnyDepth))
    }

    /// Match a `/`-separated relative path.
    pub fn matches(&self, path: &str) -> bool {
        let path = normalize_separators(path);
        let parts: Vec<&str> = path.split('/').collect();
        self.matches_parts(&parts)
    }

    /// Match pre-split path segments.
    ///
    /// `table[i][j]` holds whether `parts[i..]` matches `segments[j..]`,
    /// filled from the back so each pair is evaluated once.
    fn matches_parts(&self, parts: &[&str]) -> bool {
        if !self.has_any_depth() {
            return parts.len() == self.segments.len()
                && self
                    .segments
                    .iter()
                    .zip(parts)
                    .all(|(seg, part)| seg.matches(part));
        }

        let n = parts.len();
        let m = self.segments.len();
        let mut table = vec![vec![false; m + 1]; n + 1];

        table[n][m] = true;
        for j in (0..m).rev() {
            table[n][j] = matches!(self.segments[j], Segment::AnyDepth) && table[n][j + 1];
        }

        for i in (0..n).rev() {
            for j in (0..m).rev() {
                table[i][j] = match &self.segments[j] {
                    Segment::AnyDepth => table[i][j + 1] || table[i + 1][j],
                    seg => seg.matches(parts[i]) && table[i + 1][j + 1],
                };
            }
        }

        table[0][0]
    }

    /// For a `<prefix>/**` pattern, whether `<prefix>` matches `dir`.
    ///
    /// When it does, every path below `dir` matches the full pattern.
    pub fn covers_dir(&self, dir: &str) -> bool {
        let Some((Segment::AnyDepth, prefix)) = self.segments.split_last() else {
            return false;
        };
        if prefix.is_empty() {
            return false;
        }
        let prefix = GlobPattern {
            source: String::new(),
            segments: prefix.to_vec(),
        };
        prefix.matches(dir)
    }
}

impl PartialEq for GlobPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for GlobPattern {}

/// Return `true` if `path` matches `pattern`.
pub fn matches(path: &str, pattern: &str) -> bool {
    GlobPattern::new(pattern).matches(path)
}

/// Return `true` if `path` matches any of `patterns`.
pub fn matches_any<S: AsRef<str>>(path: &str, patterns: &[S]) -> bool {
    patterns.iter().any(|p| matches(path, p.as_ref()))
}

/// Ordered collection of compiled exclusion patterns.
///
/// A path is excluded when it matches any pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    patterns: Vec<GlobPattern>,
}

impl ExclusionSet {
    /// Compile an exclusion set from raw pattern strings.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self {
            patterns: patterns.iter().map(|p| GlobPattern::new(p.as_ref())).collect(),
        }
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[GlobPattern] {
        &self.patterns
    }

    /// Return `true` if a relative file path should be excluded.
    pub fn is_excluded(&self, path: &str) -> bool {
        let path = normalize_separators(path);
        let parts: Vec<&str> = path.split('/').collect();
        self.patterns.iter().any(|p| p.matches_parts(&parts))
    }

    /// Return `true` if everything below a relative directory path is excluded.
    pub fn excludes_dir(&self, dir: &str) -> bool {
        self.patterns.iter().any(|p| p.covers_dir(dir))
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_EXCLUDE_PATTERNS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_star_directory_at_depth() {
        assert!(matches("a/node_modules/x.js", "**/node_modules/**"));
        assert!(matches("a/b/node_modules/c/d/x.js", "**/node_modules/**"));
    }

    #[test]
    fn test_double_star_matches_zero_leading_segments() {
        assert!(matches("node_modules/x.js", "**/node_modules/**"));
    }

    #[test]
    fn test_extension_pattern() {
        assert!(!matches("src/app.py", "**/*.log"));
        assert!(matches("a/b/c.log", "**/*.log"));
        assert!(matches("c.log", "**/*.log"));
    }

    #[test]
    fn test_single_star_does_not_cross_segments() {
        assert!(matches("src/app.py", "src/*.py"));
        assert!(!matches("src/nested/app.py", "src/*.py"));
        assert!(!matches("a/b.min.js", "*.min.js"));
    }

    #[test]
    fn test_question_mark_and_classes() {
        assert!(matches("a/file1.txt", "**/file?.txt"));
        assert!(!matches("a/file10.txt", "**/file?.txt"));
        assert!(matches("a/x.pyc", "**/*.py[cod]"));
    }

    #[test]
    fn test_leading_dot_is_not_special() {
        assert!(matches("a/.hidden.log", "**/*.log"));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!matches("Build/out.js", "**/build/**"));
    }

    #[test]
    fn test_directory_pattern_does_not_match_directory_itself_as_file_name_prefix() {
        assert!(!matches("my_node_modules_backup/x.js", "**/node_modules/**"));
        assert!(!matches("a/build.js", "**/build/**"));
    }

    #[test]
    fn test_trailing_double_star_matches_bare_directory() {
        // `**` may consume zero segments at the end too.
        assert!(matches("a/build", "**/build/**"));
    }

    #[test]
    fn test_empty_pattern_and_path() {
        assert!(matches("", ""));
        assert!(!matches("a", ""));
        assert!(matches("", "**"));
        assert!(matches("", "**/**"));
        assert!(!matches("", "**/a"));
    }

    #[test]
    fn test_middle_double_star() {
        assert!(matches("src/a/b/c/test.py", "src/**/test.py"));
        assert!(matches("src/test.py", "src/**/test.py"));
        assert!(!matches("lib/a/test.py", "src/**/test.py"));
    }

    #[test]
    fn test_many_double_stars_stay_fast() {
        let pattern = format!("{}x", "**/".repeat(40));
        let path = vec!["a"; 60].join("/");
        assert!(!matches(&path, &pattern));
        assert!(matches(&format!("{path}/x"), &pattern));
    }

    #[test]
    fn test_invalid_glob_segment_is_literal() {
        assert!(matches("a/[oops/x", "**/[oops/**"));
        assert!(!matches("a/o/x", "**/[oops/**"));
    }

    #[test]
    fn test_double_star_inside_segment_is_single_star() {
        assert!(matches("a/x.log", "**/**.log"));
        assert!(matches("x.log", "**/**.log"));
        assert!(matches("a/foo_bar", "**/foo**"));
        assert!(matches("a/foo_bar", "**/***"));
        assert!(!matches("a/bar_foo", "**/foo**"));
        // Still confined to one segment.
        assert!(!matches("a/x/y.log", "a/**.log"));
    }

    #[test]
    fn test_translated_double_star_rule_excludes() {
        let pattern = crate::gitignore::translate("**.log").unwrap();
        assert_eq!(pattern, "**/**.log");
        assert!(matches("a/b/debug.log", &pattern));
        assert!(!matches("a/b/debug.py", &pattern));
    }

    #[test]
    fn test_backslashes_are_normalized() {
        assert!(matches("a\\node_modules\\x.js", "**/node_modules/**"));
        assert!(matches("a/node_modules/x.js", "**\\node_modules\\**"));
    }

    #[test]
    fn test_descendant_closure() {
        let cases = [
            ("a/build", "**/build/**"),
            ("build/x.js", "**/build/**"),
            ("src/.venv/lib", "**/.venv/**"),
            ("pkg/foo.egg-info", "**/*.egg-info/**"),
        ];
        for (path, pattern) in cases {
            assert!(matches(path, pattern), "{path} vs {pattern}");
            for extra in ["x", "deep.py", ".hidden"] {
                let child = format!("{path}/{extra}");
                assert!(matches(&child, pattern), "{child} vs {pattern}");
            }
        }
    }

    #[test]
    fn test_matches_any() {
        let patterns = ["**/*.log", "**/dist/**"];
        assert!(matches_any("dist/app.js", &patterns));
        assert!(matches_any("a/b.log", &patterns));
        assert!(!matches_any("src/app.js", &patterns));
        assert!(!matches_any::<&str>("src/app.js", &[]));
    }

    #[test]
    fn test_default_exclusion_set() {
        let set = ExclusionSet::default();
        assert_eq!(set.len(), 12);
        assert!(set.is_excluded("a/.venv/lib.py"));
        assert!(set.is_excluded("a/build/out.js"));
        assert!(set.is_excluded("web/app.min.js"));
        assert!(set.is_excluded("pkg.egg-info/PKG-INFO"));
        assert!(!set.is_excluded("a/app.py"));
    }

    #[test]
    fn test_excludes_dir_only_for_trailing_double_star() {
        let set = ExclusionSet::new(&["**/node_modules/**", "**/*.log", "**/build/*.py"]);
        assert!(set.excludes_dir("node_modules"));
        assert!(set.excludes_dir("a/b/node_modules"));
        assert!(!set.excludes_dir("a/b"));
        assert!(!set.excludes_dir("x.log"));
        assert!(!set.excludes_dir("build"));
    }

    #[test]
    fn test_bare_double_star_never_prunes() {
        let set = ExclusionSet::new(&["**"]);
        assert!(set.is_excluded("anything/at/all.py"));
        assert!(!set.excludes_dir("anything"));
    }
}
