//! Static mapping between language identifiers and file-name suffixes.
//!
//! Suffixes include the leading dot (`.py`). Every suffix belongs to exactly
//! one language; `.h` is owned by C even though C++ sources use it too.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A language the indexer knows how to extract symbols from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    Python,
    TypeScript,
    JavaScript,
    Markdown,
    Yaml,
    Kotlin,
    Swift,
    C,
    Cpp,
    Html,
    Css,
    Php,
}

impl Language {
    /// Every supported language, in registry order.
    pub const ALL: [Language; 12] = [
        Language::Python,
        Language::TypeScript,
        Language::JavaScript,
        Language::Markdown,
        Language::Yaml,
        Language::Kotlin,
        Language::Swift,
        Language::C,
        Language::Cpp,
        Language::Html,
        Language::Css,
        Language::Php,
    ];

    /// Canonical identifier as used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
            Language::Markdown => "markdown",
            Language::Yaml => "yaml",
            Language::Kotlin => "kotlin",
            Language::Swift => "swift",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Html => "html",
            Language::Css => "css",
            Language::Php => "php",
        }
    }

    /// File-name suffixes owned by this language.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Language::Python => &[".py", ".pyi"],
            Language::TypeScript => &[".ts", ".tsx"],
            Language::JavaScript => &[".js", ".jsx"],
            Language::Markdown => &[".md", ".markdown"],
            Language::Yaml => &[".yaml", ".yml"],
            Language::Kotlin => &[".kt", ".kts"],
            Language::Swift => &[".swift"],
            Language::C => &[".c", ".h"],
            Language::Cpp => &[".cpp", ".hpp", ".cc", ".hh", ".cxx", ".hxx"],
            Language::Html => &[".html", ".htm"],
            Language::Css => &[".css"],
            Language::Php => &[".php", ".phtml"],
        }
    }

    /// Look up the language that owns `suffix` (with leading dot).
    pub fn from_extension(suffix: &str) -> Option<Language> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&suffix))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a language identifier is not in the registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str() == lower)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// Resolve configured language identifiers, dropping unknown ones.
pub fn resolve<S: AsRef<str>>(names: &[S]) -> Vec<Language> {
    let mut langs = Vec::new();
    for name in names {
        if let Ok(lang) = name.as_ref().parse::<Language>() {
            if !langs.contains(&lang) {
                langs.push(lang);
            }
        }
    }
    langs
}

/// Suffixes for a set of language identifiers.
///
/// Unknown identifiers contribute nothing.
pub fn extensions_for<S: AsRef<str>>(names: &[S]) -> Vec<&'static str> {
    resolve(names)
        .into_iter()
        .flat_map(|lang| lang.extensions().iter().copied())
        .collect()
}

/// Language owning `suffix`, if any.
///
/// Lookup is case-sensitive: `.PY` has no language. Discovery compares
/// suffixes the same way, so `LOUD.PY` is never indexed.
pub fn language_for(suffix: &str) -> Option<Language> {
    Language::from_extension(suffix)
}
