//! codemap-core: Configuration, exclusion patterns, and language registry for codemap.

pub mod config;
pub mod error;
pub mod filter;
pub mod gitignore;
pub mod languages;
pub mod logging;
pub mod paths;

pub use config::Config;
pub use error::{Error, Result};
pub use filter::{ExclusionSet, GlobPattern};
pub use languages::Language;
