//! Driver configuration

use std::path::{Path, PathBuf};

/// Extension of Jack source files
pub const DEFAULT_SOURCE_EXTENSION: &str = "jack";

/// Extension of the serialized parse trees written next to them
pub const DEFAULT_OUTPUT_EXTENSION: &str = "xml";

/// Settings for [`crate::analyzer::analyze_path`] and friends.
///
/// The library never reads global state; the binary builds one of these from
/// its command line and passes it down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Files with this extension are analyzed when a directory is given
    pub source_extension: String,
    /// Extension of the sibling output file
    pub output_extension: String,
    /// Also print each tree to stdout
    pub echo: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
            echo: false,
        }
    }
}

impl AnalyzerConfig {
    /// Whether `path` names a source file by extension
    pub fn is_source(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext == self.source_extension.as_str())
    }

    /// Where the tree for `source` is written: same directory and stem,
    /// output extension
    pub fn output_path(&self, source: &Path) -> PathBuf {
        source.with_extension(&self.output_extension)
    }
}
