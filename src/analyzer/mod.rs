//! File and directory driver
//!
//! Runs the lexer → parser → emitter pipeline over real files:
//!
//! - [`analyze_source`]: in-memory text to tree text
//! - [`analyze_file`]: one source file to its sibling output file
//! - [`analyze_path`]: a single file, or every source file in a directory
//!
//! Each file gets its own lexer and parser; nothing is shared between files.
//! A file's tree is written only after the whole file has parsed, so a failed
//! file leaves no output behind, and it does not stop the remaining files.

pub mod config;
pub mod errors;

pub use config::AnalyzerConfig;
pub use errors::AnalyzeError;

use crate::parser::{ParseError, Parser};
use std::fs;
use std::path::{Path, PathBuf};

/// A successfully analyzed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Where the tree was written
    pub output: PathBuf,
    /// The tree itself
    pub tree: String,
}

/// Result of analyzing one file of a directory run
#[derive(Debug)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub result: Result<Analysis, AnalyzeError>,
}

/// Parse one class from memory and return its serialized tree
pub fn analyze_source(source: &str) -> Result<String, ParseError> {
    Parser::new(source)?.parse()
}

/// Parse `path` and write the tree next to it
pub fn analyze_file(path: &Path, config: &AnalyzerConfig) -> Result<Analysis, AnalyzeError> {
    let source = fs::read_to_string(path).map_err(|e| AnalyzeError::read(path.to_path_buf(), e))?;

    let output = config.output_path(path);

    let tree = match analyze_source(&source) {
        Ok(tree) => tree,
        Err(source) => {
            remove_stale(&output)?;
            return Err(AnalyzeError::Parse {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    fs::write(&output, &tree).map_err(|source| AnalyzeError::Write {
        path: output.clone(),
        source,
    })?;

    log::debug!("{} -> {}", path.display(), output.display());
    Ok(Analysis { output, tree })
}

/// Analyze a single source file, or every source file directly inside a
/// directory (sorted by name). Fails as a whole only when `path` itself is
/// unusable; per-file failures are reported in the outcomes.
pub fn analyze_path(path: &Path, config: &AnalyzerConfig) -> Result<Vec<FileOutcome>, AnalyzeError> {
    if !path.exists() {
        return Err(AnalyzeError::InputNotFound(path.to_path_buf()));
    }

    let sources = if path.is_dir() {
        source_files(path, config)?
    } else {
        vec![path.to_path_buf()]
    };

    log::debug!("analyzing {} file(s) under {}", sources.len(), path.display());

    Ok(sources
        .into_iter()
        .map(|source| {
            let result = analyze_file(&source, config);
            if let Err(err) = &result {
                log::debug!("{} failed: {}", source.display(), err);
            }
            FileOutcome { source, result }
        })
        .collect())
}

/// Delete a tree left over from an earlier run of a file that no longer parses
fn remove_stale(output: &Path) -> Result<(), AnalyzeError> {
    match fs::remove_file(output) {
        Ok(()) => {
            log::debug!("removed stale {}", output.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(AnalyzeError::Write {
            path: output.to_path_buf(),
            source,
        }),
    }
}

/// Source files directly inside `dir`, sorted by path
fn source_files(dir: &Path, config: &AnalyzerConfig) -> Result<Vec<PathBuf>, AnalyzeError> {
    let read_error = |source: std::io::Error| AnalyzeError::read(dir.to_path_buf(), source);

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && config.is_source(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
