//! Driver error types
//!
//! [`AnalyzeError`] covers everything that can go wrong while turning one
//! file into one tree. Lexing and grammar failures arrive wrapped in
//! [`AnalyzeError::Parse`]; the rest are filesystem problems.

use crate::parser::ParseError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The input path does not exist
    #[error("File not found. Bad input path? ({})", .0.display())]
    InputNotFound(PathBuf),

    /// A source file or directory exists but could not be read
    #[error("Could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output file could not be written or closed
    #[error("Trouble writing or closing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source did not lex or parse; nothing was written
    #[error("{}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl AnalyzeError {
    /// Map a read failure, telling a missing file apart from other I/O errors
    pub(crate) fn read(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            AnalyzeError::InputNotFound(path)
        } else {
            AnalyzeError::Read { path, source }
        }
    }
}
