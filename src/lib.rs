//! # Introduction
//!
//! `jack_analyzer` is the syntactic front-end of a Jack compiler. It reads one
//! `.jack` class, tokenizes it, walks the grammar by recursive descent and
//! writes the derivation out as an indented, fully bracketed tree.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → XmlEmitter → .xml
//! ```
//!
//! 1. [`parser::lexer`]: turns characters into keyword, symbol, identifier,
//!    integer and string tokens, skipping whitespace and comments.
//! 2. [`parser`]: recursive descent over the class grammar; decides every
//!    rule from the current token plus, for identifier-led terms, one more.
//! 3. [`emitter`]: buffers the open/close/leaf events as text.
//! 4. [`analyzer`]: runs the pipeline over a file or a directory of files
//!    and writes each tree next to its source.
//!
//! ## Example
//!
//! ```
//! let xml = jack_analyzer::analyze_source("class A { function void f() { return; } }").unwrap();
//! assert!(xml.starts_with("<class>\n"));
//! ```
//!
//! There is no semantic analysis here: names are not resolved and types are
//! not checked.

pub mod analyzer;
pub mod emitter;
pub mod parser;

pub use analyzer::{
    analyze_file, analyze_path, analyze_source, Analysis, AnalyzeError, AnalyzerConfig, FileOutcome,
};
