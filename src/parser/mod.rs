//! Jack source code parser
//!
//! This module transforms Jack source text into a serialized parse tree:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: The [`Parser`] driver, cursor helpers and [`ParseError`]
//! - [`ast`]: Source locations and the node kinds that appear in the tree
//!
//! # Grammar coverage
//!
//! - Classes with `static`/`field` variables and
//!   `constructor`/`function`/`method` subroutines
//! - Statements: `let` (with optional index), `if` (no `else`), `while`,
//!   `do`, `return`
//! - Expressions: flat `term (op term)*` chains, unary `-` and `~`, array
//!   access, qualified and unqualified calls
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with a single token of lookahead, used only
//! to classify identifier-led terms. The tree is streamed into the
//! [`crate::emitter::XmlEmitter`] as it is recognised.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use expressions::{BINARY_OPERATORS, UNARY_OPERATORS};
pub use parse::{ParseError, Parser, MAX_NESTING};
