//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, token cursor helpers, and coordination
//! - `declarations`: class, class/local variable and subroutine declarations
//! - `statements`: `let`, `if`, `while`, `do` and `return`
//! - `expressions`: expressions, terms, subroutine calls, expression lists
//!
//! # Implementation
//!
//! Parsing is a streaming traversal: every rule writes its node straight into
//! the [`XmlEmitter`] as it recognises it, and no tree is retained. Each rule
//! expects the current token to sit on its first terminal and leaves the
//! cursor on the token after its last one. Parser methods are split across
//! multiple files using `impl Parser` blocks.

use crate::emitter::XmlEmitter;
use crate::parser::ast::{NodeKind, SourceLocation};
use crate::parser::lexer::{Keyword, LexError, Lexer, Token, TokenKind};
use thiserror::Error;

/// Deepest nesting of terms and statement blocks a class may use
pub const MAX_NESTING: usize = 128;

/// Parser error type
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The current token cannot start or continue the rule being parsed
    #[error(
        "Parse error at {location} in <{nonterminal}>: expected {}, found {found}",
        .expected.join(" or ")
    )]
    Unexpected {
        location: SourceLocation,
        nonterminal: NodeKind,
        expected: Vec<String>,
        found: String,
    },

    /// Terms or statement blocks nested past [`MAX_NESTING`]
    #[error("Parse error at {location} in <{nonterminal}>: nesting deeper than {max} levels", max = MAX_NESTING)]
    TooDeep {
        location: SourceLocation,
        nonterminal: NodeKind,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lex(err) => err.location,
            ParseError::Unexpected { location, .. } | ParseError::TooDeep { location, .. } => {
                *location
            }
        }
    }
}

/// Recursive descent parser for one Jack class
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    /// Token the rule being parsed is looking at; `None` at end of input.
    pub(crate) current: Option<Token>,
    pub(crate) emitter: XmlEmitter,
    /// Open terms and statement blocks
    nesting: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let current = lexer.advance()?;
        Ok(Self {
            lexer,
            current,
            emitter: XmlEmitter::new(),
            nesting: 0,
        })
    }

    /// Parse the compilation unit (exactly one class) and return its
    /// serialized parse tree.
    pub fn parse(mut self) -> Result<String, ParseError> {
        self.parse_class()?;

        if self.current.is_some() {
            return Err(self.unexpected(&["end of input"]));
        }

        Ok(self.emitter.finish())
    }

    // ===== Helper methods =====

    /// Move the cursor to the next token
    pub(crate) fn advance(&mut self) -> Result<(), ParseError> {
        self.current = self.lexer.advance()?;
        Ok(())
    }

    pub(crate) fn current_kind(&self) -> Option<&TokenKind> {
        self.current.as_ref().map(|t| &t.kind)
    }

    pub(crate) fn current_keyword(&self) -> Option<Keyword> {
        match self.current_kind() {
            Some(TokenKind::Keyword(k)) => Some(*k),
            _ => None,
        }
    }

    pub(crate) fn check_symbol(&self, symbol: char) -> bool {
        matches!(&self.current, Some(t) if t.is_symbol(symbol))
    }

    pub(crate) fn check_keyword(&self, keywords: &[Keyword]) -> bool {
        self.current
            .as_ref()
            .is_some_and(|t| keywords.iter().any(|&k| t.is_keyword(k)))
    }

    /// One token of lookahead past the current token, without consuming it
    pub(crate) fn peek_symbol(&mut self, symbol: char) -> Result<bool, ParseError> {
        Ok(matches!(self.lexer.peek()?, Some(t) if t.is_symbol(symbol)))
    }

    /// Emit the current token as a terminal and advance past it. Callers have
    /// already checked what the token is.
    pub(crate) fn emit_current(&mut self) -> Result<(), ParseError> {
        if let Some(token) = self.current.take() {
            self.emitter.token(&token);
        }
        self.advance()
    }

    pub(crate) fn expect_symbol(&mut self, symbol: char) -> Result<(), ParseError> {
        if self.check_symbol(symbol) {
            self.emit_current()
        } else {
            let expected = format!("symbol '{symbol}'");
            Err(self.unexpected(&[expected.as_str()]))
        }
    }

    pub(crate) fn expect_keyword(&mut self, keywords: &[Keyword]) -> Result<Keyword, ParseError> {
        match self.current_keyword() {
            Some(k) if keywords.contains(&k) => {
                self.emit_current()?;
                Ok(k)
            }
            _ => {
                let expected: Vec<String> =
                    keywords.iter().map(|k| format!("keyword '{k}'")).collect();
                Err(self.unexpected_owned(expected))
            }
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<(), ParseError> {
        if matches!(self.current_kind(), Some(TokenKind::Identifier(_))) {
            self.emit_current()
        } else {
            Err(self.unexpected(&["identifier"]))
        }
    }

    /// Enter a recursive rule; fails once [`MAX_NESTING`] levels are open
    pub(crate) fn enter_nested(&mut self) -> Result<(), ParseError> {
        if self.nesting >= MAX_NESTING {
            return Err(ParseError::TooDeep {
                location: self.current_location(),
                nonterminal: self.emitter.current().unwrap_or(NodeKind::Class),
            });
        }
        self.nesting += 1;
        Ok(())
    }

    pub(crate) fn leave_nested(&mut self) {
        self.nesting -= 1;
    }

    fn current_location(&self) -> SourceLocation {
        match &self.current {
            Some(token) => token.location,
            None => self.lexer.position(),
        }
    }

    /// Build a grammar-mismatch error for the innermost open node
    pub(crate) fn unexpected(&self, expected: &[&str]) -> ParseError {
        self.unexpected_owned(expected.iter().map(|s| s.to_string()).collect())
    }

    fn unexpected_owned(&self, expected: Vec<String>) -> ParseError {
        let found = match &self.current {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        };
        ParseError::Unexpected {
            location: self.current_location(),
            nonterminal: self.emitter.current().unwrap_or(NodeKind::Class),
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<String, ParseError> {
        Parser::new(source)?.parse()
    }

    #[test]
    fn test_parse_minimal_class() {
        let xml = parse("class A { function void f() { return; } }").unwrap();
        assert!(xml.starts_with("<class>\n  <keyword> class </keyword>\n"));
        assert!(xml.ends_with("  <symbol> } </symbol>\n</class>\n"));
    }

    #[test]
    fn test_idempotent() {
        let source = "class A { field int x; method int get() { return x; } }";
        assert_eq!(parse(source).unwrap(), parse(source).unwrap());
    }

    #[test]
    fn test_missing_class_keyword() {
        let err = parse("klass A {}").unwrap_err();
        match err {
            ParseError::Unexpected {
                nonterminal,
                expected,
                found,
                location,
            } => {
                assert_eq!(nonterminal, NodeKind::Class);
                assert_eq!(expected, vec!["keyword 'class'".to_string()]);
                assert_eq!(found, "identifier 'klass'");
                assert_eq!(location, SourceLocation::new(1, 1));
            }
            other => panic!("Expected grammar mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parse("class A { } class B { }").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Unexpected { nonterminal: NodeKind::Class, ref found, .. }
                if found == "keyword 'class'"
        ));
    }

    #[test]
    fn test_unexpected_end_of_input() {
        let err = parse("class A { function void f() {").unwrap_err();
        match err {
            ParseError::Unexpected {
                nonterminal, found, ..
            } => {
                assert_eq!(nonterminal, NodeKind::Statements);
                assert_eq!(found, "end of input");
            }
            other => panic!("Expected grammar mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_lex_error_propagates() {
        let err = parse("class A { $ }").unwrap_err();
        assert!(matches!(err, ParseError::Lex(_)));
        assert_eq!(err.location(), SourceLocation::new(1, 11));
    }

    #[test]
    fn test_error_message() {
        let err = parse("class A { field int; }").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parse error at line 1, column 20 in <classVarDec>: expected identifier, found symbol ';'"
        );
    }

    #[test]
    fn test_deeply_nested_parentheses_fail_cleanly() {
        let depth = 10_000;
        let source = format!(
            "class A {{ function int f() {{ return {}1{}; }} }}",
            "(".repeat(depth),
            ")".repeat(depth)
        );
        let err = parse(&source).unwrap_err();
        match err {
            ParseError::TooDeep { nonterminal, .. } => {
                assert_eq!(nonterminal, NodeKind::Expression);
            }
            other => panic!("Expected nesting error, got {other:?}"),
        }
    }

    #[test]
    fn test_deeply_nested_blocks_fail_cleanly() {
        let depth = 5_000;
        let source = format!(
            "class A {{ function void f() {{ {}{} }} }}",
            "while (x) { ".repeat(depth),
            "} ".repeat(depth)
        );
        assert!(matches!(parse(&source), Err(ParseError::TooDeep { .. })));
    }

    #[test]
    fn test_nesting_up_to_limit_is_accepted() {
        // The function body's statements take one level
        let depth = MAX_NESTING - 2;
        let source = format!(
            "class A {{ function int f() {{ return {}1{}; }} }}",
            "(".repeat(depth),
            ")".repeat(depth)
        );
        assert!(parse(&source).is_ok());
    }

    #[test]
    fn test_sibling_nesting_is_not_cumulative() {
        let group = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        let body = vec![group; 10].join(" + ");
        let source = format!("class A {{ function int f() {{ return {body}; }} }}");
        assert!(parse(&source).is_ok());
    }

    #[test]
    fn test_too_deep_message() {
        let source = format!(
            "class A {{ function int f() {{ return {}; }} }}",
            "-".repeat(MAX_NESTING + 1) + "1"
        );
        let err = parse(&source).unwrap_err();
        assert!(err
            .to_string()
            .ends_with(&format!("nesting deeper than {MAX_NESTING} levels")));
    }
}
