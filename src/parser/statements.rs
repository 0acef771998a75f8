//! Statement parsing implementation
//!
//! This module handles parsing of the five Jack statement forms:
//!
//! - `let x = e;` and `let a[i] = e;`
//! - `if (cond) { ... }` (there is no `else` branch in this grammar)
//! - `while (cond) { ... }`
//! - `do call();`
//! - `return;` and `return e;`
//!
//! # Grammar
//!
//! ```text
//! statements      ::= statement*
//! statement       ::= letStatement | ifStatement | whileStatement
//!                   | doStatement | returnStatement
//! letStatement    ::= "let" varName ("[" expression "]")? "=" expression ";"
//! ifStatement     ::= "if" "(" expression ")" "{" statements "}"
//! whileStatement  ::= "while" "(" expression ")" "{" statements "}"
//! doStatement     ::= "do" subroutineCall ";"
//! returnStatement ::= "return" expression? ";"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::NodeKind;
use crate::parser::lexer::Keyword;
use crate::parser::parse::{ParseError, Parser};

impl Parser<'_> {
    /// Parse statements until the closing '}' of the enclosing block
    pub(crate) fn parse_statements(&mut self) -> Result<(), ParseError> {
        self.enter_nested()?;
        self.emitter.open(NodeKind::Statements);

        while !self.check_symbol('}') {
            self.parse_statement()?;
        }

        self.emitter.close(NodeKind::Statements);
        self.leave_nested();
        Ok(())
    }

    /// Parse a statement, dispatching on its leading keyword
    pub(crate) fn parse_statement(&mut self) -> Result<(), ParseError> {
        match self.current_keyword() {
            Some(Keyword::Let) => self.parse_let_statement(),
            Some(Keyword::If) => self.parse_if_statement(),
            Some(Keyword::While) => self.parse_while_statement(),
            Some(Keyword::Do) => self.parse_do_statement(),
            Some(Keyword::Return) => self.parse_return_statement(),
            _ => Err(self.unexpected(&[
                "keyword 'let'",
                "keyword 'if'",
                "keyword 'while'",
                "keyword 'do'",
                "keyword 'return'",
                "symbol '}'",
            ])),
        }
    }

    /// Parse let statement
    fn parse_let_statement(&mut self) -> Result<(), ParseError> {
        self.emitter.open(NodeKind::LetStatement);

        self.expect_keyword(&[Keyword::Let])?;
        self.expect_identifier()?;

        if self.check_symbol('[') {
            self.emit_current()?;
            self.parse_expression()?;
            self.expect_symbol(']')?;
        }

        self.expect_symbol('=')?;
        self.parse_expression()?;
        self.expect_symbol(';')?;

        self.emitter.close(NodeKind::LetStatement);
        Ok(())
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<(), ParseError> {
        self.parse_guarded_block(NodeKind::IfStatement, Keyword::If)
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<(), ParseError> {
        self.parse_guarded_block(NodeKind::WhileStatement, Keyword::While)
    }

    /// keyword ( expression ) { statements }, shared by `if` and `while`
    fn parse_guarded_block(&mut self, node: NodeKind, keyword: Keyword) -> Result<(), ParseError> {
        self.emitter.open(node);

        self.expect_keyword(&[keyword])?;
        self.expect_symbol('(')?;
        self.parse_expression()?;
        self.expect_symbol(')')?;
        self.expect_symbol('{')?;
        self.parse_statements()?;
        self.expect_symbol('}')?;

        self.emitter.close(node);
        Ok(())
    }

    /// Parse do statement
    fn parse_do_statement(&mut self) -> Result<(), ParseError> {
        self.emitter.open(NodeKind::DoStatement);

        self.expect_keyword(&[Keyword::Do])?;
        self.parse_subroutine_call()?;
        self.expect_symbol(';')?;

        self.emitter.close(NodeKind::DoStatement);
        Ok(())
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<(), ParseError> {
        self.emitter.open(NodeKind::ReturnStatement);

        self.expect_keyword(&[Keyword::Return])?;

        if !self.check_symbol(';') {
            self.parse_expression()?;
        }

        self.expect_symbol(';')?;

        self.emitter.close(NodeKind::ReturnStatement);
        Ok(())
    }
}
