//! Declaration parsing implementation
//!
//! This module handles the class-level structure of a Jack file:
//!
//! - The class itself: `class Name { ... }`
//! - Class variables: `static int count;`, `field Point a, b;`
//! - Subroutines: `constructor`, `function` and `method` declarations
//! - Parameter lists, subroutine bodies and local `var` declarations
//!
//! # Grammar
//!
//! ```text
//! class          ::= "class" className "{" classVarDec* subroutineDec* "}"
//! classVarDec    ::= ("static" | "field") type varName ("," varName)* ";"
//! type           ::= "int" | "char" | "boolean" | className
//! subroutineDec  ::= ("constructor" | "function" | "method") ("void" | type)
//!                    subroutineName "(" parameterList ")" subroutineBody
//! parameterList  ::= ((type varName) ("," type varName)*)?
//! subroutineBody ::= "{" varDec* statements "}"
//! varDec         ::= "var" type varName ("," varName)* ";"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::NodeKind;
use crate::parser::lexer::{Keyword, TokenKind};
use crate::parser::parse::{ParseError, Parser};

const TYPE_EXPECTED: &[&str] = &["keyword 'int'", "keyword 'char'", "keyword 'boolean'", "identifier"];

impl Parser<'_> {
    /// Parse class: the whole compilation unit
    pub(crate) fn parse_class(&mut self) -> Result<(), ParseError> {
        self.emitter.open(NodeKind::Class);

        self.expect_keyword(&[Keyword::Class])?;
        self.expect_identifier()?;
        self.expect_symbol('{')?;

        while self.check_keyword(&[Keyword::Static, Keyword::Field]) {
            self.parse_class_var_dec()?;
        }

        while self.check_keyword(&[Keyword::Constructor, Keyword::Function, Keyword::Method]) {
            self.parse_subroutine_dec()?;
        }

        self.expect_symbol('}')?;

        self.emitter.close(NodeKind::Class);
        Ok(())
    }

    /// Parse class variable declaration: (static | field) type name, ...;
    pub(crate) fn parse_class_var_dec(&mut self) -> Result<(), ParseError> {
        self.emitter.open(NodeKind::ClassVarDec);

        self.expect_keyword(&[Keyword::Static, Keyword::Field])?;
        self.parse_variable_names()?;

        self.emitter.close(NodeKind::ClassVarDec);
        Ok(())
    }

    /// Parse local variable declaration: var type name, ...;
    pub(crate) fn parse_var_dec(&mut self) -> Result<(), ParseError> {
        self.emitter.open(NodeKind::VarDec);

        self.expect_keyword(&[Keyword::Var])?;
        self.parse_variable_names()?;

        self.emitter.close(NodeKind::VarDec);
        Ok(())
    }

    /// Shared tail of class and local variable declarations:
    /// type varName ("," varName)* ";"
    fn parse_variable_names(&mut self) -> Result<(), ParseError> {
        self.parse_type()?;
        self.expect_identifier()?;

        while self.check_symbol(',') {
            self.emit_current()?;
            self.expect_identifier()?;
        }

        self.expect_symbol(';')
    }

    /// Parse type: int | char | boolean | className
    ///
    /// `type` has no tag of its own; the terminal lands in the enclosing node.
    pub(crate) fn parse_type(&mut self) -> Result<(), ParseError> {
        match self.current_kind() {
            Some(TokenKind::Keyword(Keyword::Int | Keyword::Char | Keyword::Boolean))
            | Some(TokenKind::Identifier(_)) => self.emit_current(),
            _ => Err(self.unexpected(TYPE_EXPECTED)),
        }
    }

    /// Parse subroutine declaration: kind (void | type) name(params) body
    pub(crate) fn parse_subroutine_dec(&mut self) -> Result<(), ParseError> {
        self.emitter.open(NodeKind::SubroutineDec);

        self.expect_keyword(&[Keyword::Constructor, Keyword::Function, Keyword::Method])?;

        if self.check_keyword(&[Keyword::Void]) {
            self.emit_current()?;
        } else if self.check_type_start() {
            self.parse_type()?;
        } else {
            let mut expected = vec!["keyword 'void'"];
            expected.extend_from_slice(TYPE_EXPECTED);
            return Err(self.unexpected(&expected));
        }

        self.expect_identifier()?;
        self.expect_symbol('(')?;
        self.parse_parameter_list()?;
        self.expect_symbol(')')?;
        self.parse_subroutine_body()?;

        self.emitter.close(NodeKind::SubroutineDec);
        Ok(())
    }

    /// Parse parameter list: (type name, type name, ...); empty iff the
    /// current token is ')'
    pub(crate) fn parse_parameter_list(&mut self) -> Result<(), ParseError> {
        self.emitter.open(NodeKind::ParameterList);

        if !self.check_symbol(')') {
            self.parse_type()?;
            self.expect_identifier()?;

            while self.check_symbol(',') {
                self.emit_current()?;
                self.parse_type()?;
                self.expect_identifier()?;
            }
        }

        self.emitter.close(NodeKind::ParameterList);
        Ok(())
    }

    /// Parse subroutine body: { varDec* statements }
    pub(crate) fn parse_subroutine_body(&mut self) -> Result<(), ParseError> {
        self.emitter.open(NodeKind::SubroutineBody);

        self.expect_symbol('{')?;

        while self.check_keyword(&[Keyword::Var]) {
            self.parse_var_dec()?;
        }

        self.parse_statements()?;
        self.expect_symbol('}')?;

        self.emitter.close(NodeKind::SubroutineBody);
        Ok(())
    }

    fn check_type_start(&self) -> bool {
        matches!(
            self.current_kind(),
            Some(TokenKind::Keyword(Keyword::Int | Keyword::Char | Keyword::Boolean))
                | Some(TokenKind::Identifier(_))
        )
    }
}
