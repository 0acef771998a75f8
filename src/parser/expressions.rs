//! Expression parsing implementation
//!
//! Expressions are a flat `term (op term)*` chain with no operator
//! precedence; grouping is only what the source spells out with parentheses.
//!
//! # Grammar
//!
//! ```text
//! expression     ::= term (op term)*
//! op             ::= "+" | "-" | "*" | "/" | "&" | "|" | "<" | ">" | "="
//! term           ::= integerConstant | stringConstant | keywordConstant
//!                  | varName | varName "[" expression "]" | subroutineCall
//!                  | "(" expression ")" | ("-" | "~") term
//! subroutineCall ::= subroutineName "(" expressionList ")"
//!                  | (className | varName) "." subroutineName "(" expressionList ")"
//! expressionList ::= (expression ("," expression)*)?
//! ```
//!
//! # Lookahead
//!
//! A term that starts with an identifier is ambiguous until the token after
//! it is known: `[` makes it an array access, `(` an unqualified call, `.` a
//! qualified call, anything else a plain variable reference. That single
//! token is read with [`Parser::peek_symbol`]; nothing else in the grammar
//! needs more than the current token.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::NodeKind;
use crate::parser::lexer::{Keyword, TokenKind};
use crate::parser::parse::{ParseError, Parser};

/// Binary operators, all at the same precedence
pub const BINARY_OPERATORS: &[char] = &['+', '-', '*', '/', '&', '|', '<', '>', '='];

/// Prefix operators
pub const UNARY_OPERATORS: &[char] = &['-', '~'];

#[derive(Debug, Clone, Copy)]
enum TermStart {
    Name,
    Constant,
    Parenthesized,
    Unary,
}

impl Parser<'_> {
    /// Parse expression: term (op term)*
    pub(crate) fn parse_expression(&mut self) -> Result<(), ParseError> {
        self.emitter.open(NodeKind::Expression);

        self.parse_term()?;

        while self.check_binary_operator() {
            self.emit_current()?;
            self.parse_term()?;
        }

        self.emitter.close(NodeKind::Expression);
        Ok(())
    }

    /// Parse term
    pub(crate) fn parse_term(&mut self) -> Result<(), ParseError> {
        self.enter_nested()?;
        self.emitter.open(NodeKind::Term);

        match self.term_start() {
            Some(TermStart::Name) => {
                if self.peek_symbol('[')? {
                    // Array access: name [ expression ]
                    self.emit_current()?;
                    self.emit_current()?;
                    self.parse_expression()?;
                    self.expect_symbol(']')?;
                } else if self.peek_symbol('(')? || self.peek_symbol('.')? {
                    self.parse_subroutine_call()?;
                } else {
                    self.emit_current()?;
                }
            }

            Some(TermStart::Constant) => {
                self.emit_current()?;
            }

            Some(TermStart::Parenthesized) => {
                self.emit_current()?;
                self.parse_expression()?;
                self.expect_symbol(')')?;
            }

            Some(TermStart::Unary) => {
                self.emit_current()?;
                self.parse_term()?;
            }

            None => {
                return Err(self.unexpected(&[
                    "integer constant",
                    "string constant",
                    "keyword 'true'",
                    "keyword 'false'",
                    "keyword 'null'",
                    "keyword 'this'",
                    "identifier",
                    "symbol '('",
                    "symbol '-'",
                    "symbol '~'",
                ]));
            }
        }

        self.emitter.close(NodeKind::Term);
        self.leave_nested();
        Ok(())
    }

    /// Which term production the current token starts, if any
    fn term_start(&self) -> Option<TermStart> {
        match self.current_kind()? {
            TokenKind::Identifier(_) => Some(TermStart::Name),
            TokenKind::IntegerConstant(_) | TokenKind::StringConstant(_) => {
                Some(TermStart::Constant)
            }
            TokenKind::Keyword(Keyword::True | Keyword::False | Keyword::Null | Keyword::This) => {
                Some(TermStart::Constant)
            }
            TokenKind::Symbol('(') => Some(TermStart::Parenthesized),
            TokenKind::Symbol(c) if UNARY_OPERATORS.contains(c) => Some(TermStart::Unary),
            _ => None,
        }
    }

    /// Parse subroutine call: name(args) or target.name(args)
    pub(crate) fn parse_subroutine_call(&mut self) -> Result<(), ParseError> {
        self.emitter.open(NodeKind::SubroutineCall);

        self.expect_identifier()?;

        if self.check_symbol('.') {
            self.emit_current()?;
            self.expect_identifier()?;
        }

        self.expect_symbol('(')?;
        self.parse_expression_list()?;
        self.expect_symbol(')')?;

        self.emitter.close(NodeKind::SubroutineCall);
        Ok(())
    }

    /// Parse comma-separated call arguments; empty iff the current token is
    /// ')' (or ';', for a call that is missing its closing parenthesis)
    pub(crate) fn parse_expression_list(&mut self) -> Result<(), ParseError> {
        self.emitter.open(NodeKind::ExpressionList);

        if !self.check_symbol(')') && !self.check_symbol(';') {
            self.parse_expression()?;

            while self.check_symbol(',') {
                self.emit_current()?;
                self.parse_expression()?;
            }
        }

        self.emitter.close(NodeKind::ExpressionList);
        Ok(())
    }

    fn check_binary_operator(&self) -> bool {
        matches!(self.current_kind(), Some(TokenKind::Symbol(c)) if BINARY_OPERATORS.contains(c))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::NodeKind;
    use crate::parser::parse::{ParseError, Parser};

    /// Parse `return <expr>;` and return the `<expression>` block, re-indented
    /// to start at column zero
    fn expression(expr: &str) -> Result<String, ParseError> {
        let source = format!("class T {{ function void f() {{ return {expr}; }} }}");
        let xml = Parser::new(&source)?.parse()?;
        let indent = " ".repeat(10);
        let start = xml.find(&format!("{indent}<expression>")).unwrap();
        let close = format!("\n{indent}</expression>\n");
        let end = xml.find(&close).unwrap() + close.len();
        Ok(xml[start..end]
            .lines()
            .map(|line| format!("{}\n", &line[indent.len()..]))
            .collect())
    }

    #[test]
    fn test_bare_reference() {
        assert_eq!(
            expression("foo").unwrap(),
            "\
<expression>
  <term>
    <identifier> foo </identifier>
  </term>
</expression>
"
        );
    }

    #[test]
    fn test_array_access() {
        assert_eq!(
            expression("foo[1]").unwrap(),
            "\
<expression>
  <term>
    <identifier> foo </identifier>
    <symbol> [ </symbol>
    <expression>
      <term>
        <integerConstant> 1 </integerConstant>
      </term>
    </expression>
    <symbol> ] </symbol>
  </term>
</expression>
"
        );
    }

    #[test]
    fn test_unqualified_call() {
        assert_eq!(
            expression("foo(1,2)").unwrap(),
            "\
<expression>
  <term>
    <subroutineCall>
      <identifier> foo </identifier>
      <symbol> ( </symbol>
      <expressionList>
        <expression>
          <term>
            <integerConstant> 1 </integerConstant>
          </term>
        </expression>
        <symbol> , </symbol>
        <expression>
          <term>
            <integerConstant> 2 </integerConstant>
          </term>
        </expression>
      </expressionList>
      <symbol> ) </symbol>
    </subroutineCall>
  </term>
</expression>
"
        );
    }

    #[test]
    fn test_qualified_call() {
        assert_eq!(
            expression("Foo.bar()").unwrap(),
            "\
<expression>
  <term>
    <subroutineCall>
      <identifier> Foo </identifier>
      <symbol> . </symbol>
      <identifier> bar </identifier>
      <symbol> ( </symbol>
      <expressionList>
      </expressionList>
      <symbol> ) </symbol>
    </subroutineCall>
  </term>
</expression>
"
        );
    }

    #[test]
    fn test_flat_binary_chain_with_escaping() {
        assert_eq!(
            expression("a < b & c").unwrap(),
            "\
<expression>
  <term>
    <identifier> a </identifier>
  </term>
  <symbol> &lt; </symbol>
  <term>
    <identifier> b </identifier>
  </term>
  <symbol> &amp; </symbol>
  <term>
    <identifier> c </identifier>
  </term>
</expression>
"
        );
    }

    #[test]
    fn test_unary_and_parenthesized() {
        assert_eq!(
            expression("-(~x)").unwrap(),
            "\
<expression>
  <term>
    <symbol> - </symbol>
    <term>
      <symbol> ( </symbol>
      <expression>
        <term>
          <symbol> ~ </symbol>
          <term>
            <identifier> x </identifier>
          </term>
        </term>
      </expression>
      <symbol> ) </symbol>
    </term>
  </term>
</expression>
"
        );
    }

    #[test]
    fn test_constants() {
        let xml = expression("\"hi there\" + true + null + this + 42").unwrap();
        assert!(xml.contains("<stringConstant> hi there </stringConstant>"));
        assert!(xml.contains("<keyword> true </keyword>"));
        assert!(xml.contains("<keyword> null </keyword>"));
        assert!(xml.contains("<keyword> this </keyword>"));
        assert!(xml.contains("<integerConstant> 42 </integerConstant>"));
        assert_eq!(xml.matches("<term>").count(), 5);
    }

    #[test]
    fn test_invalid_term_start() {
        let err = expression("*x").unwrap_err();
        match err {
            ParseError::Unexpected {
                nonterminal, found, ..
            } => {
                assert_eq!(nonterminal, NodeKind::Term);
                assert_eq!(found, "symbol '*'");
            }
            other => panic!("Expected grammar mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_keyword_that_is_not_a_constant() {
        let err = expression("while").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Unexpected { nonterminal: NodeKind::Term, .. }
        ));
    }

    #[test]
    fn test_unclosed_index() {
        let err = expression("a[1").unwrap_err();
        match err {
            ParseError::Unexpected {
                nonterminal,
                expected,
                ..
            } => {
                assert_eq!(nonterminal, NodeKind::Term);
                assert_eq!(expected, vec!["symbol ']'".to_string()]);
            }
            other => panic!("Expected grammar mismatch, got {other:?}"),
        }
    }
}
