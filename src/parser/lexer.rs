//! Lexer (tokenizer) for Jack source code
//!
//! Converts raw source text into a lazy stream of [`Token`]s consumed by the
//! parser. The lexer holds exactly one unconsumed character of lookahead and at
//! most one resolved token (see [`Lexer::peek`]); whitespace and the three
//! comment forms (`//`, `/* */`, `/** */`) are skipped in a loop rather than by
//! recursion, so long runs of trivia cannot exhaust the stack.

use super::ast::SourceLocation;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::fmt;
use std::str::Chars;
use thiserror::Error;

/// Reserved words of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Class,
    Field,
    Static,
    Int,
    Char,
    Boolean,
    Constructor,
    Function,
    Method,
    Void,
    Var,
    Let,
    If,
    Else,
    While,
    Do,
    Return,
    This,
    True,
    False,
    Null,
}

impl Keyword {
    pub const ALL: [Keyword; 21] = [
        Keyword::Class,
        Keyword::Field,
        Keyword::Static,
        Keyword::Int,
        Keyword::Char,
        Keyword::Boolean,
        Keyword::Constructor,
        Keyword::Function,
        Keyword::Method,
        Keyword::Void,
        Keyword::Var,
        Keyword::Let,
        Keyword::If,
        Keyword::Else,
        Keyword::While,
        Keyword::Do,
        Keyword::Return,
        Keyword::This,
        Keyword::True,
        Keyword::False,
        Keyword::Null,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Class => "class",
            Keyword::Field => "field",
            Keyword::Static => "static",
            Keyword::Int => "int",
            Keyword::Char => "char",
            Keyword::Boolean => "boolean",
            Keyword::Constructor => "constructor",
            Keyword::Function => "function",
            Keyword::Method => "method",
            Keyword::Void => "void",
            Keyword::Var => "var",
            Keyword::Let => "let",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Do => "do",
            Keyword::Return => "return",
            Keyword::This => "this",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
        }
    }

    /// Look up a lexeme in the keyword table.
    pub fn from_lexeme(lexeme: &str) -> Option<Keyword> {
        KEYWORDS.get(lexeme).copied()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static KEYWORDS: Lazy<FxHashMap<&'static str, Keyword>> =
    Lazy::new(|| Keyword::ALL.iter().map(|&k| (k.as_str(), k)).collect());

/// Single-character symbols of the grammar.
pub const SYMBOLS: &[char] = &[
    '{', '}', '(', ')', '[', ']', '.', ',', ';', '+', '-', '*', '/', '&', '|',
    '<', '>', '=', '~',
];

/// Symbols reserved for the bytecode format; lexed but never used by the grammar.
pub const RESERVED_SYMBOLS: &[char] = &['@', '#'];

/// Largest value an integer constant may hold.
pub const MAX_INTEGER: u16 = 32767;

/// Token classification plus its kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Keyword),
    Symbol(char),
    IntegerConstant(u16),
    StringConstant(String),
    Identifier(String),
}

/// A classified lexeme and where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }

    /// Terminal tag used when this token is serialized.
    pub fn tag(&self) -> &'static str {
        match self.kind {
            TokenKind::Keyword(_) => "keyword",
            TokenKind::Symbol(_) => "symbol",
            TokenKind::IntegerConstant(_) => "integerConstant",
            TokenKind::StringConstant(_) => "stringConstant",
            TokenKind::Identifier(_) => "identifier",
        }
    }

    /// Raw text of the token, without any escaping.
    pub fn text(&self) -> String {
        match &self.kind {
            TokenKind::Keyword(k) => k.as_str().to_string(),
            TokenKind::Symbol(c) => c.to_string(),
            TokenKind::IntegerConstant(n) => n.to_string(),
            TokenKind::StringConstant(s) | TokenKind::Identifier(s) => s.clone(),
        }
    }

    pub fn is_symbol(&self, symbol: char) -> bool {
        self.kind == TokenKind::Symbol(symbol)
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::Keyword(k) => write!(f, "keyword '{}'", k),
            TokenKind::Symbol(c) => write!(f, "symbol '{}'", c),
            TokenKind::IntegerConstant(n) => write!(f, "integer constant {}", n),
            TokenKind::StringConstant(s) => write!(f, "string constant \"{}\"", s),
            TokenKind::Identifier(s) => write!(f, "identifier '{}'", s),
        }
    }
}

/// Why a lexeme could not be classified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unterminated string constant")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("integer constant {0} is outside 0..=32767")]
    IntegerOutOfRange(String),
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at {location}: {reason}")]
pub struct LexError {
    pub reason: LexErrorKind,
    pub location: SourceLocation,
}

impl LexError {
    fn new(reason: LexErrorKind, location: SourceLocation) -> Self {
        Self { reason, location }
    }
}

/// Lexer for Jack source code
pub struct Lexer<'a> {
    chars: Chars<'a>,
    /// The one character read from the source but not yet consumed.
    lookahead: Option<char>,
    line: usize,
    column: usize,
    /// A token resolved by `peek` or `has_more_tokens` but not yet handed out.
    pending: Option<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source string.
    pub fn new(input: &'a str) -> Self {
        let mut chars = input.chars();
        let lookahead = chars.next();
        Self {
            chars,
            lookahead,
            line: 1,
            column: 1,
            pending: None,
        }
    }

    /// Whether another token remains. Skips any trailing whitespace and
    /// comments to answer, which is why it can fail.
    pub fn has_more_tokens(&mut self) -> Result<bool, LexError> {
        Ok(self.peek()?.is_some())
    }

    /// Consume and return the next token, or `None` once the input is exhausted.
    pub fn advance(&mut self) -> Result<Option<Token>, LexError> {
        match self.pending.take() {
            Some(token) => Ok(Some(token)),
            None => self.next_token(),
        }
    }

    /// Look at the next token without consuming it.
    pub fn peek(&mut self) -> Result<Option<&Token>, LexError> {
        if self.pending.is_none() {
            self.pending = self.next_token()?;
        }
        Ok(self.pending.as_ref())
    }

    /// Location of the next unread character; the end of input once exhausted.
    pub fn position(&self) -> SourceLocation {
        self.current_location()
    }

    /// Tokenize the entire remaining input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.advance()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Classify the next lexeme, skipping whitespace and comments first.
    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        loop {
            let loc = self.current_location();
            let ch = match self.bump() {
                Some(ch) => ch,
                None => return Ok(None),
            };

            let kind = match ch {
                c if c.is_whitespace() => continue,

                // Comment or division
                '/' => match self.lookahead {
                    Some('/') => {
                        self.skip_line_comment();
                        continue;
                    }
                    Some('*') => {
                        self.bump(); // skip '*'
                        self.skip_block_comment(loc)?;
                        continue;
                    }
                    _ => TokenKind::Symbol('/'),
                },

                c if c == '_' || c.is_alphabetic() => self.identifier_or_keyword(c),

                c if c.is_ascii_digit() => self.integer_constant(c, loc)?,

                '"' => self.string_constant(loc)?,

                c if SYMBOLS.contains(&c) || RESERVED_SYMBOLS.contains(&c) => {
                    TokenKind::Symbol(c)
                }

                c => {
                    return Err(LexError::new(
                        LexErrorKind::UnexpectedCharacter(c),
                        loc,
                    ))
                }
            };

            let token = Token::new(kind, loc);
            log::trace!("{}: {}", loc, token);
            return Ok(Some(token));
        }
    }

    /// Skip single-line comment (// ...), including the line break
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.bump() {
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip the rest of a block comment once `/*` has been consumed. Stops at
    /// the first `*/`; embedded `*` and `//` are ordinary comment text.
    fn skip_block_comment(&mut self, start: SourceLocation) -> Result<(), LexError> {
        loop {
            match self.bump() {
                Some('*') => {
                    while self.lookahead == Some('*') {
                        self.bump();
                    }
                    if self.lookahead == Some('/') {
                        self.bump();
                        return Ok(());
                    }
                }
                Some(_) => {}
                None => {
                    return Err(LexError::new(LexErrorKind::UnterminatedComment, start))
                }
            }
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char) -> TokenKind {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.lookahead {
            if ch == '_' || ch.is_alphanumeric() {
                ident.push(ch);
                self.bump();
            } else {
                break;
            }
        }

        match Keyword::from_lexeme(&ident) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier(ident),
        }
    }

    /// Parse integer constant; values above [`MAX_INTEGER`] are rejected
    fn integer_constant(
        &mut self,
        first_digit: char,
        loc: SourceLocation,
    ) -> Result<TokenKind, LexError> {
        let mut digits = String::new();
        digits.push(first_digit);

        while let Some(ch) = self.lookahead {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.bump();
            } else {
                break;
            }
        }

        match digits.parse::<u16>() {
            Ok(value) if value <= MAX_INTEGER => Ok(TokenKind::IntegerConstant(value)),
            _ => Err(LexError::new(LexErrorKind::IntegerOutOfRange(digits), loc)),
        }
    }

    /// Parse string constant. The text runs up to the next `"`; there are no
    /// escape sequences.
    fn string_constant(&mut self, loc: SourceLocation) -> Result<TokenKind, LexError> {
        let mut text = String::new();

        loop {
            match self.bump() {
                Some('"') => return Ok(TokenKind::StringConstant(text)),
                Some(ch) => text.push(ch),
                None => return Err(LexError::new(LexErrorKind::UnterminatedString, loc)),
            }
        }
    }

    /// Consume the lookahead character and read the next one from the source
    fn bump(&mut self) -> Option<char> {
        let ch = self.lookahead?;
        self.lookahead = self.chars.next();

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Location of the lookahead character
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().transpose()
    }
}
