//! Tree emitter
//!
//! Serializes the parser's open/close/leaf events into the bracketed tree
//! format:
//!
//! ```text
//! <class>
//!   <keyword> class </keyword>
//!   <identifier> Main </identifier>
//!   ...
//! </class>
//! ```
//!
//! Nonterminals become `<tag>` / `</tag>` pairs, indented two spaces per
//! level; terminals become a single `<kind> value </kind>` line. Output is
//! buffered, so a parse that fails part-way never exposes a truncated tree.

use crate::parser::ast::NodeKind;
use crate::parser::lexer::{Token, TokenKind};

/// Spaces per nesting level
pub const INDENT_WIDTH: usize = 2;

/// Buffered writer for the bracketed tree format
#[derive(Debug, Default)]
pub struct XmlEmitter {
    out: String,
    /// Currently open nodes, innermost last. Its length is the indentation depth.
    open_nodes: Vec<NodeKind>,
}

impl XmlEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a nonterminal node and indent its children one more level
    pub fn open(&mut self, node: NodeKind) {
        self.write_line(&format!("<{}>", node.tag()));
        self.open_nodes.push(node);
    }

    /// Close the innermost open node
    pub fn close(&mut self, node: NodeKind) {
        let closed = self.open_nodes.pop();
        debug_assert_eq!(closed, Some(node), "mismatched close of <{}>", node);
        self.write_line(&format!("</{}>", node.tag()));
    }

    /// Write one terminal line. `text` is emitted as given.
    pub fn leaf(&mut self, tag: &str, text: &str) {
        self.write_line(&format!("<{tag}> {text} </{tag}>"));
    }

    /// Write a token as a terminal, escaping markup characters in symbols
    pub fn token(&mut self, token: &Token) {
        match token.kind {
            TokenKind::Symbol(c) => self.leaf(token.tag(), &escape_symbol(c)),
            _ => self.leaf(token.tag(), &token.text()),
        }
    }

    /// Innermost open node, if any
    pub fn current(&self) -> Option<NodeKind> {
        self.open_nodes.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.open_nodes.len()
    }

    /// Consume the emitter and return everything written so far
    pub fn finish(self) -> String {
        debug_assert!(self.open_nodes.is_empty(), "unclosed nodes: {:?}", self.open_nodes);
        self.out
    }

    fn write_line(&mut self, line: &str) {
        let indent = self.open_nodes.len() * INDENT_WIDTH;
        self.out.extend(std::iter::repeat(' ').take(indent));
        self.out.push_str(line);
        self.out.push('\n');
    }
}

/// Entity form of `<`, `>` and `&`; every other symbol is returned verbatim
pub fn escape_symbol(c: char) -> String {
    match c {
        '<' => "&lt;".to_string(),
        '>' => "&gt;".to_string(),
        '&' => "&amp;".to_string(),
        _ => c.to_string(),
    }
}
