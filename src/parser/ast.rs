// Parse-tree vocabulary shared by the lexer, the parser and the emitter

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Nonterminals that appear as bracketed nodes in the output tree.
///
/// `type`, `className`, `varName` and friends are grammar rules too, but they
/// never get their own tags; their terminals are emitted straight into the
/// enclosing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Class,
    ClassVarDec,
    SubroutineDec,
    ParameterList,
    SubroutineBody,
    VarDec,
    Statements,
    LetStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ReturnStatement,
    Expression,
    Term,
    ExpressionList,
    SubroutineCall,
}

impl NodeKind {
    /// Tag name used in the serialized tree.
    pub fn tag(self) -> &'static str {
        match self {
            NodeKind::Class => "class",
            NodeKind::ClassVarDec => "classVarDec",
            NodeKind::SubroutineDec => "subroutineDec",
            NodeKind::ParameterList => "parameterList",
            NodeKind::SubroutineBody => "subroutineBody",
            NodeKind::VarDec => "varDec",
            NodeKind::Statements => "statements",
            NodeKind::LetStatement => "letStatement",
            NodeKind::IfStatement => "ifStatement",
            NodeKind::WhileStatement => "whileStatement",
            NodeKind::DoStatement => "doStatement",
            NodeKind::ReturnStatement => "returnStatement",
            NodeKind::Expression => "expression",
            NodeKind::Term => "term",
            NodeKind::ExpressionList => "expressionList",
            NodeKind::SubroutineCall => "subroutineCall",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
