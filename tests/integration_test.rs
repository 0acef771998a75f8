// Integration tests for the Jack analyzer

use jack_analyzer::parser::lexer::{Keyword, Lexer, TokenKind};
use jack_analyzer::parser::{ParseError, Parser};
use jack_analyzer::{analyze_path, analyze_source, AnalyzerConfig};
use std::fs;
use std::path::Path;

fn golden(name: &str) -> (String, String) {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/golden");
    let source = fs::read_to_string(dir.join(format!("{name}.jack")))
        .expect("Failed to read golden source");
    let expected = fs::read_to_string(dir.join(format!("{name}.xml")))
        .expect("Failed to read golden tree");
    (source, expected)
}

#[test]
fn test_minimal_program_golden() {
    let (source, expected) = golden("Minimal");
    let xml = analyze_source(&source).expect("Parsing failed");
    assert_eq!(xml, expected);
}

#[test]
fn test_full_program_golden() {
    let (source, expected) = golden("Counter");
    let xml = analyze_source(&source).expect("Parsing failed");
    assert_eq!(xml, expected);
}

#[test]
fn test_fresh_parses_are_byte_identical() {
    let (source, _) = golden("Counter");
    let first = Parser::new(&source).unwrap().parse().unwrap();
    let second = Parser::new(&source).unwrap().parse().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_tags_are_balanced() {
    let (source, _) = golden("Counter");
    let xml = analyze_source(&source).unwrap();

    let mut stack: Vec<&str> = Vec::new();
    for line in xml.lines() {
        let line = line.trim_start();
        if let Some(tag) = line.strip_prefix("</") {
            let tag = tag.trim_end_matches('>');
            assert_eq!(stack.pop(), Some(tag), "unbalanced close {line}");
        } else if line.ends_with('>') && !line.contains(' ') {
            stack.push(&line[1..line.len() - 1]);
        }
    }
    assert!(stack.is_empty());
}

#[test]
fn test_lexer_and_parser_agree_on_comments() {
    let source = "/** doc */ class A { // line\n function void f() { /* x */ return; } }";
    let tokens = Lexer::new(source).tokenize().unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Class));
    assert_eq!(tokens.len(), 13);

    let xml = analyze_source(source).unwrap();
    let (_, expected) = golden("Minimal");
    assert_eq!(xml, expected);
}

#[test]
fn test_grammar_error_reports_position() {
    let source = "class A {\n  function void f() {\n    let x = ;\n  }\n}\n";
    let err = analyze_source(source).unwrap_err();
    match err {
        ParseError::Unexpected {
            location, found, ..
        } => {
            assert_eq!(location.line, 3);
            assert_eq!(location.column, 13);
            assert_eq!(found, "symbol ';'");
        }
        other => panic!("Expected grammar mismatch, got {other:?}"),
    }
}

#[test]
fn test_directory_run_matches_golden() {
    let dir = tempfile::tempdir().unwrap();
    let (source, expected) = golden("Counter");
    fs::write(dir.path().join("Counter.jack"), &source).unwrap();

    let outcomes = analyze_path(dir.path(), &AnalyzerConfig::default()).unwrap();

    assert_eq!(outcomes.len(), 1);
    let analysis = outcomes[0].result.as_ref().expect("analysis failed");
    assert_eq!(fs::read_to_string(&analysis.output).unwrap(), expected);
}
