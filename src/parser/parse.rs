//! Top-level parser and the `interpret` entry point
//!
//! [`parse`] splits a token stream on `;` and hands each non-empty segment to
//! the grammar. Every segment is split off before any statement is built, so
//! a missing final delimiter is reported ahead of an invalid statement earlier
//! in the input.
//!
//! [`interpret`] runs the whole front end over raw source text:
//!
//! ```text
//! raw text → preprocess → tokenize → lex → parse → Program
//! ```
//!
//! The first error at any stage aborts the call, so a program is returned
//! either complete or not at all.

use super::ast::{Program, Statement};
use super::errors::{ErrorKind, InterpError, Stage};
use super::grammar::Grammar;
use super::lexer::{lex, Token};
use super::preprocess::preprocess;
use super::scanner::{is_space, Location};
use super::tokenizer::tokenize;
use tracing::{debug, trace};

/// Build one statement from a delimiter-free token segment.
pub fn parse_statement(tokens: &[Token], grammar: &Grammar) -> Result<Statement, InterpError> {
    if let Some(built) = grammar.make_statement(tokens) {
        let statement = built?;
        trace!(statement = statement.label(), "built statement");
        return Ok(statement);
    }

    let (location, text) = tokens
        .first()
        .map(|t| (t.location(), t.data.text.as_str()))
        .unwrap_or((Location::default(), ""));

    Err(InterpError::new(
        ErrorKind::InvalidStatement,
        Stage::Parsing,
        location,
        "Invalid statement (You may be missing a semicolon, or the keywords might be in the wrong order.)",
    )
    .with_token(text))
}

/// Split `tokens` into statements and build each one.
pub fn parse(tokens: &[Token], grammar: &Grammar) -> Result<Program, InterpError> {
    let mut segments = Vec::new();
    let mut rest = tokens;

    while let Some(first) = rest.first() {
        let Some(end) = rest.iter().position(Token::is_delimiter) else {
            return Err(InterpError::new(
                ErrorKind::MissingDelimiter,
                Stage::Parsing,
                first.location(),
                "Expected a statement delimiter (;) before reaching EOF",
            )
            .with_token(&first.data.text));
        };

        segments.push(&rest[..end]);
        rest = &rest[end + 1..];
    }

    segments
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .map(|segment| parse_statement(segment, grammar))
        .collect()
}

/// Turn raw source text into a program.
pub fn interpret(raw: &str, grammar: &Grammar) -> Result<Program, InterpError> {
    if raw.chars().all(is_space) {
        return Ok(Program::new());
    }

    let mut text = raw.to_string();
    if !text.ends_with('\n') {
        text.push('\n');
    }

    let preprocessed = preprocess(&text)?;
    let prototypes = tokenize(&preprocessed)?;
    let tokens = lex(&prototypes)?;
    let program = parse(&tokens, grammar)?;

    debug!(statements = program.len(), "interpreted source");
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::PizzaSpecifier;

    fn run(source: &str) -> Result<Program, InterpError> {
        interpret(source, &Grammar::spl_1())
    }

    #[test]
    fn test_multiple_statements() {
        let program = run("START SESSION;\nVOTE FOR PIZZA (1);\nQUIT;").unwrap();
        assert_eq!(program.len(), 3);
        assert_eq!(
            program[1],
            Statement::VotePizza {
                spec: PizzaSpecifier::Index(1),
                votes: 1
            }
        );
        assert_eq!(program[2], Statement::Quit);
    }

    #[test]
    fn test_empty_segments_are_skipped() {
        let program = run(";;QUIT;;\n;").unwrap();
        assert_eq!(program, vec![Statement::Quit]);
    }

    #[test]
    fn test_whitespace_only_input() {
        assert!(run("").unwrap().is_empty());
        assert!(run("  \n\t\r\n").unwrap().is_empty());
    }

    #[test]
    fn test_comment_only_input() {
        assert!(run("# nothing to see here\n").unwrap().is_empty());
    }

    #[test]
    fn test_missing_delimiter() {
        let err = run("START SESSION;\n  END SESSION").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingDelimiter);
        assert_eq!(err.stage, Stage::Parsing);
        assert_eq!(err.location, Location::new(2, 3));
        assert_eq!(err.token.as_deref(), Some("END"));
    }

    #[test]
    fn test_missing_delimiter_reported_before_invalid_statement() {
        let err = run("SESSION START; QUIT").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingDelimiter);
    }

    #[test]
    fn test_invalid_statement() {
        let err = run("QUIT;\nVOTE PIZZA (1);").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidStatement);
        assert_eq!(err.location, Location::new(2, 1));
        assert_eq!(err.token.as_deref(), Some("VOTE"));
    }

    #[test]
    fn test_errors_from_each_stage() {
        assert_eq!(run("QUIT; 42;").unwrap_err().stage, Stage::Tokenization);
        assert_eq!(run("QUIX;").unwrap_err().stage, Stage::Lexing);
        assert_eq!(run("QUIT QUIT;").unwrap_err().stage, Stage::Parsing);
    }

    #[test]
    fn test_trailing_comment_without_newline() {
        // A newline is appended before preprocessing
        let program = run("QUIT; # done").unwrap();
        assert_eq!(program, vec![Statement::Quit]);
    }
}
