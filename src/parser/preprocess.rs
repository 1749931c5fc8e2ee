//! Comment removal
//!
//! A comment starts at a `#` that is not inside a bracket pair or a string
//! and runs to the end of its line. The newline itself is kept, so every
//! surviving character keeps its original line and column.
//!
//! Bracket tracking is single-level: only the closer of the most recently
//! opened pair is remembered, and nothing else opens until it is seen. An
//! opener that is never closed therefore disables comment detection for the
//! rest of the input; the tokenizer then fails on the unterminated literal,
//! which is where that error is reported.

use super::errors::InterpError;
use super::errors::Stage;
use super::scanner::Scanner;
use super::tokenizer::bracket_pair;
use tracing::debug;

pub fn preprocess(raw: &str) -> Result<String, InterpError> {
    let mut scan = Scanner::new(raw, Stage::Preprocessing);
    let mut closer: Option<char> = None;
    let mut comments = 0usize;

    while let Some(ch) = scan.current() {
        match closer {
            None if ch == '#' => {
                let begin = scan.stamp();
                scan.advance_until_char('\n')?;
                let end = scan.stamp();
                scan.cut_out(begin, end).advance();
                comments += 1;
                continue;
            }
            None => {
                if let Some((expected, _)) = bracket_pair(ch) {
                    closer = Some(expected);
                }
            }
            Some(expected) if expected == ch => closer = None,
            Some(_) => {}
        }

        scan.advance();
    }

    debug!(comments, "preprocessed source");
    Ok(scan.into_retained())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::errors::ErrorKind;

    #[test]
    fn test_strips_line_comments() {
        let out = preprocess("START SESSION; # begin\n# whole line\nQUIT;\n").unwrap();
        assert_eq!(out, "START SESSION; \n\nQUIT;\n");
    }

    #[test]
    fn test_hash_inside_brackets_is_kept() {
        let source = "ADD PIZZA [{HAM}] AS \"#1 pick\"; # note\n";
        assert_eq!(
            preprocess(source).unwrap(),
            "ADD PIZZA [{HAM}] AS \"#1 pick\"; \n"
        );

        assert_eq!(preprocess("VOTE (#);\n").unwrap(), "VOTE (#);\n");
    }

    #[test]
    fn test_unmatched_opener_suppresses_comments() {
        let source = "NAME SESSION \"open; # not a comment\n";
        assert_eq!(preprocess(source).unwrap(), source);
    }

    #[test]
    fn test_comment_without_newline() {
        let err = preprocess("QUIT; # trailing").unwrap_err();
        assert_eq!(err.kind, ErrorKind::EofWhileParsing);
        assert_eq!(err.stage, Stage::Preprocessing);
    }

    #[test]
    fn test_empty_comment() {
        assert_eq!(preprocess("#\nQUIT;\n").unwrap(), "\nQUIT;\n");
    }
}
