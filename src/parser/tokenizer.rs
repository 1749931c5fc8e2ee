//! Tokenizer: preprocessed text → token prototypes
//!
//! The tokenizer only decides the *shape* of each token and where it ends; it
//! does not decode anything. At each non-whitespace position it tries, in
//! order:
//!
//! 1. a letter starts a keyword running to the next whitespace or `;`
//! 2. an opening bracket starts a literal running through its closer
//!    (`(`→int, `{`→pizza element, `[`→pizza, `"`→string)
//! 3. `;` is a delimiter
//! 4. anything else is an unrecognized token

use super::errors::{ErrorKind, InterpError, Stage};
use super::scanner::{is_alpha, is_space, whitespace_or_semicolon, Location, Scanner};
use std::fmt;
use tracing::debug;

/// The type a token prototype will be lexed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Keyword,
    Int,
    String,
    Pizza,
    PizzaElement,
    Delimiter,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenType::Keyword => "keyword",
            TokenType::Int => "integer",
            TokenType::String => "string",
            TokenType::Pizza => "pizza",
            TokenType::PizzaElement => "pizza element",
            TokenType::Delimiter => "delimiter",
        };
        f.write_str(name)
    }
}

/// Where a token came from: its location and original source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenData {
    pub location: Location,
    pub text: String,
}

/// A token whose text has not been decoded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPrototype {
    pub kind: TokenType,
    pub data: TokenData,
}

/// Closer and token type for each opening bracket.
pub(crate) fn bracket_pair(opener: char) -> Option<(char, TokenType)> {
    match opener {
        '(' => Some((')', TokenType::Int)),
        '{' => Some(('}', TokenType::PizzaElement)),
        '[' => Some((']', TokenType::Pizza)),
        '"' => Some(('"', TokenType::String)),
        _ => None,
    }
}

/// Drop the first and last character (a literal's brackets).
pub(crate) fn strip_delimiters(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Split preprocessed source into token prototypes.
pub fn tokenize(source: &str) -> Result<Vec<TokenPrototype>, InterpError> {
    let mut prototypes = Vec::new();
    let mut scan = Scanner::new(source, Stage::Tokenization);

    scan.advance_while(is_space);

    while let Some(ch) = scan.current() {
        let begin = scan.stamp();
        let location = scan.location();

        let kind = if is_alpha(ch) {
            scan.advance_until(whitespace_or_semicolon)?;
            TokenType::Keyword
        } else if let Some((closer, kind)) = bracket_pair(ch) {
            scan.advance_until_char(closer)?;
            scan.advance();
            kind
        } else if ch == ';' {
            scan.advance();
            TokenType::Delimiter
        } else {
            scan.advance_until(whitespace_or_semicolon)?;
            let text = scan.slice(begin, scan.stamp());
            return Err(InterpError::new(
                ErrorKind::UnrecognizedToken,
                Stage::Tokenization,
                location,
                format!("Unrecognized token \"{text}\""),
            )
            .with_token(text));
        };

        prototypes.push(TokenPrototype {
            kind,
            data: TokenData {
                location,
                text: scan.slice(begin, scan.stamp()).to_string(),
            },
        });

        scan.advance_while(is_space);
    }

    debug!(count = prototypes.len(), "tokenized source");
    Ok(prototypes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(prototypes: &[TokenPrototype]) -> Vec<TokenType> {
        prototypes.iter().map(|p| p.kind).collect()
    }

    #[test]
    fn test_statement_shapes() {
        let prototypes =
            tokenize("ADD PIZZA [{CRUST:THINCRUST}, {HAM}] AS \"Test\";\n").unwrap();

        assert_eq!(
            kinds(&prototypes),
            vec![
                TokenType::Keyword,
                TokenType::Keyword,
                TokenType::Pizza,
                TokenType::Keyword,
                TokenType::String,
                TokenType::Delimiter,
            ]
        );
        assert_eq!(prototypes[2].data.text, "[{CRUST:THINCRUST}, {HAM}]");
        assert_eq!(prototypes[4].data.text, "\"Test\"");
    }

    #[test]
    fn test_locations() {
        let prototypes = tokenize("  VOTE FOR\n PIZZA (3);\n").unwrap();

        assert_eq!(prototypes[0].data.location, Location::new(1, 3));
        assert_eq!(prototypes[1].data.location, Location::new(1, 8));
        assert_eq!(prototypes[2].data.location, Location::new(2, 2));
        assert_eq!(prototypes[3].data.location, Location::new(2, 8));
        assert_eq!(prototypes[3].kind, TokenType::Int);
        assert_eq!(prototypes[4].data.location, Location::new(2, 11));
    }

    #[test]
    fn test_keyword_stops_at_semicolon() {
        let prototypes = tokenize("QUIT;\n").unwrap();
        assert_eq!(prototypes[0].data.text, "QUIT");
        assert_eq!(prototypes[1].kind, TokenType::Delimiter);
    }

    #[test]
    fn test_keyword_at_eof_is_unterminated() {
        let err = tokenize("START SESSION").unwrap_err();
        assert_eq!(err.kind, ErrorKind::EofWhileParsing);
        assert_eq!(err.location, Location::new(1, 7));

        let prototypes = tokenize("START SESSION\n").unwrap();
        assert_eq!(prototypes.len(), 2);
    }

    #[test]
    fn test_unrecognized_token() {
        let err = tokenize("VOTE 12 ;\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnrecognizedToken);
        assert_eq!(err.location, Location::new(1, 6));
        assert_eq!(err.token.as_deref(), Some("12"));
    }

    #[test]
    fn test_unterminated_literal() {
        let err = tokenize("NAME SESSION \"oops;\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::EofWhileParsing);
        assert_eq!(err.stage, Stage::Tokenization);
        assert_eq!(err.location, Location::new(1, 14));
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize(" \n\t ").unwrap().is_empty());
    }

    #[test]
    fn test_strip_delimiters() {
        assert_eq!(strip_delimiters("(42)"), "42");
        assert_eq!(strip_delimiters("\"\""), "");
        assert_eq!(strip_delimiters("x"), "");
    }
}
