//! Interpret-time error types
//!
//! Every stage of the front end (preprocessing, tokenization, lexing,
//! parsing and the two pizza-literal stages) reports failures through the
//! single [`InterpError`] type. Each error carries a stable numeric
//! [`ErrorKind`] id, the [`Stage`] it originated in, a source [`Location`],
//! optionally the offending token text, and a human-readable message.
//!
//! Errors are fail-fast: the first one aborts the whole `interpret` call.

use super::scanner::Location;
use std::fmt;
use thiserror::Error;

/// What went wrong, with the stable id used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EofWhileParsing = 1,
    UnrecognizedToken,
    InvalidStatement,
    InvalidKeyword,
    InvalidInt,
    InvalidString,
    /// A decoded token whose payload does not match its type. Never caused
    /// by user input.
    InvalidTokenType,

    WrongPizzaComponent,
    UnrecognizedPizzaElement,
    BadPizzaLiteral,
    IllFormedPizza,
    DuplicateTopping,
    AmbiguousNone,
    MissingDelimiter,
    ExpectedDifferentToken,
}

impl ErrorKind {
    /// Stable numeric identifier shown to users.
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// The pipeline stage an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Preprocessing,
    Tokenization,
    Lexing,
    Parsing,
    PizzaTokenization,
    PizzaParsing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Preprocessing => "Preprocessing",
            Stage::Tokenization => "Tokenization",
            Stage::Lexing => "Lexing",
            Stage::Parsing => "Parsing",
            Stage::PizzaTokenization => "Pizza Tokenization",
            Stage::PizzaParsing => "Pizza Parsing",
        };
        f.write_str(name)
    }
}

/// A located interpret-time error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "{stage} error {}at line {}, character {}: {message} (Error ID {})",
    token_clause(.token),
    .location.line,
    .location.character,
    .kind.id()
)]
pub struct InterpError {
    pub kind: ErrorKind,
    pub stage: Stage,
    pub location: Location,
    pub token: Option<String>,
    pub message: String,
}

fn token_clause(token: &Option<String>) -> String {
    match token {
        Some(text) if !text.is_empty() => format!("with token {text} "),
        _ => String::new(),
    }
}

impl InterpError {
    pub fn new(
        kind: ErrorKind,
        stage: Stage,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            stage,
            location,
            token: None,
            message: message.into(),
        }
    }

    /// Attach the offending source text.
    pub fn with_token(mut self, text: impl Into<String>) -> Self {
        self.token = Some(text.into());
        self
    }

    /// Build the error raised when a decoded token's payload disagrees with
    /// what the grammar guaranteed.
    pub fn internal(location: Location, text: &str, expected: &str) -> Self {
        Self::new(
            ErrorKind::InvalidTokenType,
            Stage::Parsing,
            location,
            format!(
                "Invalid token type, expected {expected} (this is a bug in the interpreter, not in your program)"
            ),
        )
        .with_token(text)
    }

    /// True for interpreter bugs as opposed to errors in the user's program.
    pub fn is_internal(&self) -> bool {
        self.kind == ErrorKind::InvalidTokenType
    }
}
