//! Lexer: token prototypes → typed tokens
//!
//! Each [`TokenPrototype`] is decoded according to the type the tokenizer
//! gave it:
//! - keywords are looked up case-insensitively in the keyword table
//! - integers are parsed as 32-bit signed values
//! - strings must be pure ASCII
//! - pizzas and pizza elements are handed to the pizza mini-parser
//!
//! A [`Token`] stores its decoded payload as a [`TokenValue`] and derives its
//! [`TokenType`] from it, so the two can never disagree.

use super::ast::PizzaSpecifier;
use super::errors::{ErrorKind, InterpError, Stage};
use super::pizza::{interpret_pizza, parse_element, PizzaError};
use super::scanner::{is_space, Location};
use super::tokenizer::{strip_delimiters, TokenData, TokenPrototype, TokenType};
use crate::pizza::{Pizza, PizzaElement};
use rustc_hash::FxHashMap;
use std::fmt;
use std::num::IntErrorKind;
use std::sync::LazyLock;
use tracing::{debug, trace};

/// The reserved words of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Pizza,
    Session,

    Add,
    Alter,
    As,
    Cheese,
    Crust,
    Democracy,
    Details,
    End,
    For,
    From,
    Load,
    Name,
    Quit,
    Remove,
    Reset,
    Sauce,
    Save,
    Select,
    Set,
    Start,
    Subvert,
    To,
    Top,
    Topping,
    View,
    Vote,
    Votes,
}

impl Keyword {
    pub const ALL: [Keyword; 29] = [
        Keyword::Pizza,
        Keyword::Session,
        Keyword::Add,
        Keyword::Alter,
        Keyword::As,
        Keyword::Cheese,
        Keyword::Crust,
        Keyword::Democracy,
        Keyword::Details,
        Keyword::End,
        Keyword::For,
        Keyword::From,
        Keyword::Load,
        Keyword::Name,
        Keyword::Quit,
        Keyword::Remove,
        Keyword::Reset,
        Keyword::Sauce,
        Keyword::Save,
        Keyword::Select,
        Keyword::Set,
        Keyword::Start,
        Keyword::Subvert,
        Keyword::To,
        Keyword::Top,
        Keyword::Topping,
        Keyword::View,
        Keyword::Vote,
        Keyword::Votes,
    ];

    pub fn spelling(self) -> &'static str {
        match self {
            Keyword::Pizza => "PIZZA",
            Keyword::Session => "SESSION",
            Keyword::Add => "ADD",
            Keyword::Alter => "ALTER",
            Keyword::As => "AS",
            Keyword::Cheese => "CHEESE",
            Keyword::Crust => "CRUST",
            Keyword::Democracy => "DEMOCRACY",
            Keyword::Details => "DETAILS",
            Keyword::End => "END",
            Keyword::For => "FOR",
            Keyword::From => "FROM",
            Keyword::Load => "LOAD",
            Keyword::Name => "NAME",
            Keyword::Quit => "QUIT",
            Keyword::Remove => "REMOVE",
            Keyword::Reset => "RESET",
            Keyword::Sauce => "SAUCE",
            Keyword::Save => "SAVE",
            Keyword::Select => "SELECT",
            Keyword::Set => "SET",
            Keyword::Start => "START",
            Keyword::Subvert => "SUBVERT",
            Keyword::To => "TO",
            Keyword::Top => "TOP",
            Keyword::Topping => "TOPPING",
            Keyword::View => "VIEW",
            Keyword::Vote => "VOTE",
            Keyword::Votes => "VOTES",
        }
    }

    /// Case-insensitive lookup.
    pub fn from_word(word: &str) -> Option<Self> {
        KEYWORDS.get(word.to_ascii_uppercase().as_str()).copied()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

static KEYWORDS: LazyLock<FxHashMap<&'static str, Keyword>> =
    LazyLock::new(|| Keyword::ALL.iter().map(|k| (k.spelling(), *k)).collect());

/// Decoded payload of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Keyword(Keyword),
    Int(i32),
    String(String),
    Pizza(Pizza),
    PizzaElement(PizzaElement),
    Delimiter,
}

impl TokenValue {
    pub fn kind(&self) -> TokenType {
        match self {
            TokenValue::Keyword(_) => TokenType::Keyword,
            TokenValue::Int(_) => TokenType::Int,
            TokenValue::String(_) => TokenType::String,
            TokenValue::Pizza(_) => TokenType::Pizza,
            TokenValue::PizzaElement(_) => TokenType::PizzaElement,
            TokenValue::Delimiter => TokenType::Delimiter,
        }
    }
}

/// A fully decoded token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub value: TokenValue,
    pub data: TokenData,
}

impl Token {
    pub fn kind(&self) -> TokenType {
        self.value.kind()
    }

    pub fn location(&self) -> Location {
        self.data.location
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.value == TokenValue::Keyword(keyword)
    }

    pub fn is_delimiter(&self) -> bool {
        self.value == TokenValue::Delimiter
    }

    pub fn as_int(&self) -> Result<i32, InterpError> {
        match self.value {
            TokenValue::Int(n) => Ok(n),
            _ => Err(self.mismatch("an integer")),
        }
    }

    pub fn as_string(&self) -> Result<&str, InterpError> {
        match &self.value {
            TokenValue::String(s) => Ok(s),
            _ => Err(self.mismatch("a string")),
        }
    }

    pub fn as_pizza(&self) -> Result<&Pizza, InterpError> {
        match &self.value {
            TokenValue::Pizza(p) => Ok(p),
            _ => Err(self.mismatch("a pizza")),
        }
    }

    pub fn as_element(&self) -> Result<PizzaElement, InterpError> {
        match self.value {
            TokenValue::PizzaElement(e) => Ok(e),
            _ => Err(self.mismatch("a pizza element")),
        }
    }

    /// Read an integer, string or pizza token as a reference to an order.
    pub fn to_specifier(&self) -> Result<PizzaSpecifier, InterpError> {
        match &self.value {
            TokenValue::Int(n) => Ok(PizzaSpecifier::Index(*n)),
            TokenValue::String(s) => Ok(PizzaSpecifier::Name(s.clone())),
            TokenValue::Pizza(p) => Ok(PizzaSpecifier::Replica(p.clone())),
            _ => Err(self.mismatch("a pizza specifier")),
        }
    }

    fn mismatch(&self, expected: &str) -> InterpError {
        InterpError::internal(self.data.location, &self.data.text, expected)
    }
}

enum IntFailure {
    Digits,
    Range,
}

fn parse_int(text: &str) -> Result<i32, IntFailure> {
    text.trim_matches(is_space)
        .parse::<i32>()
        .map_err(|err| match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => IntFailure::Range,
            _ => IntFailure::Digits,
        })
}

fn rejected_literal(err: PizzaError, data: &TokenData) -> InterpError {
    debug!(stage = %err.stage(), kind = ?err.kind(), "pizza literal rejected");
    InterpError::new(err.kind(), Stage::Lexing, data.location, err.to_string())
        .with_token(&data.text)
}

/// Decode a single prototype.
pub fn lex_token(prototype: &TokenPrototype) -> Result<Token, InterpError> {
    let data = &prototype.data;
    let fail = |kind: ErrorKind, message: String| {
        InterpError::new(kind, Stage::Lexing, data.location, message).with_token(&data.text)
    };

    let value = match prototype.kind {
        TokenType::Keyword => Keyword::from_word(&data.text)
            .map(TokenValue::Keyword)
            .ok_or_else(|| {
                fail(
                    ErrorKind::InvalidKeyword,
                    format!("Invalid keyword \"{}\"", data.text),
                )
            })?,

        TokenType::Int => {
            let digits = strip_delimiters(&data.text);
            match parse_int(digits) {
                Ok(n) => TokenValue::Int(n),
                Err(IntFailure::Digits) => {
                    return Err(fail(
                        ErrorKind::InvalidInt,
                        format!("Invalid integer \"{digits}\" - unrecognized digit(s)"),
                    ));
                }
                Err(IntFailure::Range) => {
                    return Err(fail(
                        ErrorKind::InvalidInt,
                        format!(
                            "Invalid integer \"{digits}\" - value causes overflow or underflow"
                        ),
                    ));
                }
            }
        }

        TokenType::String => {
            let content = strip_delimiters(&data.text);
            if !content.is_ascii() {
                return Err(fail(
                    ErrorKind::InvalidString,
                    format!("Invalid string \"{content}\" (contains non-ASCII characters)"),
                ));
            }
            TokenValue::String(content.to_string())
        }

        TokenType::Pizza => interpret_pizza(strip_delimiters(&data.text))
            .map(TokenValue::Pizza)
            .map_err(|err| rejected_literal(err, data))?,

        TokenType::PizzaElement => parse_element(strip_delimiters(&data.text))
            .map(TokenValue::PizzaElement)
            .map_err(|err| rejected_literal(err, data))?,

        TokenType::Delimiter => TokenValue::Delimiter,
    };

    trace!(kind = %value.kind(), text = %data.text, "lexed token");
    Ok(Token {
        value,
        data: data.clone(),
    })
}

/// Decode every prototype, stopping at the first failure.
pub fn lex(prototypes: &[TokenPrototype]) -> Result<Vec<Token>, InterpError> {
    let tokens = prototypes
        .iter()
        .map(lex_token)
        .collect::<Result<Vec<_>, _>>()?;
    debug!(count = tokens.len(), "lexed tokens");
    Ok(tokens)
}
