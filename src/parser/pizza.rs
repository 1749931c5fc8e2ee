//! Pizza literal mini-parser
//!
//! Pizza literals are a small language nested inside the token stream:
//!
//! ```text
//! [{CRUST:THINCRUST}, {SAUCE:PESTO}, {RIGHT:HAM}, pineapple]   <- not valid
//! [{CRUST:THINCRUST}, {SAUCE:PESTO}, {RIGHT:HAM}, {pineapple}] <- valid
//! ```
//!
//! Three stages turn the text between the outer brackets into a [`Pizza`]:
//! 1. [`tokenize_pizza`] splits it into `{...}` clauses.
//! 2. [`parse_element`] decodes one clause into a [`PizzaElement`], either
//!    explicitly (`KIND:VALUE`) or by inferring the kind from the value.
//! 3. [`parse_pizza`] folds the elements onto a blank canvas and fills in the
//!    default crust, sauce and cheese.
//!
//! Failures are reported as [`PizzaError`]s; the lexer re-raises them at the
//! enclosing token.

use super::errors::{ErrorKind, Stage};
use super::scanner::{is_pizza_punct, is_space, Scanner};
use super::tokenizer::strip_delimiters;
use crate::pizza::{
    Cheese, Crust, Pizza, PizzaElement, Sauce, Topping, ToppingArrangement,
    ToppingPosition,
};
use thiserror::Error;
use tracing::trace;

/// Errors raised while decoding a pizza literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PizzaError {
    #[error("Expected a '{expected}' before the next '{found}'")]
    Mismatch { expected: char, found: char },

    #[error("Unexpected character '{0}'")]
    ErrantChar(char),

    #[error("Expected a '{0}' before the end of the pizza specifier")]
    Unterminated(char),

    #[error("\"{0}\" is not a pizza component")]
    UnknownComponent(String),

    #[error("Unrecognized topping or element \"{0}\"")]
    UnrecognizedElement(String),

    #[error("Ambiguous \"NONE\" (Did you mean no sauce or no cheese?)")]
    AmbiguousNone,

    #[error("Too many colons in pizza element specifier")]
    TooManyColons,

    #[error("Empty element")]
    EmptyElement,

    #[error("Redefinition of {0} is not allowed")]
    Redefinition(&'static str),

    #[error("Duplicate topping {}", arrangement_name(.0))]
    DuplicateTopping(ToppingArrangement),
}

fn arrangement_name(ta: &ToppingArrangement) -> String {
    format!(
        "{}{}",
        ta.topping.display_name(),
        ta.position.display_suffix()
    )
}

impl PizzaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PizzaError::Mismatch { .. } => ErrorKind::ExpectedDifferentToken,
            PizzaError::ErrantChar(_) => ErrorKind::BadPizzaLiteral,
            PizzaError::UnknownComponent(_)
            | PizzaError::UnrecognizedElement(_) => {
                ErrorKind::UnrecognizedPizzaElement
            }
            PizzaError::AmbiguousNone => ErrorKind::AmbiguousNone,
            PizzaError::DuplicateTopping(_) => ErrorKind::DuplicateTopping,
            PizzaError::Unterminated(_)
            | PizzaError::TooManyColons
            | PizzaError::EmptyElement
            | PizzaError::Redefinition(_) => ErrorKind::IllFormedPizza,
        }
    }

    /// The mini-parser stage that raised this error.
    pub fn stage(&self) -> Stage {
        match self {
            PizzaError::Mismatch { .. }
            | PizzaError::ErrantChar(_)
            | PizzaError::Unterminated(_) => Stage::PizzaTokenization,
            _ => Stage::PizzaParsing,
        }
    }
}

/// Split the interior of a `[...]` literal into its `{...}` clauses.
///
/// Whitespace-only input yields no clauses (the default pizza).
pub fn tokenize_pizza(interior: &str) -> Result<Vec<&str>, PizzaError> {
    if interior.chars().all(is_space) {
        return Ok(Vec::new());
    }

    let mut scan = Scanner::new(interior, Stage::PizzaTokenization);
    let mut clauses = Vec::new();
    let mut expects = '{';
    let mut begin = 0;

    while let Some(ch) = scan.current() {
        if ch == expects {
            match expects {
                '{' => {
                    begin = scan.stamp();
                    expects = '}';
                }
                '}' => {
                    clauses.push(scan.slice(begin, scan.stamp_next()));
                    expects = ',';
                }
                _ => expects = '{',
            }
        } else if is_pizza_punct(ch) {
            return Err(PizzaError::Mismatch {
                expected: expects,
                found: ch,
            });
        } else if expects != '}' && !is_space(ch) {
            return Err(PizzaError::ErrantChar(ch));
        }

        scan.advance();
    }

    match expects {
        ',' => Ok(clauses),
        other => Err(PizzaError::Unterminated(other)),
    }
}

/// Decode the interior of one `{...}` clause.
pub fn parse_element(interior: &str) -> Result<PizzaElement, PizzaError> {
    let text = interior.trim_matches(is_space);
    if text.is_empty() {
        return Err(PizzaError::EmptyElement);
    }

    let mut parts = text.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(word), None, _) => infer_element(word),
        (Some(kind), Some(value), None) => explicit_element(kind, value),
        _ => Err(PizzaError::TooManyColons),
    }
}

/// `KIND:VALUE`, where KIND is a base component or a topping position.
fn explicit_element(kind: &str, value: &str) -> Result<PizzaElement, PizzaError> {
    let kind = kind.trim_matches(is_space);
    let value = value.trim_matches(is_space);

    let element = match kind.to_ascii_uppercase().as_str() {
        "CRUST" => Crust::from_word(value).map(PizzaElement::Crust),
        "SAUCE" => Sauce::from_word(value).map(PizzaElement::Sauce),
        "CHEESE" => Cheese::from_word(value).map(PizzaElement::Cheese),
        _ => {
            let Some(position) = ToppingPosition::from_word(kind) else {
                return Err(PizzaError::UnknownComponent(kind.to_string()));
            };
            Topping::from_word(value).map(|topping| {
                PizzaElement::Topping(ToppingArrangement::new(position, topping))
            })
        }
    };

    element.ok_or_else(|| PizzaError::UnrecognizedElement(value.to_string()))
}

/// A bare value: try crust, sauce, cheese, then topping (covering the whole
/// pizza), first match wins.
fn infer_element(word: &str) -> Result<PizzaElement, PizzaError> {
    let word = word.trim_matches(is_space);

    if word.eq_ignore_ascii_case("NONE") {
        return Err(PizzaError::AmbiguousNone);
    }

    Crust::from_word(word)
        .map(PizzaElement::Crust)
        .or_else(|| Sauce::from_word(word).map(PizzaElement::Sauce))
        .or_else(|| Cheese::from_word(word).map(PizzaElement::Cheese))
        .or_else(|| {
            Topping::from_word(word).map(|topping| {
                PizzaElement::Topping(ToppingArrangement::new(
                    ToppingPosition::All,
                    topping,
                ))
            })
        })
        .ok_or_else(|| PizzaError::UnrecognizedElement(word.to_string()))
}

/// Decode every `{...}` clause produced by [`tokenize_pizza`].
pub fn parse_elements(clauses: &[&str]) -> Result<Vec<PizzaElement>, PizzaError> {
    clauses
        .iter()
        .map(|clause| parse_element(strip_delimiters(clause)))
        .collect()
}

/// Pizza under construction; `None` means not yet specified.
#[derive(Default)]
struct Canvas {
    crust: Option<Crust>,
    sauce: Option<Sauce>,
    cheese: Option<Cheese>,
    toppings: Vec<ToppingArrangement>,
}

fn set_once<T>(
    slot: &mut Option<T>,
    value: T,
    what: &'static str,
) -> Result<(), PizzaError> {
    if slot.is_some() {
        return Err(PizzaError::Redefinition(what));
    }
    *slot = Some(value);
    Ok(())
}

/// Fold decoded elements into a finished pizza.
///
/// Each base component may be given at most once; an arrangement may not be
/// repeated (the same topping in two different positions is fine).
pub fn parse_pizza(elements: &[PizzaElement]) -> Result<Pizza, PizzaError> {
    let mut canvas = Canvas::default();

    for element in elements {
        match *element {
            PizzaElement::Topping(ta) => {
                if canvas.toppings.contains(&ta) {
                    return Err(PizzaError::DuplicateTopping(ta));
                }
                canvas.toppings.push(ta);
            }
            PizzaElement::Cheese(c) => set_once(&mut canvas.cheese, c, "cheese")?,
            PizzaElement::Sauce(s) => set_once(&mut canvas.sauce, s, "sauce")?,
            PizzaElement::Crust(c) => set_once(&mut canvas.crust, c, "crust")?,
        }
    }

    Ok(Pizza {
        crust: canvas.crust.unwrap_or(Pizza::DEFAULT_CRUST),
        sauce: canvas.sauce.unwrap_or(Pizza::DEFAULT_SAUCE),
        cheese: canvas.cheese.unwrap_or(Pizza::DEFAULT_CHEESE),
        toppings: canvas.toppings,
    })
}

/// Run the whole mini-parser over the interior of a `[...]` literal.
pub fn interpret_pizza(interior: &str) -> Result<Pizza, PizzaError> {
    let clauses = tokenize_pizza(interior)?;
    let elements = parse_elements(&clauses)?;
    trace!(clauses = clauses.len(), "decoded pizza literal");
    parse_pizza(&elements)
}
