//! Character cursor shared by every scanning stage
//!
//! [`Scanner`] walks a borrowed source string one character at a time while
//! keeping a 1-indexed [`Location`] up to date. The preprocessor, the
//! tokenizer and the pizza-literal tokenizer are all written against it, so
//! location tracking and the "ran out of input while looking for something"
//! failure live in exactly one place.
//!
//! # Termination
//!
//! [`Scanner::advance_until`] always moves at least one character before it
//! tests its predicate, and fails once the end of input is reached. Every
//! scanning loop built on it therefore either makes progress or errors out.
//!
//! # Excision
//!
//! The source buffer is never mutated. [`Scanner::cut_out`] records a span to
//! drop, and [`Scanner::into_retained`] builds a fresh buffer from everything
//! that was not cut. Surviving text keeps its line/character numbering as long
//! as the cut spans never contain a newline.

use super::errors::{ErrorKind, InterpError, Stage};
use std::fmt;
use std::ops::Range;

/// A (line, character) position in source text, both 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub line: usize,
    pub character: usize,
}

impl Location {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.line, self.character)
    }
}

/// Whitespace as understood by the language (no form feed).
pub fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\n' | '\t' | '\r' | '\u{0B}')
}

pub fn is_alpha(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

/// Punctuation that structures a pizza literal.
pub fn is_pizza_punct(ch: char) -> bool {
    matches!(ch, '{' | '}' | ',')
}

/// Where a keyword (or a malformed token) ends.
pub fn whitespace_or_semicolon(ch: char) -> bool {
    is_space(ch) || ch == ';'
}

/// Cursor over source text
#[derive(Debug)]
pub struct Scanner<'a> {
    text: &'a str,
    position: usize,
    location: Location,
    stage: Stage,
    excised: Vec<Range<usize>>,
}

impl<'a> Scanner<'a> {
    /// Place a scanner at the beginning of `text`. `stage` is the pipeline
    /// stage blamed if the scanner runs off the end of the input.
    pub fn new(text: &'a str, stage: Stage) -> Self {
        Self {
            text,
            position: 0,
            location: Location::default(),
            stage,
            excised: Vec::new(),
        }
    }

    /// The character under the cursor, or `None` at end of input.
    pub fn current(&self) -> Option<char> {
        self.text[self.position..].chars().next()
    }

    /// Move one character forward. No-op at end of input.
    pub fn advance(&mut self) -> &mut Self {
        if let Some(ch) = self.current() {
            self.position += ch.len_utf8();
            if ch == '\n' {
                self.location.line += 1;
                self.location.character = 1;
            } else {
                self.location.character += 1;
            }
        }
        self
    }

    /// Move forward while `pred` holds. Does nothing if it already fails.
    pub fn advance_while(&mut self, pred: impl Fn(char) -> bool) -> &mut Self {
        while let Some(ch) = self.current() {
            if !pred(ch) {
                break;
            }
            self.advance();
        }
        self
    }

    pub fn advance_while_char(&mut self, target: char) -> &mut Self {
        self.advance_while(|ch| ch == target)
    }

    /// Move at least one character forward, then keep going until `pred`
    /// holds on the character under the cursor.
    ///
    /// Sitting on a matching character does not count: the cursor always
    /// moves past it first, so this finds the *next* match.
    pub fn advance_until(
        &mut self,
        pred: impl Fn(char) -> bool,
    ) -> Result<&mut Self, InterpError> {
        let start = self.location;

        loop {
            self.advance();
            match self.current() {
                None => {
                    return Err(InterpError::new(
                        ErrorKind::EofWhileParsing,
                        self.stage,
                        start,
                        "Reached EOF while parsing",
                    ));
                }
                Some(ch) if pred(ch) => return Ok(self),
                Some(_) => {}
            }
        }
    }

    pub fn advance_until_char(
        &mut self,
        target: char,
    ) -> Result<&mut Self, InterpError> {
        self.advance_until(|ch| ch == target)
    }

    /// Byte offset of the cursor.
    pub fn stamp(&self) -> usize {
        self.position
    }

    /// Byte offset just past the character under the cursor.
    pub fn stamp_next(&self) -> usize {
        self.position + self.current().map_or(0, char::len_utf8)
    }

    /// Source text between two stamps.
    pub fn slice(&self, from: usize, to: usize) -> &'a str {
        &self.text[from..to]
    }

    /// Drop the half-open span `from..to` from the retained output.
    pub fn cut_out(&mut self, from: usize, to: usize) -> &mut Self {
        if from < to {
            self.excised.push(from..to);
        }
        self
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn at_eof(&self) -> bool {
        self.position >= self.text.len()
    }

    /// The source text with every cut span removed.
    pub fn into_retained(mut self) -> String {
        self.excised.sort_by_key(|span| span.start);

        let mut retained = String::with_capacity(self.text.len());
        let mut cursor = 0;
        for span in &self.excised {
            if span.start > cursor {
                retained.push_str(&self.text[cursor..span.start]);
            }
            cursor = cursor.max(span.end);
        }
        retained.push_str(&self.text[cursor..]);
        retained
    }
}
