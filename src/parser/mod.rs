//! SPL source parser
//!
//! This module turns program text into a [`Program`](ast::Program):
//! - [`preprocess`]: comment removal
//! - [`tokenizer`]: splitting text into token prototypes
//! - [`lexer`]: giving each prototype a typed value
//! - [`pizza`]: the mini-parser for `{ ... }` pizza literals
//! - [`grammar`]: statement signatures and their builders
//! - [`parse`]: matching statements against a grammar
//! - [`ast`]: statement definitions
//!
//! Shared pieces live in [`scanner`] (the character cursor every stage uses)
//! and [`errors`] (the error type every stage reports).
//!
//! # Grammar
//!
//! Statements are flat keyword sequences ending in `;`. There is no nesting,
//! so a statement is recognised by matching its tokens against an ordered
//! list of signatures; the first match builds the statement.

pub mod ast;
pub mod errors;
pub mod grammar;
pub mod lexer;
pub mod parse;
pub mod pizza;
pub mod preprocess;
pub mod scanner;
pub mod tokenizer;

pub use errors::InterpError;
pub use grammar::{Grammar, GrammarVersion};
pub use parse::interpret;
