//! # Introduction
//!
//! SPL (Structured Pizza Language) is a small statement language for running
//! a pizza-order vote: start a session, order pizzas, alter and vote on them,
//! then list the winners.
//!
//! ```text
//! START SESSION;
//! ADD PIZZA [{LEFT:HAM}, {PESTO}, {THINCRUST}] AS "Lunch";
//! VOTE FOR PIZZA "Lunch" (3);
//! SELECT TOP 1 PIZZA;
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! Source → Preprocess → Tokenize → Lex → Parse → Program → Execute
//! ```
//!
//! 1. [`parser`]: strips comments, splits the text into tokens, types them and
//!    matches each statement against a [`parser::Grammar`]. Any error here
//!    means nothing runs.
//! 2. [`pizza`]: the pizza model that pizza literals evaluate to.
//! 3. [`session`]: the order session and the state statements execute against.
//! 4. [`interpreter`]: executes a program, halting on the first runtime error.
//! 5. [`printer`]: builds report text and captures it on a console.

pub mod interpreter;
pub mod parser;
pub mod pizza;
pub mod printer;
pub mod session;
