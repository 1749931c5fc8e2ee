//! Statement execution
//!
//! This module runs parsed programs against a [`ProgramState`]:
//! - [`engine`]: runs a program statement by statement, reporting halts
//! - [`statements`]: what each statement does
//! - [`errors`]: runtime error types
//!
//! # Execution Model
//!
//! Statements run in source order with a 1-based program counter. The first
//! runtime error halts the program; effects of earlier statements remain.
//!
//! [`ProgramState`]: crate::session::ProgramState

pub mod engine;
pub mod errors;
pub mod statements;
