//! Runtime error types
//!
//! [`RuntimeError`] covers everything that can go wrong while executing a
//! statement that parsed correctly. Runtime errors halt the program they
//! occur in; statements already executed keep their effects.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("A session is already active.")]
    SessionAlreadyActive,

    #[error("No session active.")]
    NoSession,

    /// The pizza specifier matched no order
    #[error("No such pizza has been ordered.")]
    NoSuchPizza,

    #[error("Number of selections must be non-negative.")]
    NegativeSelection,

    #[error("This topping arrangement is already on the pizza")]
    ArrangementAlreadyPresent,
}
