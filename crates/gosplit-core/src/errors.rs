//! Cross-cutting error types for gosplit.
//!
//! Domain errors (`ParserError`, `ConfigError`, `SplitError`) live in their
//! own crates. `SplitError` wraps this one when the engine detects a logic
//! defect.

use thiserror::Error;

use crate::enums::FileState;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A file state transition was attempted that is not allowed.
    #[error("Invalid state transition: {from} to {to}")]
    InvalidTransition { from: FileState, to: FileState },

    /// An internal invariant does not hold. Indicates a bug, not bad input.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}
