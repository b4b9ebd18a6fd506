//! Errors raised by the rules engine and the search.
//!
//! Both kinds signal a broken calling contract rather than a recoverable
//! runtime condition.

use thiserror::Error;

use crate::action::Action;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RulesError {
    /// The action failed legality checking for the given state.
    #[error("illegal action in current state: {action}")]
    InvalidAction { action: Action },
    /// The operation was called on a state it does not accept, typically a
    /// finished game.
    #[error("precondition violated: {0}")]
    PreconditionViolation(&'static str),
}
