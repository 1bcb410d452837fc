//! Crate-level error taxonomy.
//!
//! Every public operation returns [`EngineError`] (or one of the narrower
//! enums it wraps). Each variant carries the offending value so callers can
//! report what was rejected without inspecting table state.

use crate::cards::CardParseError;
use crate::evaluator::EvalError;
use crate::table::{ActionError, PhaseTag};

/// Malformed input that never reached the state machine.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error(transparent)]
    Card(#[from] CardParseError),
    #[error("player count out of range: got {got}, allowed {min}..={max}")]
    PlayerCount { got: usize, min: usize, max: usize },
    #[error("seat index {seat} out of range for a {seats}-seat table")]
    SeatIndex { seat: usize, seats: usize },
    #[error("seat {0} is empty")]
    EmptySeat(usize),
    #[error("invalid blinds: small {small}, big {big}")]
    Blinds { small: u64, big: u64 },
    #[error("stack list has {got} entries, table has {seats} seats")]
    StackCount { got: usize, seats: usize },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("invalid snapshot: {0}")]
    Snapshot(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("illegal action: {0}")]
    IllegalAction(#[from] ActionError),
    #[error("deck underflow: requested {requested}, remaining {remaining}")]
    DeckUnderflow { requested: usize, remaining: usize },
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] EvalError),
    #[error("state mismatch: expected {expected}, actual {actual}")]
    StateMismatch { expected: PhaseTag, actual: PhaseTag },
    #[error("hand did not complete within {steps} steps")]
    Stalled { steps: usize },
}

impl From<CardParseError> for EngineError {
    fn from(err: CardParseError) -> Self {
        EngineError::Validation(ValidationError::Card(err))
    }
}
