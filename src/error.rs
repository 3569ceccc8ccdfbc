//! Error types

use thiserror::Error;

/// Anything that can stop a game
#[derive(Error, Debug)]
pub enum PigError {
    #[error("A game needs at least one player")]
    NoPlayers,
    #[error("The saved game is unreadable: {0}")]
    Record(#[from] RecordError),
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error("Could not install the interrupt handler")]
    Shutdown(#[from] ctrlc::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A malformed record file
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` has unparsable value `{value}`")]
    InvalidField { field: &'static str, value: String },
    #[error("field `{field}` is out of range: {value}")]
    OutOfRange { field: &'static str, value: u64 },
    #[error("unexpected data after the last field: `{0}`")]
    TrailingData(String),
}

/// A transition applied in a phase that does not allow it
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RuleError {
    #[error("cannot hold before rolling")]
    NothingToHold,
    #[error("the turn is still in progress")]
    TurnNotOver,
    #[error("score does not fit in 32 bits")]
    ScoreOverflow,
}
