use thiserror::Error;

use crate::engine::Phase;

/// Operations that are invalid for the logical state of a model value.
///
/// These are recoverable: callers may probe `Bid::is_pass` or `Trick::is_empty`
/// first, or handle the error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("a passing bid has no {0}")]
    PassingBid(&'static str),
    #[error("a trick cannot be played under a passing contract")]
    PassContract,
    #[error("the trick is empty")]
    EmptyTrick,
    #[error("bid index {0} is outside 0..=24")]
    BidIndex(u8),
    #[error("a contract must name between 6 and 10 tricks, not {0}")]
    TrickCount(u8),
    #[error("cannot parse card {0:?}")]
    ParseCard(String),
    #[error("cannot parse bid {0:?}")]
    ParseBid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cannot {action} while the game is in phase {phase:?}")]
    OutOfPhase { action: &'static str, phase: Phase },
    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be a probability between 0 and 1, got {value}")]
    Probability { name: &'static str, value: f64 },
    #[error("unknown AI level {0:?}, expected random, basic or advanced")]
    UnknownLevel(String),
}
