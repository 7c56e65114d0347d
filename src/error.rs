//! Error types for round operations.

use thiserror::Error;

/// Errors that can occur when starting a round.
///
/// A failed start leaves the engine untouched: no cards are dealt and the
/// balance is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Bet amount is zero or negative.
    #[error("bet amount must be positive")]
    NonPositiveBet,
    /// Bet exceeds the available balance.
    #[error("bet exceeds available balance")]
    InsufficientFunds,
    /// A round is already in progress.
    #[error("invalid state for starting a round")]
    InvalidState,
}

/// Errors that can occur while resolving a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// The engine is not in the right state for this step.
    #[error("invalid round state for this step")]
    InvalidState,
    /// No hand is awaiting a decision.
    #[error("no active hand")]
    NoActiveHand,
    /// The hand is not eligible for a double down.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// The hand is not a pair, or the balance cannot cover the split bet.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Starting the round failed.
    #[error(transparent)]
    Bet(#[from] BetError),
}
