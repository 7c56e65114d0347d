//! The decision-source contract shared by every player-action producer.

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use log::warn;

use crate::card::Card;
use crate::hand::Hand;
use crate::strategy::Action;

/// A source of player decisions.
///
/// The round engine treats every source (fixed strategy table, terminal
/// prompt, external classifier feed) as one synchronous blocking call.
/// Returning `None` means "no decision" (an unparseable token, an
/// unavailable feed); the engine re-requests and never guesses.
pub trait DecisionSource {
    /// Decides the next action for `hand` against the dealer's up card.
    fn decide(&mut self, hand: &Hand, dealer_upcard: Card) -> Option<Action>;
}

/// A decision source fed by a channel from some external producer.
///
/// Wraps the producer behind a single blocking receive with an internal
/// timeout: when nothing arrives in time, or the producer hangs up, the
/// configured fallback action is used. Event-loop details stay on the
/// producer's side of the channel.
#[derive(Debug)]
pub struct ChannelSource {
    /// Receiving end of the producer's channel.
    receiver: Receiver<Action>,
    /// How long to wait for a decision before falling back.
    timeout: Duration,
    /// Action used when the producer yields nothing in time.
    fallback: Action,
}

impl ChannelSource {
    /// Creates a source reading from `receiver`, waiting at most `timeout`
    /// per decision before substituting `fallback`.
    #[must_use]
    pub const fn new(receiver: Receiver<Action>, timeout: Duration, fallback: Action) -> Self {
        Self {
            receiver,
            timeout,
            fallback,
        }
    }
}

impl DecisionSource for ChannelSource {
    fn decide(&mut self, _hand: &Hand, _dealer_upcard: Card) -> Option<Action> {
        match self.receiver.recv_timeout(self.timeout) {
            Ok(action) => Some(action),
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    "no decision within {:?}, falling back to {:?}",
                    self.timeout, self.fallback
                );
                Some(self.fallback)
            }
            Err(RecvTimeoutError::Disconnected) => {
                warn!(
                    "decision feed disconnected, falling back to {:?}",
                    self.fallback
                );
                Some(self.fallback)
            }
        }
    }
}
