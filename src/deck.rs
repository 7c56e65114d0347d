//! Infinite-deck draw source.

use log::debug;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, Rank};

/// An infinite deck: every draw is an independent, uniformly-random rank.
///
/// Cards are effectively replaced after being dealt, so no depletion or
/// shuffle state exists. A predetermined sequence of draws can be queued with
/// [`Deck::stack`], which tests and scripted demos use to rig deals.
#[derive(Debug, Clone)]
pub struct Deck {
    /// Random number generator.
    rng: ChaCha8Rng,
    /// Queued cards served before any random draw, in push order.
    stacked: Vec<Card>,
}

impl Deck {
    /// Creates a new deck seeded for reproducible draws.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            stacked: Vec::new(),
        }
    }

    /// Deals one card.
    ///
    /// Serves the rig queue first, then draws a rank uniformly at random,
    /// independent of all previous draws.
    pub fn deal_card(&mut self) -> Card {
        let card = self.stacked.pop().unwrap_or_else(|| {
            let rank = Rank::ALL[self.rng.random_range(0..Rank::ALL.len())];
            Card::new(rank)
        });
        debug!("dealt card: {card}");
        card
    }

    /// Queues cards to be dealt, in the given order, before any random draw.
    pub fn stack(&mut self, draws: &[Card]) {
        self.stacked.extend(draws.iter().rev().copied());
    }

    /// Returns the number of rigged draws still queued.
    #[must_use]
    pub fn stacked_len(&self) -> usize {
        self.stacked.len()
    }
}
