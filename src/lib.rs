//! A blackjack round engine with basic-strategy play and house-edge
//! simulation.
//!
//! The crate provides a [`RoundEngine`] that resolves one round at a time
//! (betting, dealing, the player decision loop with hand splitting, dealer
//! play, and settlement) for any [`DecisionSource`]: the fixed
//! [`BasicStrategy`] tables, a terminal prompt, or an external feed behind a
//! [`ChannelSource`]. Draws come from an infinite [`Deck`]: independent,
//! uniformly-random ranks with replacement. [`Simulation`] drives the engine
//! over many rounds to estimate the house edge.
//!
//! # Example
//!
//! ```
//! use bjsim::{BasicStrategy, GameOptions, RoundEngine};
//!
//! let mut engine = RoundEngine::new(
//!     GameOptions::default(),
//!     1000.0,
//!     Box::new(BasicStrategy::new()),
//!     42,
//! );
//! let result = engine.play_round(100.0).unwrap();
//! assert_eq!(result.balance, engine.balance());
//! ```

pub mod card;
pub mod config;
pub mod deck;
pub mod decision;
pub mod engine;
pub mod error;
pub mod hand;
pub mod options;
pub mod player;
pub mod result;
pub mod simulation;
pub mod strategy;

// Re-export main types
pub use card::{Card, Rank};
pub use config::Settings;
pub use deck::Deck;
pub use decision::{ChannelSource, DecisionSource};
pub use engine::{RoundEngine, RoundState};
pub use error::{BetError, RoundError};
pub use hand::{DealerHand, Hand, HandStatus};
pub use options::GameOptions;
pub use player::{Dealer, Player};
pub use result::{HandOutcome, HandResult, RoundResult};
pub use simulation::{SessionStats, Simulation};
pub use strategy::{Action, BasicStrategy};
