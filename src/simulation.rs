//! Bulk round simulation for house-edge estimation.

use log::warn;

use crate::decision::DecisionSource;
use crate::engine::RoundEngine;
use crate::options::GameOptions;
use crate::result::{HandOutcome, RoundResult};
use crate::strategy::BasicStrategy;

/// Accumulated statistics over a simulation session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionStats {
    /// Rounds played.
    pub rounds: u64,
    /// Hands won with a natural.
    pub blackjacks: u64,
    /// Hands won without a natural.
    pub wins: u64,
    /// Hands pushed.
    pub pushes: u64,
    /// Hands lost.
    pub losses: u64,
    /// Net profit across all rounds.
    pub total_profit: f64,
    /// Total amount wagered, doubles and splits included.
    pub total_wagered: f64,
    /// Sum of squared per-round nets, for the standard error.
    sum_net_sq: f64,
}

impl SessionStats {
    /// Folds one settled round into the tallies.
    pub fn record(&mut self, result: &RoundResult) {
        self.rounds += 1;
        for hand in &result.hands {
            match hand.outcome {
                HandOutcome::Blackjack => self.blackjacks += 1,
                HandOutcome::Win => self.wins += 1,
                HandOutcome::Push => self.pushes += 1,
                HandOutcome::Loss => self.losses += 1,
            }
        }
        let net = result.net();
        self.total_profit += net;
        self.total_wagered += result.wagered();
        self.sum_net_sq += net * net;
    }

    /// House edge as a percentage of the amount wagered: the player's
    /// expected loss per unit bet.
    #[must_use]
    pub fn house_edge(&self) -> f64 {
        if self.total_wagered == 0.0 {
            0.0
        } else {
            -self.total_profit / self.total_wagered * 100.0
        }
    }

    /// Standard error of the mean per-round net.
    #[must_use]
    pub fn std_error(&self) -> f64 {
        if self.rounds <= 1 {
            return 0.0;
        }
        let n = self.rounds as f64;
        let mean = self.total_profit / n;
        let variance = (self.sum_net_sq / n - mean * mean).max(0.0);
        (variance / n).sqrt()
    }
}

/// Runs many rounds of fixed-strategy play against the engine and tallies
/// the outcomes.
///
/// The bankroll is topped back up whenever it cannot cover the next bet, so
/// arbitrarily long sessions never stall; edge estimation cares about the
/// per-round net, not the bankroll trajectory.
#[derive(Debug)]
pub struct Simulation {
    /// The driven engine.
    engine: RoundEngine,
    /// Bet placed every round.
    bet_size: f64,
    /// Bankroll restored whenever the balance cannot cover a bet.
    bankroll: f64,
    /// Session tallies.
    stats: SessionStats,
}

impl Simulation {
    /// Creates a simulation playing fixed basic strategy.
    #[must_use]
    pub fn new(options: GameOptions, bankroll: f64, bet_size: f64, seed: u64) -> Self {
        Self::with_policy(options, bankroll, bet_size, seed, Box::new(BasicStrategy::new()))
    }

    /// Creates a simulation with an arbitrary automated policy.
    #[must_use]
    pub fn with_policy(
        options: GameOptions,
        bankroll: f64,
        bet_size: f64,
        seed: u64,
        policy: Box<dyn DecisionSource>,
    ) -> Self {
        Self {
            engine: RoundEngine::new(options, bankroll, policy, seed),
            bet_size,
            bankroll,
            stats: SessionStats::default(),
        }
    }

    /// Runs the given number of rounds.
    pub fn run(&mut self, rounds: u64) -> &SessionStats {
        self.run_with_progress(rounds, |_, _| {})
    }

    /// Runs the given number of rounds, invoking `progress` after each with
    /// the count played so far.
    ///
    /// A round that fails to start is logged and skipped rather than
    /// aborting the run.
    pub fn run_with_progress(
        &mut self,
        rounds: u64,
        mut progress: impl FnMut(u64, &SessionStats),
    ) -> &SessionStats {
        for played in 1..=rounds {
            if self.engine.balance() < self.bet_size {
                self.engine.set_balance(self.bankroll);
            }

            match self.engine.play_round(self.bet_size) {
                Ok(result) => self.stats.record(&result),
                Err(err) => {
                    warn!("round skipped: {err}");
                    continue;
                }
            }

            progress(played, &self.stats);
        }
        &self.stats
    }

    /// Returns the tallies so far.
    #[must_use]
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }
}
