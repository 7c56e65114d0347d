//! Player and dealer participants.

use core::fmt;

use crate::card::Card;
use crate::decision::DecisionSource;
use crate::hand::{DealerHand, Hand};
use crate::strategy::Action;

/// The player: a bankroll, the active hands of the current round, and the
/// bound decision policy.
///
/// The balance is the only state that persists across rounds. Hands and
/// their bets are created and resolved by the round engine.
pub struct Player {
    /// Current balance.
    balance: f64,
    /// Active hands, more than one once splitting occurs.
    hands: Vec<Hand>,
    /// Bound decision policy.
    policy: Box<dyn DecisionSource>,
}

impl Player {
    /// Creates a player with an initial balance and a decision policy.
    #[must_use]
    pub fn new(balance: f64, policy: Box<dyn DecisionSource>) -> Self {
        Self {
            balance,
            hands: Vec::new(),
            policy,
        }
    }

    /// Returns the current balance.
    #[must_use]
    pub const fn balance(&self) -> f64 {
        self.balance
    }

    /// Sets the balance directly (bankroll top-ups between rounds).
    pub const fn set_balance(&mut self, balance: f64) {
        self.balance = balance;
    }

    /// Escrows an amount out of the balance. The caller checks funds first.
    pub(crate) const fn withdraw(&mut self, amount: f64) {
        self.balance -= amount;
    }

    /// Returns winnings (or a pushed stake) to the balance.
    pub(crate) const fn deposit(&mut self, amount: f64) {
        self.balance += amount;
    }

    /// Returns the player's hands.
    #[must_use]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Returns mutable access to the hands for the round engine.
    pub(crate) const fn hands_mut(&mut self) -> &mut Vec<Hand> {
        &mut self.hands
    }

    /// Asks the bound policy for a decision on the given hand.
    ///
    /// `None` means the source produced no usable decision; the caller
    /// re-requests.
    pub(crate) fn decide(&mut self, hand_index: usize, dealer_upcard: Card) -> Option<Action> {
        self.policy.decide(&self.hands[hand_index], dealer_upcard)
    }

    /// Clears all hands at round end.
    pub(crate) fn clear_hands(&mut self) {
        self.hands.clear();
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("balance", &self.balance)
            .field("hands", &self.hands)
            .finish_non_exhaustive()
    }
}

/// The dealer: a single hand and the fixed drawing rule.
///
/// The dealer never owns money; it is a counterparty only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dealer {
    /// The dealer's hand.
    hand: DealerHand,
}

impl Dealer {
    /// Creates a dealer with an empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hand: DealerHand::new(),
        }
    }

    /// Returns the dealer's hand.
    #[must_use]
    pub const fn hand(&self) -> &DealerHand {
        &self.hand
    }

    /// Returns mutable access to the hand for the round engine.
    pub(crate) const fn hand_mut(&mut self) -> &mut DealerHand {
        &mut self.hand
    }

    /// Fixed drawing rule, re-evaluated after every dealt card.
    #[must_use]
    pub fn should_hit(&self, hit_soft_17: bool) -> bool {
        self.hand.should_hit(hit_soft_17)
    }

    /// Clears the dealer's hand at round end.
    pub(crate) fn clear(&mut self) {
        self.hand.clear();
    }
}
