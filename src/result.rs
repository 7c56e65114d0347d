//! Round result types for settlement.

use crate::card::Card;

/// Outcome of a single player hand after settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandOutcome {
    /// Player held a natural and the dealer did not; paid 3:2.
    Blackjack,
    /// Player wins (dealer busts or player has the higher total).
    Win,
    /// Push (tie); stake returned.
    Push,
    /// Player loses (bust, or the dealer has the higher total).
    Loss,
}

/// Settlement of a single player hand.
#[derive(Debug, Clone, PartialEq)]
pub struct HandResult {
    /// The hand index (more than one hand after splits).
    pub hand_index: usize,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// The hand's final cards.
    pub cards: Vec<Card>,
    /// The hand's final value.
    pub player_value: u8,
    /// The bet escrowed for this hand, including any double.
    pub bet: f64,
    /// The amount returned to the balance, stake included.
    pub payout: f64,
    /// Net win: payout minus bet.
    pub net: f64,
}

/// Settlement of an entire round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    /// Results for each player hand, in play order.
    pub hands: Vec<HandResult>,
    /// The dealer's final cards.
    pub dealer_cards: Vec<Card>,
    /// The dealer's final hand value.
    pub dealer_value: u8,
    /// Whether the dealer held a natural.
    pub dealer_blackjack: bool,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// The player's balance after settlement.
    pub balance: f64,
}

impl RoundResult {
    /// Total net win across all hands of the round.
    #[must_use]
    pub fn net(&self) -> f64 {
        self.hands.iter().map(|h| h.net).sum()
    }

    /// Total amount wagered across all hands, doubles and splits included.
    #[must_use]
    pub fn wagered(&self) -> f64 {
        self.hands.iter().map(|h| h.bet).sum()
    }
}
