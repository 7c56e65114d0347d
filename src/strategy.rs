//! Fixed basic-strategy decision tables.
//!
//! Three disjoint tables are consulted in priority order: pairs (only for a
//! two-card pair), then soft totals (an ace counted as 11), then hard
//! totals. Rows are indexed by the hand descriptor and columns by the
//! dealer's up-card point value; ten-value up cards share one column.
//!
//! The tables are the stand-on-all-17s chart. Descriptors outside the
//! tabulated ranges fall back to fixed defaults: hard totals below 8 hit,
//! anything else missing from the hard or soft tables stands, and anything
//! missing from the pair table hits.

use crate::card::Card;
use crate::decision::DecisionSource;
use crate::hand::Hand;

/// A player decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Draw one card.
    Hit,
    /// End the hand's turn.
    Stand,
    /// Double the bet, draw exactly one card, end the hand's turn.
    Double,
    /// Split a pair into two hands.
    Split,
}

use Action::{Double as D, Hit as H, Split as P, Stand as S};

/// Number of up-card columns: point values 2 through 11 (ace).
const UP_COLUMNS: usize = 10;

/// Lowest tabulated hard total.
const HARD_MIN: u8 = 8;

/// Lowest tabulated soft total (ace plus two).
const SOFT_MIN: u8 = 13;

/// Lowest tabulated pair card value.
const PAIR_MIN: u8 = 2;

/// Hard totals 8..=21 against dealer 2..=11.
const HARD: [[Action; UP_COLUMNS]; 14] = [
    [H, H, H, H, H, H, H, H, H, H], // 8
    [H, D, D, D, D, H, H, H, H, H], // 9
    [D, D, D, D, D, D, D, D, H, H], // 10
    [D, D, D, D, D, D, D, D, D, D], // 11
    [H, H, S, S, S, H, H, H, H, H], // 12
    [S, S, S, S, S, H, H, H, H, H], // 13
    [S, S, S, S, S, H, H, H, H, H], // 14
    [S, S, S, S, S, H, H, H, H, H], // 15
    [S, S, S, S, S, H, H, H, H, H], // 16
    [S, S, S, S, S, S, S, S, S, S], // 17
    [S, S, S, S, S, S, S, S, S, S], // 18
    [S, S, S, S, S, S, S, S, S, S], // 19
    [S, S, S, S, S, S, S, S, S, S], // 20
    [S, S, S, S, S, S, S, S, S, S], // 21
];

/// Soft totals 13..=21 against dealer 2..=11.
const SOFT: [[Action; UP_COLUMNS]; 9] = [
    [H, H, H, D, D, H, H, H, H, H], // soft 13
    [H, H, H, D, D, H, H, H, H, H], // soft 14
    [H, H, D, D, D, H, H, H, H, H], // soft 15
    [H, H, D, D, D, H, H, H, H, H], // soft 16
    [H, D, D, D, D, H, H, H, H, H], // soft 17
    [S, D, D, D, D, S, S, H, H, H], // soft 18
    [S, S, S, S, D, S, S, S, S, S], // soft 19
    [S, S, S, S, S, S, S, S, S, S], // soft 20
    [S, S, S, S, S, S, S, S, S, S], // soft 21
];

/// Pair card values 2..=11 against dealer 2..=11.
const PAIRS: [[Action; UP_COLUMNS]; 10] = [
    [P, P, P, P, P, P, H, H, H, H], // 2,2
    [P, P, P, P, P, P, H, H, H, H], // 3,3
    [H, H, H, P, P, H, H, H, H, H], // 4,4
    [D, D, D, D, D, D, D, D, D, D], // 5,5 played as a double-down ten
    [P, P, P, P, P, H, H, H, H, H], // 6,6
    [P, P, P, P, P, P, H, H, H, H], // 7,7
    [P, P, P, P, P, P, P, P, P, P], // 8,8
    [P, P, P, P, P, S, P, P, S, S], // 9,9
    [S, S, S, S, S, S, S, S, S, S], // 10,10
    [P, P, P, P, P, P, P, P, P, P], // A,A
];

/// Maps an up-card point value (2..=11) to its table column.
const fn up_column(value: u8) -> usize {
    (value - 2) as usize
}

/// Looks up the hard-total action. Totals below the table hit; totals
/// outside it stand.
///
/// `upcard_value` is a card point value as produced by [`Card::value`]
/// (2..=11); the same holds for the other lookups.
#[must_use]
pub fn hard_action(total: u8, upcard_value: u8) -> Action {
    if total < HARD_MIN {
        return Action::Hit;
    }
    HARD.get((total - HARD_MIN) as usize)
        .map_or(Action::Stand, |row| row[up_column(upcard_value)])
}

/// Looks up the soft-total action. Totals outside the table stand.
#[must_use]
pub fn soft_action(total: u8, upcard_value: u8) -> Action {
    total
        .checked_sub(SOFT_MIN)
        .and_then(|i| SOFT.get(i as usize))
        .map_or(Action::Stand, |row| row[up_column(upcard_value)])
}

/// Looks up the pair action by the paired card's point value. Values outside
/// the table hit.
#[must_use]
pub fn pair_action(card_value: u8, upcard_value: u8) -> Action {
    card_value
        .checked_sub(PAIR_MIN)
        .and_then(|i| PAIRS.get(i as usize))
        .map_or(Action::Hit, |row| row[up_column(upcard_value)])
}

/// The fixed basic-strategy policy.
///
/// A pure function of the hand shape and the dealer's up card; it holds no
/// state and always produces a decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BasicStrategy;

impl BasicStrategy {
    /// Creates the policy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the charted action for a hand against the dealer's up card.
    #[must_use]
    pub fn action(hand: &Hand, dealer_upcard: Card) -> Action {
        let up = dealer_upcard.value();

        if hand.is_pair() {
            pair_action(hand.cards()[0].value(), up)
        } else if hand.is_soft() {
            soft_action(hand.value(), up)
        } else {
            hard_action(hand.value(), up)
        }
    }
}

impl DecisionSource for BasicStrategy {
    fn decide(&mut self, hand: &Hand, dealer_upcard: Card) -> Option<Action> {
        Some(Self::action(hand, dealer_upcard))
    }
}
