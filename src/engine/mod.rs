//! Round engine and state management.

use crate::card::Card;
use crate::deck::Deck;
use crate::decision::DecisionSource;
use crate::hand::{Hand, HandStatus};
use crate::options::GameOptions;
use crate::player::{Dealer, Player};
use crate::result::{HandOutcome, HandResult, RoundResult};

mod actions;
mod deal;
mod turns;

/// Round state.
///
/// A round moves `Betting → Dealt → PlayerTurn → DealerTurn → Settled` and
/// back to `Betting` once results are taken. A natural on either side
/// settles straight out of `Dealt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// Waiting for a bet to start the next round.
    Betting,
    /// Initial cards dealt; naturals not yet checked.
    Dealt,
    /// Waiting for player decisions.
    PlayerTurn,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Dealer done; results can be settled.
    Settled,
}

/// A blackjack round engine for one player against the dealer.
///
/// The engine owns the deck, the player (bankroll, hands, and bound decision
/// policy), and the dealer, and is the sole writer of hands, bets, and
/// balance while a round is in flight. It is single-threaded: one round
/// completes before the next begins.
///
/// [`RoundEngine::play_round`] resolves a whole round in one call when the
/// bound policy is fully automated. Callers that interleave display or human
/// input drive the finer-grained steps instead: [`RoundEngine::start_round`],
/// [`RoundEngine::check_naturals`], the per-hand actions
/// ([`RoundEngine::hit`], [`RoundEngine::stand`],
/// [`RoundEngine::double_down`], [`RoundEngine::split`]),
/// [`RoundEngine::dealer_turn`], and [`RoundEngine::settle`].
#[derive(Debug)]
pub struct RoundEngine {
    /// Draw source.
    deck: Deck,
    /// The player.
    player: Player,
    /// The dealer.
    dealer: Dealer,
    /// Rule options.
    options: GameOptions,
    /// Current round state.
    state: RoundState,
}

impl RoundEngine {
    /// Creates an engine with the given rules, starting balance, decision
    /// policy, and deck seed.
    #[must_use]
    pub fn new(
        options: GameOptions,
        balance: f64,
        policy: Box<dyn DecisionSource>,
        seed: u64,
    ) -> Self {
        Self {
            deck: Deck::new(seed),
            player: Player::new(balance, policy),
            dealer: Dealer::new(),
            options,
            state: RoundState::Betting,
        }
    }

    /// Returns the current round state.
    #[must_use]
    pub const fn state(&self) -> RoundState {
        self.state
    }

    /// Returns the rule options.
    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Returns the dealer.
    #[must_use]
    pub const fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    /// Returns the player's current balance.
    #[must_use]
    pub const fn balance(&self) -> f64 {
        self.player.balance()
    }

    /// Sets the player's balance between rounds (bankroll top-ups in long
    /// simulation runs). Ignored while a round is in flight.
    pub const fn set_balance(&mut self, balance: f64) {
        if matches!(self.state, RoundState::Betting) {
            self.player.set_balance(balance);
        }
    }

    /// Returns mutable access to the deck, the rig seam for scripted deals.
    pub const fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    /// Returns the dealer's visible up card, if cards have been dealt.
    #[must_use]
    pub fn upcard(&self) -> Option<Card> {
        self.dealer.hand().up_card()
    }

    /// Returns the index of the hand currently awaiting a decision.
    ///
    /// Hands are played in order; after a split the sibling hand sits right
    /// after the hand that spawned it, so the first active hand is always
    /// the one in play.
    #[must_use]
    pub fn current_hand(&self) -> Option<usize> {
        if self.state != RoundState::PlayerTurn {
            return None;
        }
        self.player
            .hands()
            .iter()
            .position(|hand| hand.status() == HandStatus::Active)
    }

    /// Draws one card from the deck.
    pub(crate) fn draw(&mut self) -> Card {
        self.deck.deal_card()
    }

    /// Moves to the dealer's turn once no hand is left awaiting a decision.
    pub(crate) fn finish_player_turn_if_done(&mut self) {
        let any_active = self
            .player
            .hands()
            .iter()
            .any(|hand| hand.status() == HandStatus::Active);
        if !any_active {
            self.state = RoundState::DealerTurn;
        }
    }

    /// Builds the settlement record for one hand and credits its payout.
    pub(crate) fn settle_hand(
        &mut self,
        hand_index: usize,
        outcome: HandOutcome,
        payout: f64,
    ) -> HandResult {
        self.player.deposit(payout);
        let hand = &self.player.hands()[hand_index];
        HandResult {
            hand_index,
            outcome,
            cards: hand.cards().to_vec(),
            player_value: hand.value(),
            bet: hand.bet(),
            payout,
            net: payout - hand.bet(),
        }
    }

    /// Clears the table after settlement and opens betting for the next
    /// round.
    pub(crate) fn clear_round(&mut self) {
        self.player.clear_hands();
        self.dealer.clear();
        self.state = RoundState::Betting;
    }

    /// Assembles the round result after all hands have been settled.
    pub(crate) fn round_result(&self, hands: Vec<HandResult>) -> RoundResult {
        let dealer = self.dealer.hand();
        RoundResult {
            hands,
            dealer_cards: dealer.cards().to_vec(),
            dealer_value: dealer.value(),
            dealer_blackjack: dealer.is_blackjack(),
            dealer_bust: dealer.is_bust(),
            balance: self.player.balance(),
        }
    }

    /// Reference to a player hand by index.
    pub(crate) fn hand(&self, index: usize) -> &Hand {
        &self.player.hands()[index]
    }
}
