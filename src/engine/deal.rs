use log::debug;

use crate::error::{BetError, RoundError};
use crate::hand::Hand;
use crate::result::{HandOutcome, RoundResult};

use super::{RoundEngine, RoundState};

impl RoundEngine {
    /// Starts a round: escrows the bet and deals the initial cards,
    /// alternating player, dealer, player, dealer. The dealer's first card
    /// is the visible up card.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving balance and state untouched, if a round is
    /// already in flight, the bet is not positive, or the bet exceeds the
    /// balance.
    pub fn start_round(&mut self, bet: f64) -> Result<(), BetError> {
        if self.state != RoundState::Betting {
            return Err(BetError::InvalidState);
        }
        if bet <= 0.0 {
            return Err(BetError::NonPositiveBet);
        }
        if bet > self.player.balance() {
            return Err(BetError::InsufficientFunds);
        }

        self.player.withdraw(bet);
        self.player.clear_hands();
        self.dealer.clear();

        let mut hand = Hand::new(bet);
        let first = self.draw();
        hand.add_card(first);
        let up = self.draw();
        self.dealer.hand_mut().add_card(up);
        let second = self.draw();
        hand.add_card(second);
        let hole = self.draw();
        self.dealer.hand_mut().add_card(hole);

        self.player.hands_mut().push(hand);
        self.state = RoundState::Dealt;

        debug!("round started: bet {bet}, dealer shows {up}");
        Ok(())
    }

    /// Checks both sides for a natural right after the deal.
    ///
    /// Both naturals push (stake returned); a player-only natural pays 3:2;
    /// a dealer-only natural forfeits the stake. Any natural settles the
    /// round with no further cards and the settlement is returned.
    /// Otherwise play continues and `None` is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if called in any state other than freshly dealt.
    pub fn check_naturals(&mut self) -> Result<Option<RoundResult>, RoundError> {
        if self.state != RoundState::Dealt {
            return Err(RoundError::InvalidState);
        }

        let player_natural = self
            .player
            .hands()
            .first()
            .is_some_and(Hand::is_blackjack);
        let dealer_natural = self.dealer.hand().is_blackjack();

        if !player_natural && !dealer_natural {
            self.state = RoundState::PlayerTurn;
            return Ok(None);
        }

        self.dealer.hand_mut().reveal_hole();

        let bet = self.hand(0).bet();
        let (outcome, payout) = if player_natural && dealer_natural {
            (HandOutcome::Push, bet)
        } else if player_natural {
            (HandOutcome::Blackjack, bet * (1.0 + self.options.blackjack_pays))
        } else {
            (HandOutcome::Loss, 0.0)
        };

        debug!("natural settlement: {outcome:?}, payout {payout}");
        let settled = self.settle_hand(0, outcome, payout);
        let result = self.round_result(vec![settled]);
        self.clear_round();
        Ok(Some(result))
    }
}
