use log::{debug, warn};

use crate::card::Card;
use crate::error::RoundError;
use crate::hand::HandStatus;
use crate::result::{HandOutcome, RoundResult};
use crate::strategy::Action;

use super::{RoundEngine, RoundState};

impl RoundEngine {
    /// Downgrades an action the current hand is not eligible for.
    ///
    /// Doubling is only legal as the first decision on a hand (and, under a
    /// no-double-after-split rule, never on split hands); splitting needs a
    /// two-card pair and a balance covering the second bet. An ineligible
    /// double or split becomes a plain hit. Insufficient funds are ordinary
    /// outcomes here, not errors.
    fn degrade(&self, hand_index: usize, action: Action) -> Action {
        let hand = self.hand(hand_index);
        let degraded = match action {
            Action::Double
                if hand.len() != 2
                    || (hand.is_from_split() && !self.options.double_after_split) =>
            {
                Action::Hit
            }
            Action::Split if !hand.is_pair() || hand.bet() > self.player.balance() => Action::Hit,
            other => other,
        };
        if degraded != action {
            debug!("downgraded {action:?} to {degraded:?} on hand {hand_index}");
        }
        degraded
    }

    /// Plays every player hand to completion by querying the bound decision
    /// policy.
    ///
    /// Hands form an explicit worklist: the first active hand is played
    /// until it stands, busts, or doubles, and a split inserts its sibling
    /// right after the current hand, so each split hand finishes before the
    /// next begins. A source that yields no decision is simply asked again.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in the player-turn state.
    pub fn player_turn(&mut self) -> Result<(), RoundError> {
        if self.state != RoundState::PlayerTurn {
            return Err(RoundError::InvalidState);
        }

        while let Some(index) = self.current_hand() {
            let upcard = self.upcard().ok_or(RoundError::InvalidState)?;

            let Some(requested) = self.player.decide(index, upcard) else {
                warn!("no decision for hand {index}, asking again");
                continue;
            };

            match self.degrade(index, requested) {
                Action::Hit => {
                    self.hit()?;
                }
                Action::Stand => self.stand()?,
                Action::Double => {
                    self.double_down()?;
                }
                Action::Split => self.split()?,
            }
        }

        Ok(())
    }

    /// Plays out the dealer's hand by the fixed rule and returns the drawn
    /// cards.
    ///
    /// The hole card is revealed first. If every player hand busted the
    /// dealer draws nothing; otherwise the dealer hits while
    /// [`DealerHand::should_hit`](crate::DealerHand::should_hit) holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in the dealer-turn state.
    pub fn dealer_turn(&mut self) -> Result<Vec<Card>, RoundError> {
        if self.state != RoundState::DealerTurn {
            return Err(RoundError::InvalidState);
        }

        self.dealer.hand_mut().reveal_hole();

        let mut drawn = Vec::new();
        if self.any_live_hand() {
            while self.dealer.should_hit(self.options.hit_soft_17) {
                let card = self.draw();
                self.dealer.hand_mut().add_card(card);
                drawn.push(card);
            }
        }

        debug!(
            "dealer finished at {} ({} drawn)",
            self.dealer.hand().value(),
            drawn.len()
        );
        self.state = RoundState::Settled;
        Ok(drawn)
    }

    /// Settles every hand against the dealer's final total and returns the
    /// round's results with the updated balance.
    ///
    /// Busted hands always lose, whatever the dealer did. A surviving hand
    /// wins double its stake when the dealer busts or its total is higher,
    /// pushes its stake back on a tie, and forfeits the stake otherwise.
    /// The table is then cleared and betting reopens.
    ///
    /// # Errors
    ///
    /// Returns an error if the dealer's turn has not finished.
    pub fn settle(&mut self) -> Result<RoundResult, RoundError> {
        if self.state != RoundState::Settled {
            return Err(RoundError::InvalidState);
        }

        let dealer_value = self.dealer.hand().value();
        let dealer_bust = self.dealer.hand().is_bust();

        let mut settled = Vec::with_capacity(self.player.hands().len());
        for index in 0..self.player.hands().len() {
            let hand = self.hand(index);
            let bet = hand.bet();
            let (outcome, payout) = if hand.status() == HandStatus::Bust {
                (HandOutcome::Loss, 0.0)
            } else if dealer_bust || hand.value() > dealer_value {
                (HandOutcome::Win, bet * 2.0)
            } else if hand.value() < dealer_value {
                (HandOutcome::Loss, 0.0)
            } else {
                (HandOutcome::Push, bet)
            };
            settled.push(self.settle_hand(index, outcome, payout));
        }

        let result = self.round_result(settled);
        debug!(
            "round settled: net {}, balance {}",
            result.net(),
            result.balance
        );
        self.clear_round();
        Ok(result)
    }

    /// Plays one complete round: deal, naturals short-circuit, player turn,
    /// dealer turn, settlement.
    ///
    /// Requires a fully automated decision policy; callers interleaving
    /// human input drive the finer-grained steps instead.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is already in flight or the bet cannot be
    /// escrowed; the engine is left untouched in that case.
    pub fn play_round(&mut self, bet: f64) -> Result<RoundResult, RoundError> {
        self.start_round(bet)?;
        if let Some(result) = self.check_naturals()? {
            return Ok(result);
        }
        self.player_turn()?;
        self.dealer_turn()?;
        self.settle()
    }

    /// Whether any hand survived to compare against the dealer.
    fn any_live_hand(&self) -> bool {
        self.player
            .hands()
            .iter()
            .any(|hand| matches!(hand.status(), HandStatus::Stand | HandStatus::Blackjack))
    }
}
