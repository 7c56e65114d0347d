use log::debug;

use crate::card::Card;
use crate::error::RoundError;
use crate::hand::{Hand, HandStatus};

use super::{RoundEngine, RoundState};

impl RoundEngine {
    /// Returns the index of the hand in play, or the reason there is none.
    fn require_current(&self) -> Result<usize, RoundError> {
        if self.state != RoundState::PlayerTurn {
            return Err(RoundError::InvalidState);
        }
        self.current_hand().ok_or(RoundError::NoActiveHand)
    }

    /// Player action: hit the hand in play with one card.
    ///
    /// Going over 21 marks the hand bust and ends its turn.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn or no hand is awaiting
    /// a decision.
    pub fn hit(&mut self) -> Result<Card, RoundError> {
        let index = self.require_current()?;

        let card = self.draw();
        self.player.hands_mut()[index].add_card(card);

        self.finish_player_turn_if_done();
        Ok(card)
    }

    /// Player action: stand, ending the hand's turn.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn or no hand is awaiting
    /// a decision.
    pub fn stand(&mut self) -> Result<(), RoundError> {
        let index = self.require_current()?;

        self.player.hands_mut()[index].set_status(HandStatus::Stand);

        self.finish_player_turn_if_done();
        Ok(())
    }

    /// Player action: double down on the hand in play.
    ///
    /// Escrows an additional bet of `min(original bet, remaining balance)`,
    /// which may be nothing, in which case this is just a committed single
    /// hit. Draws exactly one card and ends the hand's turn regardless of
    /// the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn, no hand is awaiting
    /// a decision, the hand has taken a card already, or the hand came from
    /// a split under a no-double-after-split rule.
    pub fn double_down(&mut self) -> Result<Card, RoundError> {
        let index = self.require_current()?;

        let hand = self.hand(index);
        if hand.len() != 2 {
            return Err(RoundError::CannotDouble);
        }
        if hand.is_from_split() && !self.options.double_after_split {
            return Err(RoundError::CannotDouble);
        }

        let extra = hand.bet().min(self.player.balance());
        self.player.withdraw(extra);

        let card = self.draw();
        let hand = &mut self.player.hands_mut()[index];
        hand.raise_bet(extra);
        hand.add_card(card);
        if hand.status() == HandStatus::Active {
            hand.set_status(HandStatus::Stand);
        }

        debug!("double down: extra {extra}, drew {card}");
        self.finish_player_turn_if_done();
        Ok(card)
    }

    /// Player action: split the pair in play into two hands.
    ///
    /// The second card seeds a sibling hand inserted right after the current
    /// one, an equal bet is escrowed for it, and each hand receives one
    /// fresh card. Split aces are closed immediately: each ace hand keeps
    /// exactly two cards and is forced to stand. Other split hands play on
    /// normally and may split again if a new pair forms and the balance
    /// covers it.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn, no hand is awaiting
    /// a decision, the hand is not a two-card pair, or the balance cannot
    /// cover the second bet.
    #[expect(
        clippy::missing_panics_doc,
        reason = "take_split_card always succeeds on a verified pair"
    )]
    pub fn split(&mut self) -> Result<(), RoundError> {
        let index = self.require_current()?;

        let hand = self.hand(index);
        if !hand.is_pair() {
            return Err(RoundError::CannotSplit);
        }
        let bet = hand.bet();
        if bet > self.player.balance() {
            return Err(RoundError::CannotSplit);
        }
        let split_aces = hand.cards()[0].is_ace();

        self.player.withdraw(bet);

        let donated = self.player.hands_mut()[index]
            .take_split_card()
            .expect("is_pair was verified above");
        let mut sibling = Hand::from_split(donated, bet);

        let first_draw = self.draw();
        self.player.hands_mut()[index].add_card(first_draw);
        let second_draw = self.draw();
        sibling.add_card(second_draw);

        if split_aces {
            // One card each, then forced to stand: no hit, double, or
            // re-split on split aces.
            let hand = &mut self.player.hands_mut()[index];
            if hand.status() == HandStatus::Active {
                hand.set_status(HandStatus::Stand);
            }
            if sibling.status() == HandStatus::Active {
                sibling.set_status(HandStatus::Stand);
            }
        }

        self.player.hands_mut().insert(index + 1, sibling);

        debug!("split at hand {index}: drew {first_draw} and {second_draw}");
        self.finish_player_turn_if_done();
        Ok(())
    }
}
