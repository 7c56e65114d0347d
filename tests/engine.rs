//! Round engine integration tests.

use bjsim::{
    Action, BasicStrategy, BetError, Card, DecisionSource, GameOptions, Hand, HandOutcome,
    HandStatus, Rank, RoundEngine, RoundError, RoundState,
};

const fn card(rank: Rank) -> Card {
    Card::new(rank)
}

fn hand_of(ranks: &[Rank]) -> Hand {
    let mut hand = Hand::new(10.0);
    for &rank in ranks {
        hand.add_card(card(rank));
    }
    hand
}

/// Engine whose next draws are exactly `draws`, in order:
/// player, dealer up, player, dealer hole, then play-time draws.
fn engine_with(balance: f64, draws: &[Rank]) -> RoundEngine {
    let mut engine = RoundEngine::new(
        GameOptions::default(),
        balance,
        Box::new(BasicStrategy::new()),
        1,
    );
    let cards: Vec<Card> = draws.iter().map(|&rank| card(rank)).collect();
    engine.deck_mut().stack(&cards);
    engine
}

/// A policy that replays a fixed decision script, then stands.
struct Scripted(Vec<Option<Action>>);

impl Scripted {
    fn new(script: &[Option<Action>]) -> Self {
        let mut reversed: Vec<_> = script.to_vec();
        reversed.reverse();
        Self(reversed)
    }
}

impl DecisionSource for Scripted {
    fn decide(&mut self, _hand: &Hand, _upcard: Card) -> Option<Action> {
        self.0.pop().unwrap_or(Some(Action::Stand))
    }
}

fn scripted_engine(balance: f64, draws: &[Rank], script: &[Option<Action>]) -> RoundEngine {
    let mut engine = RoundEngine::new(
        GameOptions::default(),
        balance,
        Box::new(Scripted::new(script)),
        1,
    );
    let cards: Vec<Card> = draws.iter().map(|&rank| card(rank)).collect();
    engine.deck_mut().stack(&cards);
    engine
}

#[test]
fn hand_value_is_order_invariant() {
    let forward = hand_of(&[Rank::Ace, Rank::Nine, Rank::Five]);
    let backward = hand_of(&[Rank::Five, Rank::Nine, Rank::Ace]);
    assert_eq!(forward.value(), backward.value());
    assert_eq!(forward.value(), 15);
}

#[test]
fn aces_demote_one_at_a_time() {
    // A,A,9: one ace stays at 11 for the optimal 21.
    let hand = hand_of(&[Rank::Ace, Rank::Ace, Rank::Nine]);
    assert_eq!(hand.value(), 21);
    assert!(hand.is_soft());

    // A,9,5: counting the ace as 11 would bust, so the hand is hard 15.
    let hand = hand_of(&[Rank::Ace, Rank::Nine, Rank::Five]);
    assert_eq!(hand.value(), 15);
    assert!(!hand.is_soft());

    let hand = hand_of(&[Rank::Ace, Rank::Six]);
    assert_eq!(hand.value(), 17);
    assert!(hand.is_soft());
}

#[test]
fn blackjack_is_exactly_two_card_twenty_one() {
    assert!(hand_of(&[Rank::Ace, Rank::King]).is_blackjack());
    assert!(!hand_of(&[Rank::Ten, Rank::King]).is_blackjack());
    assert!(!hand_of(&[Rank::Ace, Rank::Five, Rank::Five]).is_blackjack());
    assert_eq!(hand_of(&[Rank::Ace, Rank::King]).status(), HandStatus::Blackjack);
}

#[test]
fn pair_requires_equal_ranks() {
    assert!(hand_of(&[Rank::Eight, Rank::Eight]).is_pair());
    // Ten and king share a value but not a rank.
    assert!(!hand_of(&[Rank::Ten, Rank::King]).is_pair());
    assert!(!hand_of(&[Rank::Eight, Rank::Eight, Rank::Two]).is_pair());
}

#[test]
fn dealer_hits_below_seventeen_only() {
    let mut dealer = bjsim::DealerHand::new();
    dealer.add_card(card(Rank::Ten));
    dealer.add_card(card(Rank::Six));
    assert!(dealer.should_hit(false));

    dealer.add_card(card(Rank::Ace));
    assert_eq!(dealer.value(), 17);
    assert!(!dealer.should_hit(false));
}

#[test]
fn dealer_soft_seventeen_variant() {
    let mut dealer = bjsim::DealerHand::new();
    dealer.add_card(card(Rank::Ace));
    dealer.add_card(card(Rank::Six));
    assert_eq!(dealer.value(), 17);
    assert!(dealer.is_soft());

    // Stand on all 17s by default; hit soft 17 under the variant.
    assert!(!dealer.should_hit(false));
    assert!(dealer.should_hit(true));
}

#[test]
fn start_round_rejects_bad_bets() {
    let mut engine = engine_with(100.0, &[]);

    assert_eq!(engine.start_round(0.0).unwrap_err(), BetError::NonPositiveBet);
    assert_eq!(engine.start_round(-5.0).unwrap_err(), BetError::NonPositiveBet);
    assert_eq!(
        engine.start_round(100.5).unwrap_err(),
        BetError::InsufficientFunds
    );

    // Nothing changed: no cards dealt, balance intact, still accepting bets.
    assert_eq!(engine.balance(), 100.0);
    assert_eq!(engine.state(), RoundState::Betting);
    assert!(engine.player().hands().is_empty());
}

#[test]
fn start_round_rejected_mid_round() {
    let mut engine = engine_with(
        1000.0,
        &[Rank::Ten, Rank::Ten, Rank::Nine, Rank::Seven],
    );
    engine.start_round(100.0).unwrap();
    assert_eq!(engine.start_round(100.0).unwrap_err(), BetError::InvalidState);
}

#[test]
fn player_natural_pays_three_to_two() {
    let mut engine = engine_with(1000.0, &[Rank::Ace, Rank::Five, Rank::King, Rank::Nine]);
    engine.start_round(100.0).unwrap();

    let result = engine.check_naturals().unwrap().expect("natural settles");
    assert_eq!(result.hands.len(), 1);
    assert_eq!(result.hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(result.hands[0].payout, 250.0);
    assert_eq!(result.hands[0].net, 150.0);
    assert_eq!(result.balance, 1150.0);
    assert_eq!(engine.state(), RoundState::Betting);
}

#[test]
fn mutual_naturals_push() {
    let mut engine = engine_with(1000.0, &[Rank::Ace, Rank::Ace, Rank::King, Rank::King]);
    engine.start_round(100.0).unwrap();

    let result = engine.check_naturals().unwrap().expect("natural settles");
    assert_eq!(result.hands[0].outcome, HandOutcome::Push);
    assert!(result.dealer_blackjack);
    assert_eq!(result.balance, 1000.0);
}

#[test]
fn dealer_natural_forfeits_stake() {
    let mut engine = engine_with(1000.0, &[Rank::Nine, Rank::Ace, Rank::Seven, Rank::King]);
    engine.start_round(100.0).unwrap();

    let result = engine.check_naturals().unwrap().expect("natural settles");
    assert_eq!(result.hands[0].outcome, HandOutcome::Loss);
    assert!(result.dealer_blackjack);
    assert_eq!(result.balance, 900.0);
}

#[test]
fn nineteen_beats_dealer_seventeen() {
    // Balance 1000, bet 100: player 10,9 stands on 19; dealer 10,7 stands
    // on 17. Win returns double the stake.
    let mut engine = engine_with(1000.0, &[Rank::Ten, Rank::Ten, Rank::Nine, Rank::Seven]);

    let result = engine.play_round(100.0).unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);
    assert_eq!(result.hands[0].payout, 200.0);
    assert_eq!(result.dealer_value, 17);
    assert_eq!(result.balance, 1100.0);
}

#[test]
fn equal_totals_push_the_stake() {
    let mut engine = engine_with(500.0, &[Rank::Ten, Rank::Ten, Rank::Eight, Rank::Eight]);

    let result = engine.play_round(50.0).unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Push);
    assert_eq!(result.hands[0].net, 0.0);
    assert_eq!(result.balance, 500.0);
}

#[test]
fn player_bust_loses_and_dealer_never_draws() {
    // Hard 16 against a ten: the chart hits, the king busts the hand, and
    // with no live hand the dealer keeps a two-card 16 instead of drawing.
    let mut engine = engine_with(
        1000.0,
        &[Rank::Ten, Rank::Ten, Rank::Six, Rank::Six, Rank::King],
    );

    let result = engine.play_round(100.0).unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Loss);
    assert!(result.hands[0].player_value > 21);
    assert_eq!(result.dealer_cards.len(), 2);
    assert_eq!(result.dealer_value, 16);
    assert_eq!(result.balance, 900.0);
}

#[test]
fn dealer_bust_pays_surviving_hands() {
    // Player stands on 18; dealer 16 must draw and busts.
    let mut engine = engine_with(
        1000.0,
        &[Rank::Ten, Rank::Ten, Rank::Eight, Rank::Six, Rank::King],
    );

    let result = engine.play_round(100.0).unwrap();
    assert!(result.dealer_bust);
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);
    assert_eq!(result.balance, 1100.0);
}

#[test]
fn split_aces_get_one_card_each_and_stand() {
    // A,A against a 9 splits; each ace hand draws exactly one card and is
    // forced to stand, even the one that re-forms a pair.
    let mut engine = engine_with(
        1000.0,
        &[
            Rank::Ace,   // player
            Rank::Nine,  // dealer up
            Rank::Ace,   // player
            Rank::Seven, // dealer hole
            Rank::Five,  // first split hand
            Rank::Six,   // second split hand
            Rank::Ten,   // dealer draw on 16
        ],
    );
    engine.start_round(100.0).unwrap();
    assert!(engine.check_naturals().unwrap().is_none());
    engine.player_turn().unwrap();

    let hands = engine.player().hands();
    assert_eq!(hands.len(), 2);
    assert_eq!(hands[0].len(), 2);
    assert_eq!(hands[1].len(), 2);
    assert_eq!(hands[0].status(), HandStatus::Stand);
    assert_eq!(hands[1].status(), HandStatus::Stand);

    engine.dealer_turn().unwrap();
    let result = engine.settle().unwrap();
    // Dealer drew to 26: both split hands win their own bet.
    assert!(result.dealer_bust);
    assert_eq!(result.hands.len(), 2);
    assert_eq!(result.balance, 1000.0 - 200.0 + 400.0);
}

#[test]
fn split_ace_twenty_one_is_not_a_natural() {
    let mut engine = engine_with(
        1000.0,
        &[
            Rank::Ace,  // player
            Rank::Nine, // dealer up
            Rank::Ace,  // player
            Rank::Eight, // dealer hole
            Rank::King, // first split hand: A,K = 21, but no 3:2
            Rank::Four, // second split hand
        ],
    );
    engine.start_round(100.0).unwrap();
    assert!(engine.check_naturals().unwrap().is_none());
    engine.player_turn().unwrap();
    engine.dealer_turn().unwrap();

    let result = engine.settle().unwrap();
    // 21 beats the dealer's 17 as a plain win: 2x, not 2.5x.
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);
    assert_eq!(result.hands[0].payout, 200.0);
}

#[test]
fn split_hands_play_to_completion_with_independent_bets() {
    // 8,8 against a 6 splits; the first hand stands on 18, the second makes
    // 11 and doubles its own bet. Dealer draws to 21 and takes both.
    let mut engine = engine_with(
        1000.0,
        &[
            Rank::Eight, // player
            Rank::Six,   // dealer up
            Rank::Eight, // player
            Rank::Ten,   // dealer hole
            Rank::Ten,   // first split hand: 18
            Rank::Three, // second split hand: 11
            Rank::Seven, // double-down draw: 18
            Rank::Five,  // dealer draw on 16: 21
        ],
    );
    engine.start_round(100.0).unwrap();
    assert!(engine.check_naturals().unwrap().is_none());
    engine.player_turn().unwrap();

    let hands = engine.player().hands();
    assert_eq!(hands.len(), 2);
    assert_eq!(hands[0].bet(), 100.0);
    assert_eq!(hands[1].bet(), 200.0);

    engine.dealer_turn().unwrap();
    let result = engine.settle().unwrap();
    assert_eq!(result.dealer_value, 21);
    assert_eq!(result.hands[0].outcome, HandOutcome::Loss);
    assert_eq!(result.hands[1].outcome, HandOutcome::Loss);
    // 100 stake + 100 split + 100 double all forfeited.
    assert_eq!(result.balance, 700.0);
}

#[test]
fn resplit_allowed_when_pair_reforms() {
    // The first split hand draws another eight and splits again.
    let mut engine = engine_with(
        1000.0,
        &[
            Rank::Eight, // player
            Rank::Seven, // dealer up
            Rank::Eight, // player
            Rank::Ten,   // dealer hole
            Rank::Eight, // first split hand: 8,8 again
            Rank::Ten,   // second split hand: 18
            Rank::Ten,   // re-split first hand: 18
            Rank::Ten,   // re-split second hand: 18
        ],
    );
    engine.start_round(100.0).unwrap();
    assert!(engine.check_naturals().unwrap().is_none());
    engine.player_turn().unwrap();

    assert_eq!(engine.player().hands().len(), 3);

    engine.dealer_turn().unwrap();
    let result = engine.settle().unwrap();
    // Three 18s against a dealer 17: three wins.
    assert_eq!(result.dealer_value, 17);
    assert_eq!(result.balance, 1000.0 - 300.0 + 600.0);
}

#[test]
fn double_with_empty_balance_degrades_to_single_hit() {
    // All-in bet leaves nothing to double with: 5,5 against a ten calls for
    // a double, which degrades to one committed card with the bet unchanged.
    let mut engine = engine_with(
        100.0,
        &[
            Rank::Five, // player
            Rank::Ten,  // dealer up
            Rank::Five, // player
            Rank::Eight, // dealer hole
            Rank::Four, // the single committed draw: 14
        ],
    );
    engine.start_round(100.0).unwrap();
    assert!(engine.check_naturals().unwrap().is_none());
    engine.player_turn().unwrap();

    let hands = engine.player().hands();
    assert_eq!(hands.len(), 1);
    assert_eq!(hands[0].len(), 3);
    assert_eq!(hands[0].bet(), 100.0);
    assert_eq!(hands[0].status(), HandStatus::Stand);

    engine.dealer_turn().unwrap();
    let result = engine.settle().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Loss);
    assert_eq!(result.balance, 0.0);
}

#[test]
fn partial_double_escrows_remaining_balance() {
    // Balance 150, bet 100: doubling on 11 can only add the remaining 50.
    let mut engine = engine_with(
        150.0,
        &[
            Rank::Six,  // player
            Rank::Five, // dealer up
            Rank::Five, // player: 11
            Rank::Ten,  // dealer hole: 15
            Rank::Ten,  // double draw: 21
            Rank::King, // dealer draw: 25, bust
        ],
    );

    let result = engine.play_round(100.0).unwrap();
    assert_eq!(result.hands[0].bet, 150.0);
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);
    assert_eq!(result.balance, 300.0);
}

#[test]
fn unaffordable_split_degrades_to_hit() {
    // 8,8 with no balance left to cover a second bet: the split request
    // becomes a plain hit.
    let mut engine = engine_with(
        100.0,
        &[
            Rank::Eight, // player
            Rank::Six,   // dealer up
            Rank::Eight, // player
            Rank::Ten,   // dealer hole
            Rank::Five,  // hit: 21
            Rank::King,  // dealer draw on 16: 26, bust
        ],
    );

    let result = engine.play_round(100.0).unwrap();
    assert_eq!(result.hands.len(), 1);
    assert_eq!(result.hands[0].cards.len(), 3);
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);
    assert_eq!(result.balance, 200.0);
}

#[test]
fn no_decision_is_re_requested() {
    let mut engine = scripted_engine(
        1000.0,
        &[Rank::Ten, Rank::Ten, Rank::Nine, Rank::Seven],
        &[None, None, Some(Action::Stand)],
    );

    let result = engine.play_round(100.0).unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);
    assert_eq!(result.balance, 1100.0);
}

#[test]
fn scripted_double_draws_once_and_ends_turn() {
    let mut engine = scripted_engine(
        1000.0,
        &[
            Rank::Six,   // player
            Rank::Five,  // dealer up
            Rank::Five,  // player: 11
            Rank::Ten,   // dealer hole: 15
            Rank::Nine,  // double draw: 20
            Rank::Seven, // dealer draw: 22, bust
        ],
        &[Some(Action::Double)],
    );

    let result = engine.play_round(100.0).unwrap();
    assert_eq!(result.hands[0].bet, 200.0);
    assert_eq!(result.hands[0].cards.len(), 3);
    assert_eq!(result.hands[0].payout, 400.0);
    assert_eq!(result.balance, 1200.0);
}

#[test]
fn late_double_request_degrades_to_hit() {
    // Hit first, then ask for a double on three cards: only a hit remains
    // legal, so the hand keeps drawing under the script.
    let mut engine = scripted_engine(
        1000.0,
        &[
            Rank::Two,   // player
            Rank::Ten,   // dealer up
            Rank::Three, // player: 5
            Rank::Seven, // dealer hole: 17
            Rank::Four,  // hit: 9
            Rank::Five,  // degraded double, drawn as a hit: 14
            Rank::Six,   // hit: 20
        ],
        &[
            Some(Action::Hit),
            Some(Action::Double),
            Some(Action::Hit),
            Some(Action::Stand),
        ],
    );

    let result = engine.play_round(100.0).unwrap();
    assert_eq!(result.hands[0].bet, 100.0);
    assert_eq!(result.hands[0].cards.len(), 5);
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);
}

#[test]
fn fine_grained_steps_reject_wrong_states() {
    let mut engine = engine_with(1000.0, &[]);

    assert_eq!(engine.hit().unwrap_err(), RoundError::InvalidState);
    assert_eq!(engine.stand().unwrap_err(), RoundError::InvalidState);
    assert_eq!(engine.double_down().unwrap_err(), RoundError::InvalidState);
    assert_eq!(engine.split().unwrap_err(), RoundError::InvalidState);
    assert_eq!(engine.dealer_turn().unwrap_err(), RoundError::InvalidState);
    assert_eq!(engine.settle().unwrap_err(), RoundError::InvalidState);
    assert_eq!(engine.check_naturals().unwrap_err(), RoundError::InvalidState);
}

#[test]
fn fine_grained_double_rejects_three_card_hand() {
    let mut engine = engine_with(
        1000.0,
        &[Rank::Two, Rank::Ten, Rank::Three, Rank::Seven, Rank::Four],
    );
    engine.start_round(100.0).unwrap();
    assert!(engine.check_naturals().unwrap().is_none());

    engine.hit().unwrap();
    assert_eq!(engine.double_down().unwrap_err(), RoundError::CannotDouble);
}

#[test]
fn fine_grained_split_rejects_non_pair() {
    let mut engine = engine_with(1000.0, &[Rank::Two, Rank::Ten, Rank::Three, Rank::Seven]);
    engine.start_round(100.0).unwrap();
    assert!(engine.check_naturals().unwrap().is_none());

    assert_eq!(engine.split().unwrap_err(), RoundError::CannotSplit);
}

#[test]
fn deck_is_reproducible_by_seed() {
    let mut a = bjsim::Deck::new(7);
    let mut b = bjsim::Deck::new(7);
    for _ in 0..50 {
        assert_eq!(a.deal_card(), b.deal_card());
    }
}

#[test]
fn stacked_cards_deal_in_order() {
    let mut deck = bjsim::Deck::new(0);
    deck.stack(&[card(Rank::Ace), card(Rank::Two), card(Rank::Three)]);
    assert_eq!(deck.deal_card().rank, Rank::Ace);
    assert_eq!(deck.deal_card().rank, Rank::Two);
    assert_eq!(deck.deal_card().rank, Rank::Three);
    assert_eq!(deck.stacked_len(), 0);
}
