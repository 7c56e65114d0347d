//! Interactive terminal blackjack.

use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use bjsim::{
    BasicStrategy, Hand, HandOutcome, RoundEngine, RoundError, RoundResult, RoundState, Settings,
};

fn main() {
    env_logger::init();

    println!("Blackjack (type 'q' to quit)");

    let settings = Settings::load(Path::new("config.json"));
    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    });

    let mut engine = RoundEngine::new(
        settings.options(),
        settings.initial_balance,
        Box::new(BasicStrategy::new()),
        seed,
    );

    loop {
        let balance = engine.balance();
        if balance <= 0.0 {
            println!("You are out of money. Game over.");
            break;
        }

        println!("\nBalance: ${balance:.2}");
        let Some(bet) = prompt_bet(balance, settings.default_bet) else {
            println!("Thanks for playing. Final balance: ${balance:.2}");
            break;
        };

        if let Err(err) = engine.start_round(bet) {
            println!("Bet error: {err}");
            continue;
        }

        print_table(&engine, true);

        match engine.check_naturals() {
            Ok(Some(result)) => {
                announce_naturals(&result);
                print_result(&result);
                continue;
            }
            Ok(None) => {}
            Err(err) => {
                println!("Round error: {err}");
                continue;
            }
        }

        while engine.state() == RoundState::PlayerTurn {
            let Some(index) = engine.current_hand() else {
                break;
            };
            print_table(&engine, true);

            let hand = &engine.player().hands()[index];
            if engine.player().hands().len() > 1 {
                println!("Playing hand {} of {}", index + 1, engine.player().hands().len());
            }
            if let Some(upcard) = engine.upcard() {
                let suggested = BasicStrategy::action(hand, upcard);
                println!("The chart suggests: {suggested:?}");
            }
            println!("{}", format_actions(&engine, hand));

            let result = match prompt_line("Action: ").as_str() {
                "h" | "hit" => engine.hit().map(|card| println!("Drew {card}")),
                "s" | "stand" => engine.stand(),
                "d" | "double" => engine.double_down().map(|card| println!("Drew {card}")),
                "p" | "split" => engine.split(),
                "q" | "quit" => {
                    println!("Thanks for playing. Final balance: ${:.2}", engine.balance());
                    return;
                }
                // No decision: ask again, never guess.
                _ => {
                    println!("Unknown action.");
                    continue;
                }
            };

            if let Err(err) = result {
                println!("Action error: {err}");
            }
        }

        if engine.state() == RoundState::DealerTurn {
            match engine.dealer_turn() {
                Ok(drawn) if !drawn.is_empty() => {
                    println!("Dealer draws {} card(s).", drawn.len());
                }
                Ok(_) => {}
                Err(err) => println!("Dealer error: {err}"),
            }
        }

        match engine.settle() {
            Ok(result) => {
                print_table_final(&result);
                print_result(&result);
            }
            Err(RoundError::InvalidState) => {}
            Err(err) => println!("Settlement error: {err}"),
        }
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

/// Prompts for a bet; `None` means quit. A bet over the balance offers
/// going all in instead.
fn prompt_bet(balance: f64, default_bet: f64) -> Option<f64> {
    loop {
        let input = prompt_line(&format!("Bet amount (default {default_bet}, 'q' to quit): "));
        if input == "q" || input == "quit" {
            return None;
        }
        let bet = if input.is_empty() {
            default_bet
        } else {
            match input.parse::<f64>() {
                Ok(value) => value,
                Err(_) => {
                    println!("Please enter a number.");
                    continue;
                }
            }
        };

        if bet <= 0.0 {
            println!("Bet amount must be positive.");
        } else if bet > balance {
            let all_in = prompt_line(&format!(
                "Bet exceeds your balance of ${balance:.2}. Go all in? (y/n): "
            ));
            if all_in == "y" || all_in == "yes" {
                println!("Going all in with ${balance:.2}!");
                return Some(balance);
            }
        } else {
            return Some(bet);
        }
    }
}

fn announce_naturals(result: &RoundResult) {
    let player_natural = result
        .hands
        .first()
        .is_some_and(|hand| hand.outcome == HandOutcome::Blackjack);
    if result.dealer_blackjack && result.hands.first().is_some_and(|h| h.outcome == HandOutcome::Push) {
        println!("Both have blackjack. Push.");
    } else if player_natural {
        println!("Blackjack! You win 3:2.");
    } else if result.dealer_blackjack {
        println!("Dealer has blackjack. You lose.");
    }
}

fn print_table(engine: &RoundEngine, hide_hole: bool) {
    let dealer = engine.dealer().hand();
    let dealer_view = if hide_hole && !dealer.is_hole_revealed() {
        let up = dealer
            .up_card()
            .map_or_else(|| "(no cards)".to_string(), |card| card.to_string());
        format!("{up} ??")
    } else {
        join_cards(dealer.cards())
    };
    println!("\nDealer: {dealer_view} (showing {})", dealer.visible_value());

    let current = engine.current_hand();
    for (index, hand) in engine.player().hands().iter().enumerate() {
        let marker = if current == Some(index) { "*" } else { " " };
        println!(
            "{} Hand {}: {} | value {} | bet {} | {:?}",
            marker,
            index,
            join_cards(hand.cards()),
            hand.value(),
            hand.bet(),
            hand.status()
        );
    }
    println!();
}

fn print_table_final(result: &RoundResult) {
    println!(
        "\nDealer: {} (value {}){}",
        join_cards(&result.dealer_cards),
        result.dealer_value,
        if result.dealer_bust { " BUST" } else { "" }
    );
}

fn print_result(result: &RoundResult) {
    for hand in &result.hands {
        let label = match hand.outcome {
            HandOutcome::Blackjack => "Blackjack!",
            HandOutcome::Win => "Win",
            HandOutcome::Push => "Push",
            HandOutcome::Loss => "Loss",
        };
        println!(
            "Hand {}: {} ({}) | bet {} | net {:+.2}",
            hand.hand_index,
            label,
            join_cards(&hand.cards),
            hand.bet,
            hand.net
        );
    }
    println!("Balance: ${:.2}", result.balance);
}

fn format_actions(engine: &RoundEngine, hand: &Hand) -> String {
    let can_double = hand.len() == 2
        && (!hand.is_from_split() || engine.options().double_after_split);
    let can_split = hand.is_pair() && engine.balance() >= hand.bet();

    let parts = [
        format_action("hit", "h", true),
        format_action("stand", "s", true),
        format_action("double", "d", can_double),
        format_action("split", "p", can_split),
    ];
    format!("Actions: {}", parts.join(" "))
}

fn format_action(label: &str, key: &str, allowed: bool) -> String {
    let text = format!("[{key}]{label}");
    if allowed {
        colorize(&text, "32")
    } else {
        colorize(&text, "90")
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn join_cards(cards: &[bjsim::Card]) -> String {
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
