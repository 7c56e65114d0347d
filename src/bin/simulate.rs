//! Batch house-edge simulation.

use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;

use bjsim::{SessionStats, Settings, Simulation};

#[derive(Parser)]
#[command(
    name = "simulate",
    about = "Estimate the blackjack house edge by playing many rounds of basic strategy"
)]
struct Args {
    /// Number of rounds to simulate
    #[arg(long)]
    rounds: Option<u64>,

    /// Bet size for each round
    #[arg(long)]
    bet: Option<f64>,

    /// Bankroll the balance is topped back up to
    #[arg(long)]
    bankroll: Option<f64>,

    /// Deck seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Dealer hits soft 17
    #[arg(long, default_value_t = false, action = clap::ArgAction::Set)]
    hit_soft_17: bool,

    /// Settings file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let settings = Settings::load(&args.config);

    let rounds = args.rounds.unwrap_or(settings.rounds);
    let bet = args.bet.unwrap_or(settings.default_bet);
    let bankroll = args.bankroll.unwrap_or(settings.initial_balance);
    let seed = args.seed.or(settings.seed).unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    });

    if rounds == 0 || bet <= 0.0 || bankroll < bet {
        eprintln!("error: need rounds > 0, bet > 0, and a bankroll covering the bet");
        std::process::exit(1);
    }

    let options = settings
        .options()
        .with_hit_soft_17(args.hit_soft_17 || settings.hit_soft_17);

    println!("Simulating {rounds} rounds at ${bet:.2} per round (seed {seed})...");

    // Progress cadence scaled to the run size.
    let update_every = if rounds > 10_000 {
        2_000
    } else if rounds > 1_000 {
        1_000
    } else {
        100
    };

    let started = Instant::now();
    let mut simulation = Simulation::new(options, bankroll, bet, seed);
    let stats = simulation.run_with_progress(rounds, |played, stats| {
        if played % update_every == 0 && played < rounds {
            let elapsed = started.elapsed().as_secs_f64();
            let remaining = elapsed / played as f64 * (rounds - played) as f64;
            println!(
                "{:5.1}% ({played}/{rounds}) | edge so far {:+.4}% | ~{remaining:.0}s left",
                played as f64 / rounds as f64 * 100.0,
                stats.house_edge()
            );
        }
    });

    print_report(stats, bet, started.elapsed().as_secs_f64());
}

fn print_report(stats: &SessionStats, bet: f64, elapsed: f64) {
    let hands = stats.blackjacks + stats.wins + stats.pushes + stats.losses;
    let pct = |count: u64| {
        if hands == 0 {
            0.0
        } else {
            count as f64 / hands as f64 * 100.0
        }
    };

    println!("\nSimulation complete in {elapsed:.1}s");
    println!("Rounds played:  {}", stats.rounds);
    println!("Hands settled:  {hands}");
    println!("Total wagered:  ${:.2}", stats.total_wagered);
    println!("Net profit:     ${:+.2}", stats.total_profit);
    println!(
        "House edge:     {:+.4}% (std error {:.4})",
        stats.house_edge(),
        stats.std_error()
    );
    println!(
        "Expected loss per ${bet:.2} bet: ${:.2}",
        stats.house_edge() * bet / 100.0
    );
    println!("\nOutcomes:");
    println!("  Blackjacks: {:7} ({:5.2}%)", stats.blackjacks, pct(stats.blackjacks));
    println!("  Wins:       {:7} ({:5.2}%)", stats.wins, pct(stats.wins));
    println!("  Pushes:     {:7} ({:5.2}%)", stats.pushes, pct(stats.pushes));
    println!("  Losses:     {:7} ({:5.2}%)", stats.losses, pct(stats.losses));
}
