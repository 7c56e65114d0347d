//! Persisted settings with documented defaults.

use std::fs;
use std::io;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::options::GameOptions;

/// Default initial balance.
pub const DEFAULT_INITIAL_BALANCE: f64 = 1000.0;

/// Default bet per round.
pub const DEFAULT_BET: f64 = 100.0;

/// Default number of simulated rounds.
pub const DEFAULT_ROUNDS: u64 = 1000;

/// Settings persisted as JSON between runs.
///
/// Loading never fails: a missing or malformed file, or any missing field,
/// falls back to the documented defaults. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Starting balance for the player.
    pub initial_balance: f64,
    /// Bet placed each round when none is given explicitly.
    pub default_bet: f64,
    /// Number of rounds for simulation runs.
    pub rounds: u64,
    /// Deck seed; `None` derives one from the clock.
    pub seed: Option<u64>,
    /// Whether the dealer hits a soft 17.
    pub hit_soft_17: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_balance: DEFAULT_INITIAL_BALANCE,
            default_bet: DEFAULT_BET,
            rounds: DEFAULT_ROUNDS,
            seed: None,
            hit_soft_17: false,
        }
    }
}

impl Settings {
    /// Loads settings from a JSON file, falling back to defaults on a
    /// missing or malformed file.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    warn!("could not read {}: {err}, using defaults", path.display());
                }
                return Self::default();
            }
        };

        match serde_json::from_str(&text) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("malformed {}: {err}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Saves the settings as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let text = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, text)
    }

    /// Maps the settings onto engine rule options.
    #[must_use]
    pub fn options(&self) -> GameOptions {
        GameOptions::default().with_hit_soft_17(self.hit_soft_17)
    }
}
