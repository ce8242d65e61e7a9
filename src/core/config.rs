//! Game configuration.
//!
//! The configurable surface is deliberately small: player names (count and
//! display text) and the middle seed target. Everything else about a game is
//! fixed by the rules.

use serde::{Deserialize, Serialize};

/// Maximum supported players per session.
///
/// Setup deals one starter per player plus the middle seeds from the 52
/// non-joker cards, so this bound keeps setup from ever exhausting the deck.
pub const MAX_PLAYERS: usize = 8;

/// Default number of cards seeded into the middle during setup.
pub const DEFAULT_MIDDLE_TARGET: usize = 3;

/// Configuration for one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    player_names: Vec<String>,
    middle_target: usize,
}

impl GameConfig {
    /// Create a configuration for the given players.
    ///
    /// Blank or whitespace-only names default to "Player N". Panics if the
    /// player count is outside `1..=MAX_PLAYERS`.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let player_names: Vec<String> = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let name = name.into();
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    format!("Player {}", i + 1)
                } else {
                    trimmed.to_string()
                }
            })
            .collect();

        assert!(!player_names.is_empty(), "Must have at least 1 player");
        assert!(
            player_names.len() <= MAX_PLAYERS,
            "At most {} players supported",
            MAX_PLAYERS
        );

        Self {
            player_names,
            middle_target: DEFAULT_MIDDLE_TARGET,
        }
    }

    /// Set the middle seed target. Panics outside `1..=10`.
    #[must_use]
    pub fn with_middle_target(mut self, target: usize) -> Self {
        assert!((1..=10).contains(&target), "Middle target must be 1-10");
        self.middle_target = target;
        self
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_names.len()
    }

    /// Normalized player names, in seating order.
    #[must_use]
    pub fn player_names(&self) -> &[String] {
        &self.player_names
    }

    /// Number of cards seeded into the middle during setup.
    #[must_use]
    pub fn middle_target(&self) -> usize {
        self.middle_target
    }
}
