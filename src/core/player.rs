//! Player identification and per-player state.

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Player identifier. Indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// A player: display name plus capture pile.
///
/// The pile only ever grows during normal play; the one exception is the
/// joker sweep, which empties every non-acting player's pile. Points are
/// computed from the pile on demand, never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    pile: Vec<Card>,
}

impl Player {
    /// Create a player with an empty pile.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pile: Vec::new(),
        }
    }

    /// The player's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The capture pile, in capture order.
    #[must_use]
    pub fn pile(&self) -> &[Card] {
        &self.pile
    }

    /// Current point total: the sum of the pile's score values.
    #[must_use]
    pub fn points(&self) -> u32 {
        self.pile.iter().map(Card::score_value).sum()
    }

    pub(crate) fn bank(&mut self, card: Card) {
        self.pile.push(card);
    }

    pub(crate) fn bank_all(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.pile.extend(cards);
    }

    pub(crate) fn take_pile(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.pile)
    }
}
