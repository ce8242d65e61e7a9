//! The engine's command set.
//!
//! Every state transition enters through [`Command`]. The presentation layer
//! builds a command from user input, applies it, and re-reads the session
//! snapshot; it never mutates state directly.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;

/// Middle-card ids named by a capture command.
///
/// SmallVec keeps the common 2–4 card selections off the heap.
pub type Selection = SmallVec<[CardId; 4]>;

/// A complete game command.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Replace the session with a fresh game for the given players.
    /// Blank names default to "Player N".
    StartGame { names: Vec<String> },

    /// Draw from the Circle. During setup this deals starters and seeds the
    /// middle; during play it picks a card (or banks-and-picks after a
    /// capture).
    Draw,

    /// Flip one middle card in or out of the current selection.
    ToggleSelect { card: CardId },

    /// Empty the current selection. Always legal.
    ClearSelection,

    /// Capture selected middle cards that all match the picked card's rank.
    CaptureMatch { selection: Selection },

    /// Capture two or more selected middle cards whose values sum to the
    /// picked card's value.
    CaptureAdd { selection: Selection },

    /// End the current player's turn, banking or releasing the picked card.
    EndTurn,
}

impl Command {
    /// Build a `StartGame` command.
    #[must_use]
    pub fn start_game<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::StartGame {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a `CaptureMatch` command from any id sequence.
    #[must_use]
    pub fn capture_match(selection: impl IntoIterator<Item = CardId>) -> Self {
        Self::CaptureMatch {
            selection: selection.into_iter().collect(),
        }
    }

    /// Build a `CaptureAdd` command from any id sequence.
    #[must_use]
    pub fn capture_add(selection: impl IntoIterator<Item = CardId>) -> Self {
        Self::CaptureAdd {
            selection: selection.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_builders() {
        let cmd = Command::capture_match([CardId::new(3), CardId::new(9)]);

        match cmd {
            Command::CaptureMatch { selection } => {
                assert_eq!(selection.as_slice(), &[CardId::new(3), CardId::new(9)]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_command_equality() {
        let a = Command::capture_add([CardId::new(1), CardId::new(2)]);
        let b = Command::capture_add([CardId::new(1), CardId::new(2)]);
        let c = Command::capture_add([CardId::new(2), CardId::new(1)]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_command_serialization() {
        let cmd = Command::start_game(["Abel", "Bethel"]);
        let json = serde_json::to_string(&cmd).unwrap();
        let deserialized: Command = serde_json::from_str(&json).unwrap();

        assert_eq!(cmd, deserialized);
    }
}
