//! The session: one game's complete mutable state.
//!
//! A `Session` owns every card and all turn/phase bookkeeping. It is only
//! mutated through [`Session::apply`](crate::engine::rules): presentation
//! code holds it, applies commands, and re-reads the snapshot after each one.
//! Cloning a session is cheap enough to snapshot per operation.

use im::HashSet as ImHashSet;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, Deck};
use crate::core::config::GameConfig;
use crate::core::player::{Player, PlayerId};
use crate::core::rng::GameRng;

/// Game phase. The derived order is the transition order: phases only ever
/// move forward (`SetupStarters < SetupMiddle < Play < Ended`), with play
/// looping on itself until the game ends.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Phase {
    /// Each player draws one auto-banked starter card.
    SetupStarters,
    /// The middle is seeded up to its target size.
    SetupMiddle,
    /// Normal draw/capture/end-turn play.
    Play,
    /// Terminal. Every play command is rejected; only a new game proceeds.
    Ended,
}

/// Where a card currently lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Deck,
    Middle,
    Picked,
    Pile(PlayerId),
}

/// One game's complete state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub(crate) players: Vec<Player>,
    pub(crate) turn: PlayerId,
    pub(crate) deck: Deck,
    pub(crate) middle: Vec<Card>,
    pub(crate) picked: Option<Card>,
    /// Has the current picked card captured at least once?
    pub(crate) captured_this_pick: bool,
    pub(crate) selected: ImHashSet<CardId>,
    pub(crate) phase: Phase,
    /// Which player draws the next setup starter.
    pub(crate) next_starter: usize,
    pub(crate) middle_target: usize,
    /// Set once, by the draw that first empties the deck. That player
    /// collects any leftover middle cards when the game ends.
    pub(crate) last_picker: Option<PlayerId>,
    #[serde(skip, default = "GameRng::from_entropy")]
    pub(crate) rng: GameRng,
}

impl Session {
    /// Create a fresh session: shuffled 54-card deck, empty piles, setup
    /// phase.
    #[must_use]
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let deck = Deck::shuffled(&mut rng);
        Self::from_parts(config, deck, rng)
    }

    /// Create a session with an explicit deck order.
    ///
    /// For scripted scenarios and tests. The RNG is still used for joker
    /// burial positions.
    #[must_use]
    pub fn with_deck(config: &GameConfig, deck: Deck, seed: u64) -> Self {
        Self::from_parts(config, deck, GameRng::new(seed))
    }

    fn from_parts(config: &GameConfig, deck: Deck, rng: GameRng) -> Self {
        let players = config
            .player_names()
            .iter()
            .map(Player::new)
            .collect();

        Self {
            players,
            turn: PlayerId::new(0),
            deck,
            middle: Vec::new(),
            picked: None,
            captured_this_pick: false,
            selected: ImHashSet::new(),
            phase: Phase::SetupStarters,
            next_starter: 0,
            middle_target: config.middle_target(),
            last_picker: None,
            rng,
        }
    }

    // === Read access ===

    /// All players, in seating order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// One player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Whose turn it is.
    #[must_use]
    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    /// The acting player.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.turn.index()]
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Cards left in the Circle.
    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    /// The face-up middle pool, in arrival order.
    #[must_use]
    pub fn middle(&self) -> &[Card] {
        &self.middle
    }

    /// The picked card, if a draw is awaiting resolution.
    #[must_use]
    pub fn picked(&self) -> Option<Card> {
        self.picked
    }

    /// Has the current picked card captured at least once?
    #[must_use]
    pub fn captured_this_pick(&self) -> bool {
        self.captured_this_pick
    }

    /// Middle card ids currently selected.
    #[must_use]
    pub fn selected(&self) -> &ImHashSet<CardId> {
        &self.selected
    }

    /// Is this middle card selected?
    #[must_use]
    pub fn is_selected(&self, id: CardId) -> bool {
        self.selected.contains(&id)
    }

    /// Which player draws the next setup starter.
    #[must_use]
    pub fn next_starter(&self) -> PlayerId {
        PlayerId::new(self.next_starter as u8)
    }

    /// Configured middle seed target.
    #[must_use]
    pub fn middle_target(&self) -> usize {
        self.middle_target
    }

    /// Has the deck been emptied for the first time?
    #[must_use]
    pub fn last_pick_triggered(&self) -> bool {
        self.last_picker.is_some()
    }

    /// The player whose draw emptied the deck, once that has happened.
    #[must_use]
    pub fn last_picker(&self) -> Option<PlayerId> {
        self.last_picker
    }

    // === Accounting ===

    /// Total cards across deck, middle, picked slot, and all piles.
    ///
    /// Constant for the life of a session (54 for a standard game).
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.middle.len()
            + usize::from(self.picked.is_some())
            + self.players.iter().map(|p| p.pile().len()).sum::<usize>()
    }

    /// Locate every card in the session.
    #[must_use]
    pub fn locations(&self) -> FxHashMap<CardId, Location> {
        let mut map = FxHashMap::default();
        for card in self.deck.cards() {
            map.insert(card.id, Location::Deck);
        }
        for card in &self.middle {
            map.insert(card.id, Location::Middle);
        }
        if let Some(card) = self.picked {
            map.insert(card.id, Location::Picked);
        }
        for (i, player) in self.players.iter().enumerate() {
            for card in player.pile() {
                map.insert(card.id, Location::Pile(PlayerId::new(i as u8)));
            }
        }
        map
    }

    // === Internal helpers for the rules module ===

    pub(crate) fn current_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.turn.index()]
    }

    pub(crate) fn advance_turn(&mut self) {
        self.turn = PlayerId::new(((self.turn.index() + 1) % self.players.len()) as u8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::DECK_SIZE;

    fn config() -> GameConfig {
        GameConfig::new(["Abel", "Bethel"])
    }

    #[test]
    fn test_fresh_session_shape() {
        let session = Session::new(&config(), 42);

        assert_eq!(session.phase(), Phase::SetupStarters);
        assert_eq!(session.turn(), PlayerId::new(0));
        assert_eq!(session.next_starter(), PlayerId::new(0));
        assert_eq!(session.deck_len(), DECK_SIZE);
        assert!(session.middle().is_empty());
        assert!(session.picked().is_none());
        assert!(session.selected().is_empty());
        assert!(!session.last_pick_triggered());
        assert_eq!(session.player(PlayerId::new(0)).name(), "Abel");
        assert_eq!(session.player(PlayerId::new(1)).name(), "Bethel");
    }

    #[test]
    fn test_card_count_is_full_deck() {
        let session = Session::new(&config(), 42);

        assert_eq!(session.card_count(), DECK_SIZE);
        assert_eq!(session.locations().len(), DECK_SIZE);
    }

    #[test]
    fn test_locations_start_in_deck() {
        let session = Session::new(&config(), 42);

        assert!(session
            .locations()
            .values()
            .all(|loc| *loc == Location::Deck));
    }

    #[test]
    fn test_phase_order_matches_transitions() {
        assert!(Phase::SetupStarters < Phase::SetupMiddle);
        assert!(Phase::SetupMiddle < Phase::Play);
        assert!(Phase::Play < Phase::Ended);
    }

    #[test]
    fn test_advance_turn_wraps() {
        let mut session = Session::new(&config(), 42);

        session.advance_turn();
        assert_eq!(session.turn(), PlayerId::new(1));
        session.advance_turn();
        assert_eq!(session.turn(), PlayerId::new(0));
    }

    #[test]
    fn test_snapshot_serialization_skips_rng() {
        let session = Session::new(&config(), 42);

        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.phase(), session.phase());
        assert_eq!(restored.deck_len(), session.deck_len());
        assert_eq!(restored.card_count(), session.card_count());
        assert!(!json.contains("rng"));
    }
}
