//! Command application: the game-state machine.
//!
//! [`Session::apply`] is the engine's single entry point. Each call runs the
//! command's primary effect, then evaluates the end-of-game transition
//! exactly once at a fixed point before returning. Invalid commands reject
//! with an advisory event and change nothing.
//!
//! ## Draw semantics during play
//!
//! The picked slot gates drawing. With no picked card, a draw pops the deck.
//! With a picked card that has already captured, the draw banks it first and
//! then pops. With a picked card that has not captured, the draw is rejected:
//! the player must capture or end the turn. A drawn joker never waits in the
//! picked slot: it resolves immediately as a full sweep.

use super::events::{Event, RejectReason};
use super::outcome::{decide, standings};
use super::session::{Phase, Session};
use crate::cards::{Card, CardId};
use crate::core::command::{Command, Selection};
use crate::core::config::{GameConfig, MAX_PLAYERS};
use crate::core::player::PlayerId;

fn reject(events: &mut Vec<Event>, reason: RejectReason) {
    events.push(Event::Rejected { reason });
}

impl Session {
    /// Apply one command, returning the events it produced.
    ///
    /// The returned events are also the advisory log: append them to an
    /// [`EventLog`](super::events::EventLog) to build the game's running
    /// commentary.
    pub fn apply(&mut self, command: Command) -> Vec<Event> {
        match command {
            Command::StartGame { names } => self.start_game(names),
            other => self.apply_play(other),
        }
    }

    fn apply_play(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        let cards_before = self.card_count();

        match command {
            Command::Draw => self.draw(&mut events),
            Command::ToggleSelect { card } => self.toggle_select(card, &mut events),
            Command::ClearSelection => self.selected.clear(),
            Command::CaptureMatch { selection } => self.capture_match(&selection, &mut events),
            Command::CaptureAdd { selection } => self.capture_add(&selection, &mut events),
            Command::EndTurn => self.end_turn(&mut events),
            // Handled in apply.
            Command::StartGame { .. } => {}
        }

        self.resolve_end_of_game(&mut events);

        debug_assert_eq!(
            self.card_count(),
            cards_before,
            "card conservation violated"
        );
        events
    }

    // === Start game ===

    fn start_game(&mut self, names: Vec<String>) -> Vec<Event> {
        if names.is_empty() || names.len() > MAX_PLAYERS {
            return vec![Event::Rejected {
                reason: RejectReason::InvalidPlayerCount { count: names.len() },
            }];
        }

        let config = GameConfig::new(names);
        let seed = self.rng.next_seed();
        *self = Session::new(&config, seed);

        vec![Event::GameStarted {
            players: self.player_count(),
        }]
    }

    // === Draw ===

    fn draw(&mut self, events: &mut Vec<Event>) {
        match self.phase {
            Phase::SetupStarters => self.draw_starter(events),
            Phase::SetupMiddle => self.seed_middle(events),
            Phase::Play => self.draw_in_play(events),
            Phase::Ended => reject(events, RejectReason::GameOver),
        }
    }

    /// Deal one starter to the player at the setup cursor.
    ///
    /// A joker is buried back into the deck and the cursor stays put: the
    /// same player draws again. Starters are auto-banked, never picked.
    fn draw_starter(&mut self, events: &mut Vec<Event>) {
        let Some(card) = self.deck.draw() else {
            return;
        };

        if card.is_joker() {
            let player = self.next_starter();
            self.deck.bury(card, &mut self.rng);
            events.push(Event::JokerBuried {
                player: Some(player),
            });
            return;
        }

        let player = self.next_starter();
        self.players[self.next_starter].bank(card);
        events.push(Event::StarterDealt { player, card });

        self.next_starter += 1;
        if self.next_starter >= self.players.len() {
            self.phase = Phase::SetupMiddle;
        }
    }

    /// Seed one card into the middle, burying jokers like starter draws.
    fn seed_middle(&mut self, events: &mut Vec<Event>) {
        if self.middle.len() >= self.middle_target {
            return;
        }
        let Some(card) = self.deck.draw() else {
            return;
        };

        if card.is_joker() {
            self.deck.bury(card, &mut self.rng);
            events.push(Event::JokerBuried { player: None });
            return;
        }

        self.middle.push(card);
        events.push(Event::MiddleSeeded {
            card,
            count: self.middle.len(),
            target: self.middle_target,
        });

        if self.middle.len() >= self.middle_target {
            self.phase = Phase::Play;
            self.turn = PlayerId::new(0);
            events.push(Event::PlayStarted { first: self.turn });
        }
    }

    fn draw_in_play(&mut self, events: &mut Vec<Event>) {
        if let Some(card) = self.picked {
            if !self.captured_this_pick {
                reject(events, RejectReason::PickPending);
                return;
            }
            // Bank the captured-with pick, then continue into a fresh draw.
            self.current_player_mut().bank(card);
            events.push(Event::PickedBanked {
                player: self.turn,
                card,
            });
            self.picked = None;
            self.selected.clear();
            self.captured_this_pick = false;
        }

        if self.deck.is_empty() {
            // Nothing to draw; the fixed-point check below ends the game.
            return;
        }

        let Some(card) = self.deck.draw() else {
            return;
        };
        self.picked = Some(card);
        self.selected.clear();
        self.captured_this_pick = false;

        if self.deck.is_empty() && self.last_picker.is_none() {
            self.last_picker = Some(self.turn);
        }

        if card.is_joker() {
            self.resolve_joker(events);
            return;
        }

        events.push(Event::CardPicked {
            player: self.turn,
            card,
        });
    }

    /// A drawn joker sweeps the middle, every other pile, and itself into
    /// the drawing player's pile. The turn does not advance: the player
    /// draws again.
    fn resolve_joker(&mut self, events: &mut Vec<Event>) {
        let Some(joker) = self.picked.take() else {
            return;
        };

        let middle_taken = self.middle.len();
        let middle_cards = std::mem::take(&mut self.middle);
        self.current_player_mut().bank_all(middle_cards);

        let mut piles_taken = 0;
        let taker = self.turn.index();
        for i in 0..self.players.len() {
            if i == taker {
                continue;
            }
            let pile = self.players[i].take_pile();
            piles_taken += pile.len();
            self.players[taker].bank_all(pile);
        }

        self.players[taker].bank(joker);
        self.selected.clear();

        events.push(Event::JokerSwept {
            player: self.turn,
            middle_taken,
            piles_taken,
        });
    }

    // === Selection ===

    fn toggle_select(&mut self, id: CardId, events: &mut Vec<Event>) {
        match self.phase {
            Phase::Ended => return reject(events, RejectReason::GameOver),
            Phase::Play => {}
            _ => return reject(events, RejectReason::WrongPhase),
        }
        if self.picked.is_none() {
            return reject(events, RejectReason::NoPickedCard);
        }
        if !self.middle.iter().any(|c| c.id == id) {
            return reject(events, RejectReason::NotInMiddle);
        }

        if self.selected.contains(&id) {
            self.selected.remove(&id);
        } else {
            self.selected.insert(id);
        }
    }

    /// Resolve a command's selection against the middle: ids not currently
    /// in the middle are ignored, and middle order is preserved.
    fn resolve_selection(&self, selection: &Selection) -> Vec<Card> {
        self.middle
            .iter()
            .filter(|c| selection.contains(&c.id))
            .copied()
            .collect()
    }

    /// Move resolved cards from the middle to the acting player's pile and
    /// mark the pick as having captured. The picked card stays active.
    fn take_selected(&mut self, selected: &[Card]) {
        self.middle
            .retain(|c| !selected.iter().any(|s| s.id == c.id));
        self.current_player_mut().bank_all(selected.iter().copied());
        self.selected.clear();
        self.captured_this_pick = true;
    }

    // === Captures ===

    fn capture_match(&mut self, selection: &Selection, events: &mut Vec<Event>) {
        match self.phase {
            Phase::Ended => return reject(events, RejectReason::GameOver),
            Phase::Play => {}
            _ => return reject(events, RejectReason::WrongPhase),
        }
        let Some(picked) = self.picked else {
            return reject(events, RejectReason::NoPickedCard);
        };

        let selected = self.resolve_selection(selection);
        if selected.is_empty() {
            return reject(events, RejectReason::NoSelection);
        }
        if selected.iter().any(|c| c.rank != picked.rank) {
            return reject(events, RejectReason::RankMismatch { rank: picked.rank });
        }

        let count = selected.len();
        self.take_selected(&selected);
        events.push(Event::MatchCaptured {
            player: self.turn,
            rank: picked.rank,
            count,
        });
    }

    fn capture_add(&mut self, selection: &Selection, events: &mut Vec<Event>) {
        match self.phase {
            Phase::Ended => return reject(events, RejectReason::GameOver),
            Phase::Play => {}
            _ => return reject(events, RejectReason::WrongPhase),
        }
        let Some(picked) = self.picked else {
            return reject(events, RejectReason::NoPickedCard);
        };
        if !picked.is_numeric() {
            return reject(events, RejectReason::AddNeedsNumericPick);
        }

        let selected = self.resolve_selection(selection);
        if selected.len() < 2 {
            return reject(events, RejectReason::AddNeedsTwoCards);
        }

        let target = picked.add_value();
        let sum: u32 = selected.iter().map(Card::add_value).sum();
        if sum != target {
            return reject(events, RejectReason::SumMismatch { sum, target });
        }

        let count = selected.len();
        self.take_selected(&selected);
        events.push(Event::AddCaptured {
            player: self.turn,
            sum,
            count,
        });
    }

    // === End turn ===

    fn end_turn(&mut self, events: &mut Vec<Event>) {
        match self.phase {
            Phase::Ended => return reject(events, RejectReason::GameOver),
            Phase::Play => {}
            _ => return reject(events, RejectReason::WrongPhase),
        }

        let Some(card) = self.picked else {
            self.advance_turn();
            events.push(Event::TurnPassed { next: self.turn });
            return;
        };

        if self.captured_this_pick {
            // Bank the pick that earned its keep.
            self.current_player_mut().bank(card);
            events.push(Event::PickedBanked {
                player: self.turn,
                card,
            });
        } else {
            // A miss: the unplayed pick goes to the middle face-up.
            self.middle.push(card);
            events.push(Event::PickedReturned {
                player: self.turn,
                card,
            });
        }

        self.picked = None;
        self.selected.clear();
        self.captured_this_pick = false;

        if !self.end_of_game_armed() {
            self.advance_turn();
            events.push(Event::TurnPassed { next: self.turn });
        }
    }

    // === End of game ===

    /// The end-of-game transition is ready to fire: the deck has been
    /// emptied, nothing is pending in the picked slot, and play is still on.
    fn end_of_game_armed(&self) -> bool {
        self.last_picker.is_some()
            && self.deck.is_empty()
            && self.picked.is_none()
            && self.phase == Phase::Play
    }

    /// Evaluated once per apply, after the primary effect. Fires at most
    /// once per session.
    fn resolve_end_of_game(&mut self, events: &mut Vec<Event>) {
        if !self.end_of_game_armed() {
            return;
        }
        let Some(last) = self.last_picker else {
            return;
        };

        if !self.middle.is_empty() {
            let count = self.middle.len();
            let cards = std::mem::take(&mut self.middle);
            self.players[last.index()].bank_all(cards);
            events.push(Event::MiddleCollected {
                player: last,
                count,
            });
        }
        self.selected.clear();

        let rows = standings(&self.players);
        let result = decide(&rows);
        events.push(Event::GameOver { result });

        self.phase = Phase::Ended;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, Deck, Rank, Suit};
    use crate::core::player::PlayerId;

    fn card(id: u32, rank: Rank, suit: Suit) -> Card {
        Card::standard(CardId::new(id), rank, suit)
    }

    fn joker(id: u32) -> Card {
        Card::joker(CardId::new(id))
    }

    /// Session whose deck yields `draw_order` front-to-back.
    fn scripted(names: &[&str], draw_order: &[Card]) -> Session {
        let mut cards = draw_order.to_vec();
        cards.reverse();
        Session::with_deck(
            &GameConfig::new(names.iter().copied()),
            Deck::from_cards(cards),
            7,
        )
    }

    /// Run setup for two players, no jokers. Leaves the middle as
    /// [7♥(2), 5♥(3), 4♣(4)] and the deck as 7♣(5), 9♦(6), 10♠(7) from the
    /// top.
    fn past_setup() -> Session {
        let mut session = scripted(
            &["A", "B"],
            &[
                card(0, Rank::Two, Suit::Spades),
                card(1, Rank::Three, Suit::Spades),
                card(2, Rank::Seven, Suit::Hearts),
                card(3, Rank::Five, Suit::Hearts),
                card(4, Rank::Four, Suit::Clubs),
                card(5, Rank::Seven, Suit::Clubs),
                card(6, Rank::Nine, Suit::Diamonds),
                card(7, Rank::Ten, Suit::Spades),
            ],
        );
        for _ in 0..5 {
            session.apply(Command::Draw);
        }
        assert_eq!(session.phase(), Phase::Play);
        session
    }

    #[test]
    fn test_starter_draws_advance_cursor_and_phase() {
        let mut session = scripted(
            &["A", "B"],
            &[
                card(0, Rank::Two, Suit::Spades),
                card(1, Rank::Three, Suit::Hearts),
                card(2, Rank::Four, Suit::Clubs),
            ],
        );

        let events = session.apply(Command::Draw);
        assert_eq!(
            events,
            vec![Event::StarterDealt {
                player: PlayerId::new(0),
                card: card(0, Rank::Two, Suit::Spades),
            }]
        );
        assert_eq!(session.phase(), Phase::SetupStarters);
        assert_eq!(session.next_starter(), PlayerId::new(1));

        session.apply(Command::Draw);
        assert_eq!(session.phase(), Phase::SetupMiddle);
        assert_eq!(session.player(PlayerId::new(0)).pile().len(), 1);
        assert_eq!(session.player(PlayerId::new(1)).pile().len(), 1);
    }

    #[test]
    fn test_setup_joker_is_buried_and_cursor_stays() {
        let mut session = scripted(
            &["A"],
            &[joker(50), card(0, Rank::Two, Suit::Spades)],
        );
        let deck_before = session.deck_len();

        let events = session.apply(Command::Draw);

        assert_eq!(
            events,
            vec![Event::JokerBuried {
                player: Some(PlayerId::new(0))
            }]
        );
        assert_eq!(session.next_starter(), PlayerId::new(0));
        assert!(session.player(PlayerId::new(0)).pile().is_empty());
        // The joker went back in; nothing left the deck.
        assert_eq!(session.deck_len(), deck_before);
    }

    #[test]
    fn test_seeding_fills_middle_then_play_begins() {
        let mut session = scripted(
            &["A"],
            &[
                card(0, Rank::Two, Suit::Spades),
                card(1, Rank::Three, Suit::Spades),
                card(2, Rank::Four, Suit::Spades),
                card(3, Rank::Five, Suit::Spades),
            ],
        );

        session.apply(Command::Draw); // starter
        assert_eq!(session.phase(), Phase::SetupMiddle);

        session.apply(Command::Draw);
        session.apply(Command::Draw);
        let events = session.apply(Command::Draw);

        assert_eq!(session.phase(), Phase::Play);
        assert_eq!(session.turn(), PlayerId::new(0));
        assert_eq!(session.middle().len(), 3);
        assert!(events.contains(&Event::PlayStarted {
            first: PlayerId::new(0)
        }));
    }

    #[test]
    fn test_draw_rejected_while_pick_uncaptured() {
        let mut session = past_setup();

        session.apply(Command::Draw); // pick 7♣
        let before = serde_json::to_value(&session).unwrap();

        let events = session.apply(Command::Draw);

        assert_eq!(
            events,
            vec![Event::Rejected {
                reason: RejectReason::PickPending
            }]
        );
        assert_eq!(serde_json::to_value(&session).unwrap(), before);
    }

    #[test]
    fn test_draw_banks_after_capture_and_continues() {
        let mut session = past_setup();

        session.apply(Command::Draw); // pick 7♣ (id 5)
        let events = session.apply(Command::capture_match([CardId::new(2)]));
        assert!(matches!(events[0], Event::MatchCaptured { .. }));

        let events = session.apply(Command::Draw);

        // Banks the 7♣, then picks the next card in the same call.
        assert_eq!(
            events[0],
            Event::PickedBanked {
                player: PlayerId::new(0),
                card: card(5, Rank::Seven, Suit::Clubs),
            }
        );
        assert_eq!(
            events[1],
            Event::CardPicked {
                player: PlayerId::new(0),
                card: card(6, Rank::Nine, Suit::Diamonds),
            }
        );
        assert!(!session.captured_this_pick());
    }

    #[test]
    fn test_capture_match_requires_rank_equality() {
        let mut session = past_setup();
        session.apply(Command::Draw); // pick 7♣

        // 5♥ is not a seven.
        let events = session.apply(Command::capture_match([CardId::new(3)]));
        assert_eq!(
            events,
            vec![Event::Rejected {
                reason: RejectReason::RankMismatch { rank: Rank::Seven }
            }]
        );

        // 7♥ is.
        let events = session.apply(Command::capture_match([CardId::new(2)]));
        assert_eq!(
            events,
            vec![Event::MatchCaptured {
                player: PlayerId::new(0),
                rank: Rank::Seven,
                count: 1,
            }]
        );
        assert_eq!(session.middle().len(), 2);
        assert!(session.captured_this_pick());
        assert_eq!(session.picked(), Some(card(5, Rank::Seven, Suit::Clubs)));
        assert_eq!(
            session.current_player().pile().last().copied(),
            Some(card(2, Rank::Seven, Suit::Hearts))
        );
    }

    #[test]
    fn test_capture_add_sums_to_picked_value() {
        let mut session = past_setup();
        session.apply(Command::Draw); // pick 7♣

        // 5 + 4 = 9, not 7.
        let events = session.apply(Command::capture_add([CardId::new(3), CardId::new(4)]));
        assert_eq!(
            events,
            vec![Event::Rejected {
                reason: RejectReason::SumMismatch { sum: 9, target: 7 }
            }]
        );

        // Bank the 7♣ via match first, then pick the 9♦ and ADD 5 + 4.
        session.apply(Command::capture_match([CardId::new(2)]));
        session.apply(Command::Draw); // banks 7♣, picks 9♦
        let events = session.apply(Command::capture_add([CardId::new(3), CardId::new(4)]));

        assert_eq!(
            events,
            vec![Event::AddCaptured {
                player: PlayerId::new(0),
                sum: 9,
                count: 2,
            }]
        );
        assert!(session.middle().is_empty());
        assert!(session.captured_this_pick());
        assert_eq!(session.picked(), Some(card(6, Rank::Nine, Suit::Diamonds)));
    }

    #[test]
    fn test_capture_add_rejects_face_pick() {
        let mut session = scripted(
            &["A"],
            &[
                card(0, Rank::Two, Suit::Spades),
                card(1, Rank::Five, Suit::Hearts),
                card(2, Rank::Five, Suit::Clubs),
                card(3, Rank::Two, Suit::Hearts),
                card(4, Rank::Queen, Suit::Spades),
            ],
        );
        for _ in 0..4 {
            session.apply(Command::Draw);
        }
        session.apply(Command::Draw); // pick Q♠

        let events = session.apply(Command::capture_add([CardId::new(1), CardId::new(2)]));

        assert_eq!(
            events,
            vec![Event::Rejected {
                reason: RejectReason::AddNeedsNumericPick
            }]
        );
    }

    #[test]
    fn test_toggle_select_tracks_middle_ids() {
        let mut session = past_setup();
        session.apply(Command::Draw);

        session.apply(Command::ToggleSelect {
            card: CardId::new(2),
        });
        assert!(session.is_selected(CardId::new(2)));

        session.apply(Command::ToggleSelect {
            card: CardId::new(2),
        });
        assert!(!session.is_selected(CardId::new(2)));

        let events = session.apply(Command::ToggleSelect {
            card: CardId::new(40),
        });
        assert_eq!(
            events,
            vec![Event::Rejected {
                reason: RejectReason::NotInMiddle
            }]
        );
    }

    #[test]
    fn test_end_turn_miss_returns_pick_to_middle() {
        let mut session = past_setup();
        session.apply(Command::Draw); // pick 7♣

        let middle_before = session.middle().len();
        let events = session.apply(Command::EndTurn);

        assert_eq!(
            events[0],
            Event::PickedReturned {
                player: PlayerId::new(0),
                card: card(5, Rank::Seven, Suit::Clubs),
            }
        );
        assert_eq!(
            events[1],
            Event::TurnPassed {
                next: PlayerId::new(1)
            }
        );
        assert_eq!(session.middle().len(), middle_before + 1);
        assert!(session.picked().is_none());
    }

    #[test]
    fn test_end_turn_without_pick_just_advances() {
        let mut session = past_setup();

        let events = session.apply(Command::EndTurn);

        assert_eq!(
            events,
            vec![Event::TurnPassed {
                next: PlayerId::new(1)
            }]
        );
    }

    #[test]
    fn test_clear_selection_is_idempotent() {
        let mut session = past_setup();
        session.apply(Command::Draw);
        session.apply(Command::ToggleSelect {
            card: CardId::new(2),
        });

        session.apply(Command::ClearSelection);
        let snapshot = serde_json::to_value(&session).unwrap();
        session.apply(Command::ClearSelection);

        assert!(session.selected().is_empty());
        assert_eq!(serde_json::to_value(&session).unwrap(), snapshot);
    }

    #[test]
    fn test_start_game_replaces_session() {
        let mut session = past_setup();

        let events = session.apply(Command::start_game(["New", "Game", "Trio"]));

        assert_eq!(events, vec![Event::GameStarted { players: 3 }]);
        assert_eq!(session.player_count(), 3);
        assert_eq!(session.phase(), Phase::SetupStarters);
        assert_eq!(session.card_count(), crate::cards::DECK_SIZE);
    }

    #[test]
    fn test_start_game_rejects_bad_player_count() {
        let mut session = past_setup();

        let events = session.apply(Command::start_game(Vec::<String>::new()));

        assert_eq!(
            events,
            vec![Event::Rejected {
                reason: RejectReason::InvalidPlayerCount { count: 0 }
            }]
        );
        assert_eq!(session.player_count(), 2);
    }
}
