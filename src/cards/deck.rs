//! The Circle: the shared draw pile.
//!
//! The deck is built and shuffled once per session and only ever consumed
//! from the top, with one exception: a joker drawn during setup is *buried*
//! (reinserted at a uniformly random position) so it cannot simply be drawn
//! again on the next attempt.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, Rank, Suit};
use crate::core::rng::GameRng;

/// Cards in a full deck: 52 standard + 2 jokers.
pub const DECK_SIZE: usize = 54;

/// Number of jokers in a full deck.
pub const JOKER_COUNT: usize = 2;

/// The shared draw pile. The top of the deck is the back of the vector.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build the full 54-card deck and shuffle it.
    ///
    /// Ids are allocated sequentially before the shuffle, so a given id
    /// always denotes the same rank/suit across sessions.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        let mut next_id = 0u32;

        for suit in Suit::ALL {
            for rank in Rank::STANDARD {
                cards.push(Card::standard(CardId::new(next_id), rank, suit));
                next_id += 1;
            }
        }
        for _ in 0..JOKER_COUNT {
            cards.push(Card::joker(CardId::new(next_id)));
            next_id += 1;
        }

        rng.shuffle(&mut cards);
        Self { cards }
    }

    /// Build a deck with an explicit order.
    ///
    /// The last card of `cards` is the top of the deck (drawn first). Used
    /// by scripted scenarios and tests; ids must be unique.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Draw the top card, or `None` if the deck is empty.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Reinsert a card at a uniformly random position.
    ///
    /// The insertion index ranges over `0..=len`, so the buried card can land
    /// anywhere including back on top.
    pub fn bury(&mut self, card: Card, rng: &mut GameRng) {
        let index = rng.insert_index(self.cards.len());
        self.cards.insert(index, card);
    }

    /// Number of cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the deck empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remaining cards, bottom first. The last element is the next draw.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
