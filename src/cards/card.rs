//! Card identity and valuation.
//!
//! Cards are immutable once created. Each carries a session-unique `CardId`
//! used for set membership and UI correlation only; game rules never branch
//! on the id.
//!
//! ## Two valuations
//!
//! A card has two distinct numeric meanings that must not be conflated:
//!
//! - [`Card::add_value`]: the value used by the ADD capture rule
//!   (Ace = 1, numeric = face value, face card = 10, joker = 1).
//! - [`Card::score_value`]: the value used for end-of-game scoring
//!   (joker = 1, face card = 10, every numeric card = 1).
//!
//! The Ace counting 1 in both is intentional game design, not a collapsed
//! special case.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a card within a session.
///
/// Ids are allocated sequentially when the deck is built. They carry no
/// game meaning beyond identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// One of the four standard suits. Jokers have no suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    /// All four suits, in deck-building order.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
        };
        write!(f, "{symbol}")
    }
}

/// Card rank. `Joker` is a rank of its own so that rank equality is the
/// complete MATCH test: two cards match iff their ranks are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Joker,
}

impl Rank {
    /// The thirteen standard ranks, ace first.
    pub const STANDARD: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Which of the three kinds this rank belongs to.
    #[must_use]
    pub const fn kind(self) -> CardKind {
        match self {
            Rank::Joker => CardKind::Joker,
            Rank::Jack | Rank::Queen | Rank::King => CardKind::Face,
            _ => CardKind::Numeric,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Joker => "JOKER",
        };
        write!(f, "{label}")
    }
}

/// Coarse card classification used by the capture and scoring rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Ace through ten.
    Numeric,
    /// Jack, queen, king.
    Face,
    Joker,
}

/// A single card. Immutable once created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub rank: Rank,
    /// `None` for jokers.
    pub suit: Option<Suit>,
}

impl Card {
    /// Create a standard (non-joker) card.
    #[must_use]
    pub fn standard(id: CardId, rank: Rank, suit: Suit) -> Self {
        debug_assert!(rank != Rank::Joker, "jokers have no suit");
        Self {
            id,
            rank,
            suit: Some(suit),
        }
    }

    /// Create a joker.
    #[must_use]
    pub fn joker(id: CardId) -> Self {
        Self {
            id,
            rank: Rank::Joker,
            suit: None,
        }
    }

    /// Which of the three kinds this card is.
    #[must_use]
    pub fn kind(&self) -> CardKind {
        self.rank.kind()
    }

    /// Is this a joker?
    #[must_use]
    pub fn is_joker(&self) -> bool {
        self.rank == Rank::Joker
    }

    /// Is this card valid as the picked card of an ADD capture (ace–ten)?
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.kind() == CardKind::Numeric
    }

    /// Value of this card in ADD arithmetic.
    ///
    /// Ace = 1, numeric = face value, face card = 10, joker = 1. Jokers are
    /// not expected in the middle during normal play, but the rule is total.
    #[must_use]
    pub fn add_value(&self) -> u32 {
        match self.rank {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Joker => 1,
        }
    }

    /// Point value of this card at end-of-game scoring.
    ///
    /// Joker = 1, face card = 10, every numeric card (ace included) = 1.
    #[must_use]
    pub fn score_value(&self) -> u32 {
        match self.kind() {
            CardKind::Joker => 1,
            CardKind::Face => 10,
            CardKind::Numeric => 1,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suit {
            Some(suit) => write!(f, "{}{}", self.rank, suit),
            None => write!(f, "{}", self.rank),
        }
    }
}
