//! Card model: identity, valuation, and the shared draw pile.
//!
//! ## Key Types
//!
//! - `CardId`: Session-unique card identifier (set membership and UI
//!   correlation only)
//! - `Card`, `Rank`, `Suit`, `CardKind`: Immutable card identity with the
//!   two distinct valuations (ADD arithmetic vs end-of-game scoring)
//! - `Deck`: The Circle, built and shuffled once, drawn from the top, with
//!   random-position burial for disallowed joker draws

pub mod card;
pub mod deck;

pub use card::{Card, CardId, CardKind, Rank, Suit};
pub use deck::{Deck, DECK_SIZE, JOKER_COUNT};
