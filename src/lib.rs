//! # injera-be-wat
//!
//! Rules engine for Injera Be Wat, a turn-based card-matching game: a shared
//! draw pile (the "Circle"), a shared face-up "Middle" pool, per-player
//! capture piles, and a setup → play → end turn cycle.
//!
//! ## Design Principles
//!
//! 1. **One state, one entry point**: A [`Session`] owns every card and all
//!    bookkeeping. The only way to mutate it is [`Session::apply`], which
//!    takes a [`Command`] and returns the [`Event`]s it produced.
//!
//! 2. **Invalid means advisory, never fatal**: Commands that break the rules
//!    are rejected as no-ops with an [`Event::Rejected`] advisory. Nothing in
//!    the engine throws during play.
//!
//! 3. **Deterministic given the seed**: Shuffling and joker burial draw from
//!    a single seeded RNG owned by the session, so a whole game replays from
//!    its seed and command sequence.
//!
//! ## Modules
//!
//! - `cards`: Card identity, the two valuations, and the deck
//! - `core`: Players, configuration, commands, RNG
//! - `engine`: The session state machine, events, and outcome
//!
//! ## Example
//!
//! ```
//! use injera_be_wat::{Command, EventLog, GameConfig, Phase, Session};
//!
//! let config = GameConfig::new(["Abel", "Bethel"]);
//! let mut session = Session::new(&config, 42);
//! let mut log = EventLog::new();
//!
//! // Setup: two starters, then seed the middle to its target of 3.
//! while session.phase() < Phase::Play {
//!     log.record_all(session.apply(Command::Draw));
//! }
//!
//! assert_eq!(session.middle().len(), 3);
//! assert_eq!(session.card_count(), 54);
//! ```

pub mod cards;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::cards::{Card, CardId, CardKind, Deck, Rank, Suit, DECK_SIZE};

pub use crate::core::{
    Command, GameConfig, GameRng, Player, PlayerId, Selection, DEFAULT_MIDDLE_TARGET, MAX_PLAYERS,
};

pub use crate::engine::{
    Event, EventLog, GameResult, Location, Phase, RejectReason, Session, Standing,
};
