//! The engine's event stream.
//!
//! Every `apply` returns the events its command produced; the caller appends
//! them to an [`EventLog`] it owns. Invalid commands never fail: they
//! produce an [`Event::Rejected`] advisory and leave the session untouched.
//!
//! `Display` renders each event as the human-readable line a game log would
//! show. Player names are not embedded; presentations that want display
//! names resolve the `PlayerId` against the session.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::outcome::GameResult;
use crate::cards::{Card, Rank};
use crate::core::player::PlayerId;

/// Something that happened inside the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    GameStarted {
        players: usize,
    },
    /// A setup starter was dealt and auto-banked.
    StarterDealt {
        player: PlayerId,
        card: Card,
    },
    /// A joker surfaced during setup and was buried back into the Circle.
    /// `player` is set while dealing starters, `None` while seeding.
    JokerBuried {
        player: Option<PlayerId>,
    },
    MiddleSeeded {
        card: Card,
        count: usize,
        target: usize,
    },
    PlayStarted {
        first: PlayerId,
    },
    CardPicked {
        player: PlayerId,
        card: Card,
    },
    /// The picked card moved into the acting player's pile.
    PickedBanked {
        player: PlayerId,
        card: Card,
    },
    MatchCaptured {
        player: PlayerId,
        rank: Rank,
        count: usize,
    },
    AddCaptured {
        player: PlayerId,
        sum: u32,
        count: usize,
    },
    /// A drawn joker swept the middle and every other pile.
    JokerSwept {
        player: PlayerId,
        middle_taken: usize,
        piles_taken: usize,
    },
    /// An unplayed picked card was released to the middle.
    PickedReturned {
        player: PlayerId,
        card: Card,
    },
    TurnPassed {
        next: PlayerId,
    },
    /// The last picker collected the middle at end of game.
    MiddleCollected {
        player: PlayerId,
        count: usize,
    },
    GameOver {
        result: GameResult,
    },
    /// A command was rejected; the session is unchanged.
    Rejected {
        reason: RejectReason,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::GameStarted { players } => {
                write!(f, "New game started. {players} players.")
            }
            Event::StarterDealt { player, card } => {
                write!(f, "{player} starter card: {card} (auto-banked).")
            }
            Event::JokerBuried { player: Some(player) } => write!(
                f,
                "{player} drew a JOKER during setup — it goes back into the Circle randomly. Draw again."
            ),
            Event::JokerBuried { player: None } => write!(
                f,
                "Setup: drew a JOKER while seeding — it goes back into the Circle randomly. Draw again."
            ),
            Event::MiddleSeeded { card, count, target } => {
                write!(f, "Setup: Middle seeded with {card} ({count}/{target}).")
            }
            Event::PlayStarted { first } => {
                write!(f, "Play begins. {first} goes first.")
            }
            Event::CardPicked { player, card } => {
                write!(f, "{player} picked {card}.")
            }
            Event::PickedBanked { player, card } => {
                write!(f, "{player} banks picked card {card}.")
            }
            Event::MatchCaptured { player, rank, count } => {
                write!(f, "{player} MATCH captured {count} Middle card(s) of rank {rank}.")
            }
            Event::AddCaptured { player, sum, count } => {
                write!(f, "{player} ADD captured {count} Middle card(s) (sum {sum}).")
            }
            Event::JokerSwept {
                player,
                middle_taken,
                piles_taken,
            } => write!(
                f,
                "{player} drew a JOKER and collects {piles_taken} card(s) from other players + {middle_taken} Middle card(s) + the Joker."
            ),
            Event::PickedReturned { player, card } => {
                write!(f, "{player} ends turn — unplayed picked card {card} goes to the Middle.")
            }
            Event::TurnPassed { next } => write!(f, "{next} to play."),
            Event::MiddleCollected { player, count } => write!(
                f,
                "{player} picked the last Circle card and collects the remaining {count} Middle card(s)."
            ),
            Event::GameOver { result } => write!(f, "Game over. {result}."),
            Event::Rejected { reason } => write!(f, "{reason}"),
        }
    }
}

/// Why a command was rejected.
///
/// Rejections are advisory: the session does not change and nothing is
/// thrown. `Display` gives the message a game log would show the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// The game has ended; only starting a new game is meaningful.
    GameOver,
    /// The command applies only during the play phase.
    WrongPhase,
    /// Drawing is blocked while an uncaptured picked card is pending.
    PickPending,
    /// A selection or capture needs an active picked card.
    NoPickedCard,
    /// MATCH needs at least one selected middle card.
    NoSelection,
    /// A selected card's rank differs from the picked rank.
    RankMismatch { rank: Rank },
    /// ADD needs a numeric (ace–ten) picked card.
    AddNeedsNumericPick,
    /// ADD needs at least two selected middle cards.
    AddNeedsTwoCards,
    /// The selected cards' values do not sum to the picked value.
    SumMismatch { sum: u32, target: u32 },
    /// The toggled card id is not in the middle.
    NotInMiddle,
    /// StartGame was given an unsupported number of players.
    InvalidPlayerCount { count: usize },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::GameOver => {
                write!(f, "Game over. Start a new game to play again.")
            }
            RejectReason::WrongPhase => {
                write!(f, "That action is only available during play.")
            }
            RejectReason::PickPending => write!(
                f,
                "Capture with the picked card or end the turn before drawing again."
            ),
            RejectReason::NoPickedCard => {
                write!(f, "Draw a card from the Circle first.")
            }
            RejectReason::NoSelection => {
                write!(f, "Select at least 1 Middle card for MATCH.")
            }
            RejectReason::RankMismatch { rank } => write!(
                f,
                "MATCH failed. Selected cards must all match the picked rank ({rank})."
            ),
            RejectReason::AddNeedsNumericPick => {
                write!(f, "ADD only works when the picked card is A or 2-10.")
            }
            RejectReason::AddNeedsTwoCards => {
                write!(f, "Select 2 or more Middle cards to ADD.")
            }
            RejectReason::SumMismatch { sum, target } => {
                write!(f, "ADD failed. Selected sum is {sum} but picked is {target}.")
            }
            RejectReason::NotInMiddle => {
                write!(f, "That card is not in the Middle.")
            }
            RejectReason::InvalidPlayerCount { count } => {
                write!(f, "A game needs 1 to 8 players, not {count}.")
            }
        }
    }
}

/// Append-only event log.
///
/// Backed by a persistent vector so snapshots of the log are cheap. Events
/// are stored oldest first; [`EventLog::newest_first`] gives the reversed
/// view a log panel usually renders.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vector<Event>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event.
    pub fn record(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Append a batch of events in order.
    pub fn record_all(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.events.push_back(event);
        }
    }

    /// Events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Events, newest first.
    pub fn newest_first(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().rev()
    }

    /// The most recent event, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&Event> {
        self.events.last()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Is the log empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
