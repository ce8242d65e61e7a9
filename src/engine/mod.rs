//! The game engine: session state, command application, events, and the
//! final outcome.
//!
//! ## Key Types
//!
//! - `Session`: The single mutable record one game lives in
//! - `Phase`: Monotonic phase machine (setup → play → ended)
//! - `Event` / `EventLog`: What happened, as data, with advisory text
//! - `GameResult`: Winner or declared tie
//!
//! All mutation goes through `Session::apply` (see the `rules` module).

pub mod events;
pub mod outcome;
pub mod rules;
pub mod session;

pub use events::{Event, EventLog, RejectReason};
pub use outcome::{decide, standings, GameResult, Standing};
pub use session::{Location, Phase, Session};
