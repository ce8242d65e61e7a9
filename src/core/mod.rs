//! Core building blocks: players, configuration, commands, RNG.

pub mod command;
pub mod config;
pub mod player;
pub mod rng;

pub use command::{Command, Selection};
pub use config::{GameConfig, DEFAULT_MIDDLE_TARGET, MAX_PLAYERS};
pub use player::{Player, PlayerId};
pub use rng::GameRng;
