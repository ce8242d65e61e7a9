//! End-of-game scoring and result declaration.

use serde::{Deserialize, Serialize};

use crate::core::player::{Player, PlayerId};

/// One row of the final scoreboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub points: u32,
}

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// A single player holds the strictly highest point total.
    Winner { player: PlayerId, points: u32 },
    /// Two or more players share the highest point total.
    Tie { players: Vec<PlayerId>, points: u32 },
}

impl GameResult {
    /// Check if a player won (or shares a tie).
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner { player: p, .. } => *p == player,
            GameResult::Tie { players, .. } => players.contains(&player),
        }
    }

    /// The winning point total.
    #[must_use]
    pub fn points(&self) -> u32 {
        match self {
            GameResult::Winner { points, .. } | GameResult::Tie { points, .. } => *points,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner { player, points } => {
                write!(f, "Winner is {player} with {points} points")
            }
            GameResult::Tie { players, points } => {
                write!(f, "Tie at {points} points between ")?;
                for (i, p) in players.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{p}")?;
                }
                Ok(())
            }
        }
    }
}

/// Compute the scoreboard, highest points first.
///
/// Players with equal points keep their seating order.
#[must_use]
pub fn standings(players: &[Player]) -> Vec<Standing> {
    let mut rows: Vec<Standing> = players
        .iter()
        .enumerate()
        .map(|(i, p)| Standing {
            player: PlayerId::new(i as u8),
            points: p.points(),
        })
        .collect();
    rows.sort_by(|a, b| b.points.cmp(&a.points));
    rows
}

/// Decide the game result from a scoreboard.
///
/// Every player sharing the maximum is part of a declared tie; otherwise the
/// single top scorer wins. Panics on an empty scoreboard.
#[must_use]
pub fn decide(standings: &[Standing]) -> GameResult {
    let top = standings[0];
    let tied: Vec<PlayerId> = standings
        .iter()
        .take_while(|s| s.points == top.points)
        .map(|s| s.player)
        .collect();

    if tied.len() > 1 {
        GameResult::Tie {
            players: tied,
            points: top.points,
        }
    } else {
        GameResult::Winner {
            player: top.player,
            points: top.points,
        }
    }
}
