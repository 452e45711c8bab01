use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{ProbabilityPolicy, SimConfig};
use crate::error::{Result, SimError};

/// One scheduled regular-season game from a single team's point of view.
///
/// `is_win` is only meaningful for completed games and `win_probability`
/// only for games still to be played.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub is_completed: bool,

    #[serde(default)]
    pub is_win: Option<bool>,

    /// Estimated chance of winning a future game; `None` if unknown
    #[serde(default)]
    pub win_probability: Option<f64>,

    /// Display label only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent: Option<String>,
}

impl GameRecord {
    /// A finished game.
    pub fn completed(won: bool) -> Self {
        GameRecord {
            is_completed: true,
            is_win: Some(won),
            win_probability: None,
            opponent: None,
        }
    }

    /// A game still to be played.
    pub fn remaining(win_probability: Option<f64>) -> Self {
        GameRecord {
            is_completed: false,
            is_win: None,
            win_probability,
            opponent: None,
        }
    }

    /// Build a record from final scores as stored in the game table.
    ///
    /// The game counts as completed only when both scores are known, and as a
    /// win only when the team outscored the opponent.
    pub fn from_scores(
        team_points: Option<u32>,
        opponent_points: Option<u32>,
        win_probability: Option<f64>,
    ) -> Self {
        match (team_points, opponent_points) {
            (Some(ours), Some(theirs)) => GameRecord::completed(ours > theirs),
            _ => GameRecord::remaining(win_probability),
        }
    }

    pub fn with_opponent(mut self, opponent: impl Into<String>) -> Self {
        self.opponent = Some(opponent.into());
        self
    }
}

/// `(is_completed, is_win, win_probability)`, the row shape the dashboard's
/// game query produces.
impl From<(bool, Option<bool>, Option<f64>)> for GameRecord {
    fn from((is_completed, is_win, win_probability): (bool, Option<bool>, Option<f64>)) -> Self {
        GameRecord {
            is_completed,
            is_win,
            win_probability,
            opponent: None,
        }
    }
}

/// A validated remaining game.
#[derive(Clone, Debug, PartialEq)]
pub struct RemainingGame {
    /// Position in the caller's record slice
    pub index: usize,
    pub win_probability: f64,
}

/// Game records reduced to what the projection needs: the locked-in win
/// count and the resolved probability of every remaining game.
///
/// Only [`SeasonState::from_records`] builds one, so every probability it
/// holds is finite and within [0, 1].
///
/// ```compile_fail
/// use season_core::{RemainingGame, SeasonState};
///
/// let state = SeasonState {
///     current_wins: 0,
///     remaining: vec![RemainingGame { index: 0, win_probability: 1.7 }],
///     n_games: 1,
/// };
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SeasonState {
    current_wins: u32,
    remaining: Vec<RemainingGame>,
    n_games: usize,
}

impl SeasonState {
    /// Validate records and resolve remaining-game probabilities.
    ///
    /// Any contradictory record rejects the whole batch.
    pub fn from_records(games: &[GameRecord], config: &SimConfig) -> Result<Self> {
        let mut current_wins = 0u32;
        let mut remaining = Vec::new();

        for (index, game) in games.iter().enumerate() {
            if game.is_completed {
                match game.is_win {
                    Some(true) => current_wins += 1,
                    Some(false) => {}
                    None => {
                        return Err(SimError::InvalidRecord {
                            index,
                            reason: "completed game has no win/loss outcome".to_string(),
                        })
                    }
                }
            } else {
                if game.is_win == Some(true) {
                    return Err(SimError::InvalidRecord {
                        index,
                        reason: "game marked as a win but not completed".to_string(),
                    });
                }
                let win_probability = resolve_probability(index, game, config)?;
                remaining.push(RemainingGame {
                    index,
                    win_probability,
                });
            }
        }

        Ok(SeasonState {
            current_wins,
            remaining,
            n_games: games.len(),
        })
    }

    pub fn current_wins(&self) -> u32 {
        self.current_wins
    }

    pub fn remaining(&self) -> &[RemainingGame] {
        &self.remaining
    }

    /// Games on the schedule, completed or not.
    pub fn n_games(&self) -> usize {
        self.n_games
    }

    /// Same season with remaining game `index` settled as a win or a loss.
    ///
    /// `None` if `index` is not a remaining game.
    pub(crate) fn with_forced_outcome(&self, index: usize, won: bool) -> Option<SeasonState> {
        let pos = self.remaining.iter().position(|g| g.index == index)?;
        let mut remaining = self.remaining.clone();
        remaining.remove(pos);
        Some(SeasonState {
            current_wins: self.current_wins + u32::from(won),
            remaining,
            n_games: self.n_games,
        })
    }

    /// Highest reachable win total.
    pub fn max_possible_wins(&self) -> u32 {
        self.current_wins + self.remaining.len() as u32
    }

    pub fn is_decided(&self) -> bool {
        self.remaining.is_empty()
    }
}

fn resolve_probability(index: usize, game: &GameRecord, config: &SimConfig) -> Result<f64> {
    let p = match game.win_probability {
        Some(p) => p,
        None => return Ok(config.default_unknown_probability),
    };

    if !p.is_finite() {
        return Err(SimError::InvalidRecord {
            index,
            reason: format!("win probability is not a finite number ({})", p),
        });
    }

    if (0.0..=1.0).contains(&p) {
        return Ok(p);
    }

    match config.probability_policy {
        ProbabilityPolicy::Clamp => {
            let clamped = p.clamp(0.0, 1.0);
            warn!(
                index,
                opponent = game.opponent.as_deref().unwrap_or("unknown"),
                original = p,
                clamped,
                "win probability outside [0, 1], clamping"
            );
            Ok(clamped)
        }
        ProbabilityPolicy::Reject => Err(SimError::InvalidRecord {
            index,
            reason: format!("win probability {} outside [0, 1]", p),
        }),
    }
}
