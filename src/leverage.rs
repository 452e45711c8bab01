//! What-if analysis for remaining games.
//!
//! Each remaining game is forced to a win and to a loss and the season is
//! re-evaluated exactly, showing how much the game moves the projection.

use rayon::prelude::*;
use serde::Serialize;

use crate::constants::BOWL_ELIGIBLE_WINS;
use crate::error::{Result, SimError};
use crate::game::{GameRecord, RemainingGame, SeasonState};
use crate::simulator::{poisson_binomial, SeasonWinSimulator};

/// Projection swing for one remaining game.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameLeverage {
    pub index: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub opponent: Option<String>,

    pub win_probability: f64,

    pub expected_wins_if_win: f64,

    pub expected_wins_if_loss: f64,

    /// P(at least BOWL_ELIGIBLE_WINS) with this game won
    pub bowl_prob_if_win: f64,

    pub bowl_prob_if_loss: f64,
}

impl GameLeverage {
    pub fn expected_wins_delta(&self) -> f64 {
        self.expected_wins_if_win - self.expected_wins_if_loss
    }

    pub fn bowl_prob_delta(&self) -> f64 {
        self.bowl_prob_if_win - self.bowl_prob_if_loss
    }
}

/// Leverage of remaining game `index`.
pub fn game_leverage(
    sim: &SeasonWinSimulator,
    games: &[GameRecord],
    index: usize,
) -> Result<GameLeverage> {
    if index >= games.len() {
        return Err(SimError::IndexOutOfRange {
            index,
            len: games.len(),
        });
    }
    if games[index].is_completed {
        return Err(SimError::NotRemaining { index });
    }

    let state = SeasonState::from_records(games, sim.config())?;
    let game = state
        .remaining()
        .iter()
        .find(|g| g.index == index)
        .ok_or(SimError::NotRemaining { index })?;
    leverage_for(games, &state, game)
}

/// Works from the already validated `state` so records are resolved once.
/// The forced seasons are evaluated over their full reachable range, never
/// clamped to the configured domain.
fn leverage_for(
    games: &[GameRecord],
    state: &SeasonState,
    game: &RemainingGame,
) -> Result<GameLeverage> {
    let forced = |won: bool| {
        state
            .with_forced_outcome(game.index, won)
            .map(|season| poisson_binomial(&season, season.max_possible_wins()))
            .ok_or(SimError::NotRemaining { index: game.index })
    };
    let win = forced(true)?;
    let loss = forced(false)?;

    Ok(GameLeverage {
        index: game.index,
        opponent: games[game.index].opponent.clone(),
        win_probability: game.win_probability,
        expected_wins_if_win: win.expected_wins(),
        expected_wins_if_loss: loss.expected_wins(),
        bowl_prob_if_win: win.prob_at_least(BOWL_ELIGIBLE_WINS),
        bowl_prob_if_loss: loss.prob_at_least(BOWL_ELIGIBLE_WINS),
    })
}

/// Leverage of every remaining game, in schedule order.
///
/// Uses parallel processing across games.
pub fn all_game_leverage(
    sim: &SeasonWinSimulator,
    games: &[GameRecord],
) -> Result<Vec<GameLeverage>> {
    let state = SeasonState::from_records(games, sim.config())?;

    state
        .remaining()
        .par_iter()
        .map(|g| leverage_for(games, &state, g))
        .collect()
}
