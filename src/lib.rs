//! Season Core - regular-season win projections for college football teams.
//!
//! Combines a team's completed results with win probabilities for its
//! remaining games to produce a distribution over final win totals, by Monte
//! Carlo simulation or exactly. Python bindings are available behind the
//! `python` feature.

pub mod config;
pub mod constants;
pub mod distribution;
pub mod error;
pub mod game;
pub mod league;
pub mod leverage;
pub mod simulator;
pub mod win_prob;

#[cfg(feature = "python")]
mod python;

pub use config::{DomainBound, ProbabilityPolicy, SimConfig};
pub use constants::{
    BOWL_ELIGIBLE_WINS, DEFAULT_MAX_WINS, DEFAULT_SAMPLE_COUNT, DEFAULT_UNKNOWN_PROBABILITY,
    MAX_DOMAIN_WINS, SPREAD_STDDEV,
};
pub use distribution::WinDistribution;
pub use error::{Result, SimError};
pub use game::{GameRecord, RemainingGame, SeasonState};
pub use league::{simulate_league, TeamProjection};
pub use leverage::{all_game_leverage, game_leverage, GameLeverage};
pub use simulator::{rng_from_seed, SeasonWinSimulator};
pub use win_prob::{spread_from_win_prob, win_prob_from_spread};
