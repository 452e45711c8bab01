//! Python bindings used by the dashboard.
//!
//! Games cross the boundary as `(is_completed, is_win, win_probability)`
//! tuples and distributions come back as `(wins, probability)` rows.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::SimConfig;
use crate::constants::{
    BOWL_ELIGIBLE_WINS, DEFAULT_MAX_WINS, DEFAULT_SAMPLE_COUNT, DEFAULT_UNKNOWN_PROBABILITY,
    SPREAD_STDDEV,
};
use crate::error::SimError;
use crate::game::GameRecord;
use crate::simulator::SeasonWinSimulator;

type PyGame = (bool, Option<bool>, Option<f64>);

fn to_records(games: Vec<PyGame>) -> Vec<GameRecord> {
    games.into_iter().map(GameRecord::from).collect()
}

fn to_py_err(err: SimError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn build_simulator(
    sample_count: usize,
    seed: Option<u64>,
    default_unknown_probability: f64,
) -> PyResult<SeasonWinSimulator> {
    let config = SimConfig::default()
        .with_sample_count(sample_count)
        .with_seed_opt(seed)
        .with_default_unknown_probability(default_unknown_probability);
    SeasonWinSimulator::new(config).map_err(to_py_err)
}

/// Monte Carlo win distribution for one team's regular season.
#[pyfunction]
#[pyo3(signature = (games, sample_count = DEFAULT_SAMPLE_COUNT, seed = None, default_unknown_probability = DEFAULT_UNKNOWN_PROBABILITY))]
fn simulate_win_distribution(
    games: Vec<PyGame>,
    sample_count: usize,
    seed: Option<u64>,
    default_unknown_probability: f64,
) -> PyResult<Vec<(u32, f64)>> {
    let sim = build_simulator(sample_count, seed, default_unknown_probability)?;
    let dist = sim.simulate(&to_records(games)).map_err(to_py_err)?;
    Ok(dist.to_table())
}

/// Exact win distribution for one team's regular season.
#[pyfunction]
#[pyo3(signature = (games, default_unknown_probability = DEFAULT_UNKNOWN_PROBABILITY))]
fn exact_win_distribution(
    games: Vec<PyGame>,
    default_unknown_probability: f64,
) -> PyResult<Vec<(u32, f64)>> {
    let sim = build_simulator(DEFAULT_SAMPLE_COUNT, None, default_unknown_probability)?;
    let dist = sim.exact(&to_records(games)).map_err(to_py_err)?;
    Ok(dist.to_table())
}

#[pyfunction]
#[pyo3(signature = (expected_margin, stddev = SPREAD_STDDEV))]
fn win_prob_from_spread(expected_margin: f64, stddev: f64) -> PyResult<f64> {
    crate::win_prob::win_prob_from_spread(expected_margin, stddev).map_err(to_py_err)
}

/// Python module definition
#[pymodule]
fn season_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(simulate_win_distribution, m)?)?;
    m.add_function(wrap_pyfunction!(exact_win_distribution, m)?)?;
    m.add_function(wrap_pyfunction!(win_prob_from_spread, m)?)?;

    // Constants
    m.add("DEFAULT_SAMPLE_COUNT", DEFAULT_SAMPLE_COUNT)?;
    m.add("DEFAULT_MAX_WINS", DEFAULT_MAX_WINS)?;
    m.add("DEFAULT_UNKNOWN_PROBABILITY", DEFAULT_UNKNOWN_PROBABILITY)?;
    m.add("BOWL_ELIGIBLE_WINS", BOWL_ELIGIBLE_WINS)?;
    m.add("SPREAD_STDDEV", SPREAD_STDDEV)?;

    Ok(())
}
