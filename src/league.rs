use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use crate::distribution::WinDistribution;
use crate::error::Result;
use crate::game::GameRecord;
use crate::simulator::{rng_from_seed, SeasonWinSimulator};

/// One team's simulated season.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TeamProjection {
    pub team: String,
    pub distribution: WinDistribution,
}

/// Simulate many teams in parallel.
///
/// Each team gets its own stream, seeded from a master stream in input
/// order, so a fixed `seed` reproduces the same projections regardless of
/// how the work is scheduled. Output order matches input order.
pub fn simulate_league(
    sim: &SeasonWinSimulator,
    seasons: &[(String, Vec<GameRecord>)],
    seed: Option<u64>,
) -> Result<Vec<TeamProjection>> {
    let mut master = rng_from_seed(seed);
    let team_seeds: Vec<u64> = seasons.iter().map(|_| master.gen::<u64>()).collect();

    seasons
        .par_iter()
        .zip(team_seeds.par_iter())
        .map(|((team, games), &team_seed)| {
            let mut rng = ChaCha8Rng::seed_from_u64(team_seed);
            let distribution = sim.simulate_with_rng(games, &mut rng)?;
            Ok(TeamProjection {
                team: team.clone(),
                distribution,
            })
        })
        .collect()
}
