use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::SimConfig;
use crate::distribution::WinDistribution;
use crate::error::Result;
use crate::game::{GameRecord, SeasonState};

/// Seeded stream when `seed` is given, entropy otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Projects the distribution of final regular-season wins for one team.
///
/// Completed games contribute a fixed win count; each remaining game is an
/// independent Bernoulli trial with its win probability. The simulator holds
/// only configuration, so one instance can serve any number of teams and
/// threads.
#[derive(Clone, Debug)]
pub struct SeasonWinSimulator {
    config: SimConfig,
}

impl SeasonWinSimulator {
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(SeasonWinSimulator { config })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Monte Carlo estimate using the configured seed (or entropy).
    pub fn simulate(&self, games: &[GameRecord]) -> Result<WinDistribution> {
        let mut rng = rng_from_seed(self.config.seed);
        self.simulate_with_rng(games, &mut rng)
    }

    /// Monte Carlo estimate drawing from the caller's random source.
    pub fn simulate_with_rng<R: Rng>(
        &self,
        games: &[GameRecord],
        rng: &mut R,
    ) -> Result<WinDistribution> {
        let state = SeasonState::from_records(games, &self.config)?;
        Ok(self.simulate_state(&state, rng))
    }

    /// Monte Carlo estimate for an already validated season.
    pub fn simulate_state<R: Rng>(&self, state: &SeasonState, rng: &mut R) -> WinDistribution {
        let max_wins = self.config.domain.max_wins(state.n_games());

        if state.is_decided() {
            return WinDistribution::degenerate(state.current_wins(), max_wins);
        }

        let samples = self.config.sample_count;
        let mut counts = vec![0u64; max_wins as usize + 1];
        let mut clamped = 0u64;

        for _ in 0..samples {
            let mut wins = state.current_wins();
            for game in state.remaining() {
                if rng.gen::<f64>() < game.win_probability {
                    wins += 1;
                }
            }
            if wins > max_wins {
                clamped += 1;
                wins = max_wins;
            }
            counts[wins as usize] += 1;
        }

        debug!(
            current_wins = state.current_wins(),
            remaining = state.remaining().len(),
            samples,
            clamped,
            "simulated season"
        );

        WinDistribution::from_counts(&counts, samples as u64)
    }

    /// Exact Poisson-binomial distribution of the final win total.
    pub fn exact(&self, games: &[GameRecord]) -> Result<WinDistribution> {
        let state = SeasonState::from_records(games, &self.config)?;
        Ok(self.exact_state(&state))
    }

    pub fn exact_state(&self, state: &SeasonState) -> WinDistribution {
        let max_wins = self.config.domain.max_wins(state.n_games());
        poisson_binomial(state, max_wins)
    }
}

/// Exact distribution over `0..=max_wins`, totals above `max_wins` clamped
/// into the top bucket.
pub(crate) fn poisson_binomial(state: &SeasonState, max_wins: u32) -> WinDistribution {
    if state.is_decided() {
        return WinDistribution::degenerate(state.current_wins(), max_wins);
    }

    // successes[k] = P(k of the games processed so far are won)
    let mut successes = vec![0.0; state.remaining().len() + 1];
    successes[0] = 1.0;
    for (played, game) in state.remaining().iter().enumerate() {
        let p = game.win_probability;
        for k in (0..=played + 1).rev() {
            let lose = successes[k] * (1.0 - p);
            let win = if k > 0 { successes[k - 1] * p } else { 0.0 };
            successes[k] = lose + win;
        }
    }

    let mut probabilities = vec![0.0; max_wins as usize + 1];
    for (k, p) in successes.into_iter().enumerate() {
        let wins = (state.current_wins() + k as u32).min(max_wins);
        probabilities[wins as usize] += p;
    }

    WinDistribution::from_probabilities(probabilities)
}

impl Default for SeasonWinSimulator {
    fn default() -> Self {
        SeasonWinSimulator {
            config: SimConfig::default(),
        }
    }
}
