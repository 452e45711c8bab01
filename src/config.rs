//! Simulation settings.
//!
//! Values come from compiled defaults, a JSON document handed over by the
//! dashboard, or `SEASON_SIM_*` environment variables (a `.env` file is
//! honoured). Every path ends in [`SimConfig::validate`].

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_MAX_WINS, DEFAULT_SAMPLE_COUNT, DEFAULT_UNKNOWN_PROBABILITY, MAX_DOMAIN_WINS,
};
use crate::error::{Result, SimError};

/// Upper end of the reported win domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainBound {
    /// Report `0..=n`; totals above `n` are clamped into the top bucket.
    Fixed(u32),
    /// Report `0..=max(DEFAULT_MAX_WINS, games in schedule)`.
    FromSchedule,
}

impl DomainBound {
    /// Top bucket for a schedule of `n_games` games.
    pub fn max_wins(&self, n_games: usize) -> u32 {
        match *self {
            DomainBound::Fixed(max) => max,
            DomainBound::FromSchedule => DEFAULT_MAX_WINS.max(n_games as u32),
        }
    }
}

impl Default for DomainBound {
    fn default() -> Self {
        DomainBound::Fixed(DEFAULT_MAX_WINS)
    }
}

/// What to do with a win probability outside [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityPolicy {
    /// Clamp into [0, 1] and log a warning.
    #[default]
    Clamp,
    /// Fail the whole batch.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Monte Carlo draws per simulation
    pub sample_count: usize,

    /// Probability used for a remaining game with no estimate
    pub default_unknown_probability: f64,

    pub domain: DomainBound,

    pub probability_policy: ProbabilityPolicy,

    /// Fixed seed for reproducible runs; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            sample_count: DEFAULT_SAMPLE_COUNT,
            default_unknown_probability: DEFAULT_UNKNOWN_PROBABILITY,
            domain: DomainBound::default(),
            probability_policy: ProbabilityPolicy::default(),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Build a config from `SEASON_SIM_*` environment variables on top of
    /// the defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = SimConfig::default();
        if let Some(samples) = env_parse::<usize>("SEASON_SIM_SAMPLES")? {
            config.sample_count = samples;
        }
        if let Some(seed) = env_parse::<u64>("SEASON_SIM_SEED")? {
            config.seed = Some(seed);
        }
        if let Some(max_wins) = env_parse::<u32>("SEASON_SIM_MAX_WINS")? {
            config.domain = DomainBound::Fixed(max_wins);
        }
        if let Some(prob) = env_parse::<f64>("SEASON_SIM_UNKNOWN_PROB")? {
            config.default_unknown_probability = prob;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)
            .map_err(|e| SimError::Config(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fixed seed when `Some`, entropy when `None`.
    pub fn with_seed_opt(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_domain(mut self, domain: DomainBound) -> Self {
        self.domain = domain;
        self
    }

    pub fn with_probability_policy(mut self, policy: ProbabilityPolicy) -> Self {
        self.probability_policy = policy;
        self
    }

    pub fn with_default_unknown_probability(mut self, prob: f64) -> Self {
        self.default_unknown_probability = prob;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_count == 0 {
            return Err(SimError::InvalidSampleCount);
        }

        let p = self.default_unknown_probability;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(SimError::Config(format!(
                "default_unknown_probability must be within [0, 1], got {}",
                p
            )));
        }

        if let DomainBound::Fixed(max) = self.domain {
            if max == 0 || max > MAX_DOMAIN_WINS {
                return Err(SimError::Config(format!(
                    "fixed domain must be within 1..={}, got {}",
                    MAX_DOMAIN_WINS, max
                )));
            }
        }

        Ok(())
    }
}

fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| SimError::Config(format!("{} is invalid ({:?}): {}", key, raw, e))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimConfig::default();
        assert_eq!(config.sample_count, 20_000);
        assert_eq!(config.default_unknown_probability, 0.5);
        assert_eq!(config.domain, DomainBound::Fixed(13));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_samples_rejected() {
        let config = SimConfig::default().with_sample_count(0);
        assert_eq!(config.validate(), Err(SimError::InvalidSampleCount));
    }

    #[test]
    fn test_unknown_probability_out_of_range() {
        let config = SimConfig::default().with_default_unknown_probability(1.5);
        assert!(matches!(config.validate(), Err(SimError::Config(_))));

        let config = SimConfig::default().with_default_unknown_probability(f64::NAN);
        assert!(matches!(config.validate(), Err(SimError::Config(_))));
    }

    #[test]
    fn test_from_json_partial() {
        let config = SimConfig::from_json(r#"{"sample_count": 500, "seed": 7}"#).unwrap();
        assert_eq!(config.sample_count, 500);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.default_unknown_probability, 0.5);
    }

    #[test]
    fn test_with_seed_opt() {
        assert_eq!(SimConfig::default().with_seed_opt(Some(3)).seed, Some(3));
        assert_eq!(SimConfig::default().with_seed(3).with_seed_opt(None).seed, None);
    }

    #[test]
    fn test_from_json_domain_variants() {
        let config = SimConfig::from_json(r#"{"domain": "from_schedule"}"#).unwrap();
        assert_eq!(config.domain, DomainBound::FromSchedule);

        let config = SimConfig::from_json(r#"{"domain": {"fixed": 15}}"#).unwrap();
        assert_eq!(config.domain, DomainBound::Fixed(15));
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert_eq!(
            SimConfig::from_json(r#"{"sample_count": 0}"#),
            Err(SimError::InvalidSampleCount)
        );
        assert!(matches!(SimConfig::from_json("not json"), Err(SimError::Config(_))));
    }

    #[test]
    fn test_fixed_domain_bounds() {
        assert!(matches!(
            SimConfig::from_json(r#"{"domain": {"fixed": 4000000000}}"#),
            Err(SimError::Config(_))
        ));
        assert!(matches!(
            SimConfig::from_json(r#"{"domain": {"fixed": 0}}"#),
            Err(SimError::Config(_))
        ));
        assert!(SimConfig::default().with_domain(DomainBound::Fixed(64)).validate().is_ok());
        assert!(SimConfig::default().with_domain(DomainBound::Fixed(65)).validate().is_err());
    }

    #[test]
    fn test_domain_bound_from_schedule() {
        assert_eq!(DomainBound::FromSchedule.max_wins(12), 13);
        assert_eq!(DomainBound::FromSchedule.max_wins(15), 15);
        assert_eq!(DomainBound::Fixed(13).max_wins(15), 13);
    }
}
