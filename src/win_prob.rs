use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::{Result, SimError};

fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| SimError::InvalidSpread(e.to_string()))
}

fn check_stddev(stddev: f64) -> Result<()> {
    if stddev.is_finite() && stddev > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidSpread(format!(
            "stddev must be positive and finite, got {}",
            stddev
        )))
    }
}

/// Convert an expected scoring margin into a win probability.
///
/// The final margin is modelled as normal around `expected_margin` (positive
/// when the team is favored) with standard deviation `stddev`.
///
/// # Arguments
/// * `expected_margin` - Projected points for minus points against
/// * `stddev` - Spread of the final margin, see `SPREAD_STDDEV`
///
/// # Returns
/// Probability of the team winning (0.0-1.0)
pub fn win_prob_from_spread(expected_margin: f64, stddev: f64) -> Result<f64> {
    check_stddev(stddev)?;
    if !expected_margin.is_finite() {
        return Err(SimError::InvalidSpread(format!(
            "expected margin must be finite, got {}",
            expected_margin
        )));
    }

    Ok(standard_normal()?.cdf(expected_margin / stddev))
}

/// Expected margin implied by a win probability; inverse of
/// [`win_prob_from_spread`].
pub fn spread_from_win_prob(win_prob: f64, stddev: f64) -> Result<f64> {
    check_stddev(stddev)?;
    if !(win_prob > 0.0 && win_prob < 1.0) {
        return Err(SimError::InvalidSpread(format!(
            "win probability must be strictly between 0 and 1, got {}",
            win_prob
        )));
    }

    Ok(standard_normal()?.inverse_cdf(win_prob) * stddev)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SPREAD_STDDEV;

    #[test]
    fn test_pick_em_is_50_50() {
        let prob = win_prob_from_spread(0.0, SPREAD_STDDEV).unwrap();
        assert!((prob - 0.5).abs() < 1e-12, "Even spread should be a coin flip");
    }

    #[test]
    fn test_favorite_favored() {
        let prob = win_prob_from_spread(10.0, SPREAD_STDDEV).unwrap();
        assert!(prob > 0.7, "Ten-point favorite should be heavily favored");
        assert!(prob < 1.0);
    }

    #[test]
    fn test_symmetric() {
        let fav = win_prob_from_spread(6.5, SPREAD_STDDEV).unwrap();
        let dog = win_prob_from_spread(-6.5, SPREAD_STDDEV).unwrap();
        assert!((fav + dog - 1.0).abs() < 1e-10, "P(win) + P(opponent win) should equal 1");
    }

    #[test]
    fn test_one_stddev() {
        let prob = win_prob_from_spread(SPREAD_STDDEV, SPREAD_STDDEV).unwrap();
        assert!((prob - 0.8413).abs() < 1e-3);
    }

    #[test]
    fn test_inverse() {
        let margin = spread_from_win_prob(0.8, SPREAD_STDDEV).unwrap();
        let prob = win_prob_from_spread(margin, SPREAD_STDDEV).unwrap();
        assert!((prob - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(win_prob_from_spread(3.0, 0.0).is_err());
        assert!(win_prob_from_spread(f64::NAN, SPREAD_STDDEV).is_err());
        assert!(spread_from_win_prob(1.0, SPREAD_STDDEV).is_err());
        assert!(spread_from_win_prob(0.5, -1.0).is_err());
    }
}
