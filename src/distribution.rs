use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// Probability of each final win total over a dense domain `0..=max_wins`.
///
/// Every bucket is present, including those with zero mass.
#[derive(Clone, Debug, PartialEq)]
pub struct WinDistribution {
    probabilities: Vec<f64>,
}

impl WinDistribution {
    /// All mass on a single win total.
    pub fn degenerate(wins: u32, max_wins: u32) -> Self {
        let mut probabilities = vec![0.0; max_wins as usize + 1];
        probabilities[wins.min(max_wins) as usize] = 1.0;
        WinDistribution { probabilities }
    }

    /// Relative frequencies from per-bucket counts.
    pub(crate) fn from_counts(counts: &[u64], total: u64) -> Self {
        let total = total as f64;
        WinDistribution {
            probabilities: counts.iter().map(|&c| c as f64 / total).collect(),
        }
    }

    pub(crate) fn from_probabilities(probabilities: Vec<f64>) -> Self {
        WinDistribution { probabilities }
    }

    /// Largest win total in the domain.
    pub fn max_wins(&self) -> u32 {
        (self.probabilities.len() - 1) as u32
    }

    /// Probability of finishing with exactly `wins` wins (0.0 outside the domain).
    pub fn probability(&self, wins: u32) -> f64 {
        self.probabilities.get(wins as usize).copied().unwrap_or(0.0)
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Iterate `(wins, probability)` pairs in ascending win order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.probabilities.iter().enumerate().map(|(w, &p)| (w as u32, p))
    }

    /// `(wins, probability)` rows for charting.
    pub fn to_table(&self) -> Vec<(u32, f64)> {
        self.iter().collect()
    }

    pub fn total(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    pub fn expected_wins(&self) -> f64 {
        self.iter().map(|(w, p)| w as f64 * p).sum()
    }

    /// Probability of finishing with at least `wins` wins.
    pub fn prob_at_least(&self, wins: u32) -> f64 {
        self.probabilities.iter().skip(wins as usize).sum()
    }

    /// Win total with the highest mass; ties go to the lower total.
    pub fn most_likely(&self) -> u32 {
        let mut best = 0;
        for (w, p) in self.iter() {
            if p > self.probabilities[best as usize] {
                best = w;
            }
        }
        best
    }

    /// True when a single outcome carries all the mass.
    pub fn is_degenerate(&self) -> bool {
        self.probabilities.iter().any(|&p| p == 1.0)
    }
}

#[derive(Serialize)]
struct Row {
    wins: u32,
    probability: f64,
}

impl Serialize for WinDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.probabilities.len()))?;
        for (wins, probability) in self.iter() {
            seq.serialize_element(&Row { wins, probability })?;
        }
        seq.end()
    }
}
