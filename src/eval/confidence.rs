//! Bootstrap confidence intervals over scored populations.
//!
//! Percentile bootstrap: resample the scored units with replacement to the
//! original population size, recompute the target metric on each resample
//! with the exact same aggregation code as the point estimate, and read the
//! interval off the resulting distribution. Stateless across calls.

use crate::eval::aggregate::{micro_f1, pooled_rmse, CorpusMetrics};
use crate::eval::metrics::DocumentMetrics;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Bootstrap parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Number of resamples.
    pub iterations: usize,
    /// Confidence level in (0, 1); 0.95 yields the 2.5th/97.5th
    /// percentiles.
    pub confidence: f64,
    /// Seed for reproducible intervals; OS entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            confidence: 0.95,
            seed: None,
        }
    }
}

/// A percentile confidence interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower percentile bound.
    pub lower: f64,
    /// Upper percentile bound.
    pub upper: f64,
}

/// Bootstrap a confidence interval for `metric` over `population`.
///
/// The metric receives each resample as a slice of references, the same
/// shape the point estimate uses. An empty population yields a degenerate
/// `(0.0, 0.0)` interval.
///
/// # Example
///
/// ```
/// use trialeval::eval::confidence::{bootstrap_ci, BootstrapConfig};
///
/// let population: Vec<f64> = vec![0.8, 0.9, 0.85, 0.95, 0.7];
/// let config = BootstrapConfig { seed: Some(42), ..Default::default() };
/// let ci = bootstrap_ci(&population, |xs| {
///     xs.iter().copied().sum::<f64>() / xs.len() as f64
/// }, &config);
/// assert!(ci.lower <= ci.upper);
/// assert!(ci.lower >= 0.7 && ci.upper <= 0.95);
/// ```
pub fn bootstrap_ci<T, M>(population: &[T], metric: M, config: &BootstrapConfig) -> ConfidenceInterval
where
    M: Fn(&[&T]) -> f64,
{
    let n = population.len();
    if n == 0 || config.iterations == 0 {
        return ConfidenceInterval {
            lower: 0.0,
            upper: 0.0,
        };
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut estimates = Vec::with_capacity(config.iterations);
    let mut resample: Vec<&T> = Vec::with_capacity(n);
    for _ in 0..config.iterations {
        resample.clear();
        for _ in 0..n {
            resample.push(&population[rng.random_range(0..n)]);
        }
        estimates.push(metric(&resample));
    }

    estimates.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let alpha = 1.0 - config.confidence;
    let lower_idx = ((alpha / 2.0) * config.iterations as f64) as usize;
    let upper_idx = (((1.0 - alpha / 2.0) * config.iterations as f64) as usize)
        .min(config.iterations - 1);

    ConfidenceInterval {
        lower: estimates[lower_idx.min(config.iterations - 1)],
        upper: estimates[upper_idx],
    }
}

impl CorpusMetrics {
    /// Bootstrap interval for micro-F1 over the per-document population.
    #[must_use]
    pub fn bootstrap_f1(&self, config: &BootstrapConfig) -> ConfidenceInterval {
        bootstrap_ci(&self.documents, |docs: &[&DocumentMetrics]| micro_f1(docs), config)
    }

    /// Bootstrap interval for pooled RMSE over the per-document population.
    #[must_use]
    pub fn bootstrap_rmse(&self, config: &BootstrapConfig) -> ConfidenceInterval {
        bootstrap_ci(&self.documents, |docs: &[&DocumentMetrics]| pooled_rmse(docs), config)
    }
}
