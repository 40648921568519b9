use crate::error::Result;
use crate::stats;

use super::model::{FeatureColumn, FeatureTable};

// ---------------------------------------------------------------------------
// Deterministic PRNG
// ---------------------------------------------------------------------------

/// Minimal deterministic PRNG (xoshiro256**)
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    pub fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    pub fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Z-score a column with its sample standard deviation.
/// Constant columns are only centred.
pub fn standardize(values: &[f64]) -> Vec<f64> {
    let m = stats::mean(values);
    let s = stats::sample_std(values);
    if s.is_finite() && s > 0.0 {
        values.iter().map(|v| (v - m) / s).collect()
    } else {
        values.iter().map(|v| v - m).collect()
    }
}

// ---------------------------------------------------------------------------
// Planted-interaction sample
// ---------------------------------------------------------------------------

/// Generator for a standardized table `x1, x2, noise_1..noise_k` and a target
///
/// `y = linear_x1·x1 + linear_x2·x2 + interaction·x1·x2 + ε`
///
/// With the defaults, x1 and x2 correlate weakly (≈0.3, ≈0.34) with `y` while
/// `x1*x2` correlates at ≈0.89.
#[derive(Debug, Clone)]
pub struct PlantedInteraction {
    pub rows: usize,
    pub noise_features: usize,
    pub linear_x1: f64,
    pub linear_x2: f64,
    pub interaction: f64,
    pub noise_level: f64,
    pub seed: u64,
}

impl Default for PlantedInteraction {
    fn default() -> Self {
        Self {
            rows: 2_000,
            noise_features: 0,
            linear_x1: 0.3,
            linear_x2: 0.35,
            interaction: 0.9,
            noise_level: 0.1,
            seed: 42,
        }
    }
}

impl PlantedInteraction {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_noise_features(mut self, n: usize) -> Self {
        self.noise_features = n;
        self
    }

    pub fn with_interaction(mut self, strength: f64) -> Self {
        self.interaction = strength;
        self
    }

    /// Build the feature table and target. Every feature column is standardized.
    pub fn generate(&self) -> Result<(FeatureTable, Vec<f64>)> {
        let mut rng = SimpleRng::new(self.seed);

        let x1: Vec<f64> = (0..self.rows).map(|_| rng.gauss(0.0, 1.0)).collect();
        let x2: Vec<f64> = (0..self.rows).map(|_| rng.gauss(0.0, 1.0)).collect();

        let target: Vec<f64> = x1
            .iter()
            .zip(&x2)
            .map(|(&a, &b)| {
                self.linear_x1 * a
                    + self.linear_x2 * b
                    + self.interaction * a * b
                    + rng.gauss(0.0, self.noise_level)
            })
            .collect();

        let mut columns = vec![
            FeatureColumn::new("x1", standardize(&x1)),
            FeatureColumn::new("x2", standardize(&x2)),
        ];
        for k in 1..=self.noise_features {
            let noise: Vec<f64> = (0..self.rows).map(|_| rng.gauss(0.0, 1.0)).collect();
            columns.push(FeatureColumn::new(format!("noise_{k}"), standardize(&noise)));
        }

        Ok((FeatureTable::new(columns)?, target))
    }
}
