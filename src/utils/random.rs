//! Seedable random source shared by weight initialisation and noise injection

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Multiplier used to spread derived stream seeds apart
const STREAM_SPREAD: u64 = 0x9E37_79B9_7F4A_7C15;

/// Random source that is reproducible when constructed from a seed
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
    seed: Option<u64>,
}

impl RandomSource {
    /// Deterministic source
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Source seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Deterministic when `seed` is set, entropy-backed otherwise
    pub fn from_config(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// Seed this source was built from, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Independent source for worker `stream`
    ///
    /// Seeded sources derive a fixed per-stream seed, so parallel work stays
    /// reproducible regardless of scheduling.
    pub fn derive(&self, stream: u64) -> Self {
        match self.seed {
            Some(seed) => Self::from_seed(seed ^ stream.wrapping_add(1).wrapping_mul(STREAM_SPREAD)),
            None => Self::from_entropy(),
        }
    }

    /// Uniform sample in [0, 1)
    pub fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// `amplitude * uniform(-1, 1)`
    pub fn symmetric(&mut self, amplitude: f64) -> f64 {
        amplitude * self.rng.gen_range(-1.0..1.0)
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}
