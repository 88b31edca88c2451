//! Uniform additive noise
//! Location: src/simulation/noise.rs

use crate::config::SynthesisConfig;
use crate::utils::RandomSource;

/// Adds `amplitude * uniform(-1, 1)` to samples
#[derive(Debug, Clone)]
pub struct NoiseSource {
    amplitude: f64,
    rng: RandomSource,
}

impl NoiseSource {
    pub fn new(amplitude: f64, rng: RandomSource) -> Self {
        Self { amplitude, rng }
    }

    /// Unit-amplitude noise with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(1.0, RandomSource::from_seed(seed))
    }

    pub fn from_config(config: &SynthesisConfig) -> Self {
        Self::new(config.noise_amplitude, RandomSource::from_config(config.seed))
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Underlying random source, e.g. for deriving worker streams
    pub fn random_source(&self) -> &RandomSource {
        &self.rng
    }

    /// One noise sample at the configured amplitude
    pub fn sample(&mut self) -> f64 {
        self.rng.symmetric(self.amplitude)
    }

    /// One noise sample at an explicit amplitude
    pub fn sample_scaled(&mut self, amplitude: f64) -> f64 {
        self.rng.symmetric(amplitude)
    }

    /// Noised copy of `clean`
    pub fn apply(&mut self, clean: &[f64]) -> Vec<f64> {
        clean.iter().map(|&x| x + self.sample()).collect()
    }
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self::from_config(&SynthesisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_stays_within_amplitude() {
        let mut noise = NoiseSource::new(0.25, RandomSource::from_seed(5));
        let clean = vec![2.0; 500];
        let noised = noise.apply(&clean);
        assert!(noised.iter().all(|&y| (y - 2.0).abs() <= 0.25));
    }

    #[test]
    fn test_zero_amplitude_is_identity() {
        let mut noise = NoiseSource::new(0.0, RandomSource::from_seed(5));
        assert_eq!(noise.apply(&[1.0, -1.0]), vec![1.0, -1.0]);
    }

    #[test]
    fn test_seeded_noise_repeats() {
        let a = NoiseSource::seeded(9).apply(&[0.0; 16]);
        let b = NoiseSource::seeded(9).apply(&[0.0; 16]);
        assert_eq!(a, b);
    }
}
