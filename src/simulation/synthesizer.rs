//! Synthesized test signals over a linearly spaced signal space
//!
//! Every generator returns the space, the clean waveform and a noised copy
//! produced by the synthesizer's [`NoiseSource`]. The discrete waveforms
//! (triangular, rectangular, stairs) are defined on sample indices, not on
//! x-coordinates.

use crate::config::constants::synthesis;
use crate::config::SynthesisConfig;
use crate::error::{LabErrorBuilder, LabResult};
use crate::utils::{linspace, RandomSource};

use super::noise::NoiseSource;

/// Output of a signal generator
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedSignal {
    pub space: Vec<f64>,
    pub clean: Vec<f64>,
    pub noised: Vec<f64>,
}

impl SynthesizedSignal {
    pub fn len(&self) -> usize {
        self.space.len()
    }

    pub fn is_empty(&self) -> bool {
        self.space.is_empty()
    }
}

/// Generator for the standard test waveforms
#[derive(Debug, Clone)]
pub struct SignalSynthesizer {
    points: usize,
    start: f64,
    end: f64,
    noise: NoiseSource,
}

impl SignalSynthesizer {
    pub fn new(noise: NoiseSource) -> Self {
        Self {
            points: synthesis::DEFAULT_POINTS,
            start: synthesis::DEFAULT_START,
            end: synthesis::DEFAULT_END,
            noise,
        }
    }

    pub fn from_config(config: &SynthesisConfig) -> Self {
        Self {
            points: config.points,
            start: config.start,
            end: config.end,
            noise: NoiseSource::from_config(config),
        }
    }

    /// Default space with unit noise from a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(NoiseSource::seeded(seed))
    }

    /// Same space and amplitude, different random stream
    pub fn with_random_source(mut self, rng: RandomSource) -> Self {
        self.noise = NoiseSource::new(self.noise.amplitude(), rng);
        self
    }

    pub fn space(&self) -> Vec<f64> {
        linspace(self.start, self.end, self.points)
    }

    pub fn points(&self) -> usize {
        self.points
    }

    pub fn noise(&self) -> &NoiseSource {
        &self.noise
    }

    /// `sin(x * frequency)`
    pub fn sine(&mut self, frequency: f64) -> SynthesizedSignal {
        let space = self.space();
        let clean = space.iter().map(|x| (x * frequency).sin()).collect();
        self.finish(space, clean)
    }

    /// Repeating ramp up, ramp down and zero run, truncated to the space
    ///
    /// Each ramp spans `width / 2` samples; the zero run spans
    /// `period - width` samples, or none when `width > period`.
    pub fn triangular(&mut self, width: usize, period: usize) -> LabResult<SynthesizedSignal> {
        let half = width / 2;
        let mut pattern = linspace(0.0, 1.0, half);
        pattern.extend(linspace(1.0, 0.0, half));
        pattern.extend(std::iter::repeat(0.0).take(period.saturating_sub(width)));

        if pattern.is_empty() {
            return Err(LabErrorBuilder::new("synthesizer", "triangular").invalid_parameter(
                "width/period",
                &format!("width {} and period {} produce an empty pattern", width, period),
            ));
        }

        let space = self.space();
        let clean = pattern.iter().copied().cycle().take(space.len()).collect();
        Ok(self.finish(space, clean))
    }

    /// 0 for the first `width` samples of each period, 1 for the rest
    pub fn rectangular(&mut self, width: usize, period: usize) -> LabResult<SynthesizedSignal> {
        let period = Self::check_period(period, "rectangular")?;
        let space = self.space();
        let clean = (0..space.len())
            .map(|i| if i % period < width { 0.0 } else { 1.0 })
            .collect();
        Ok(self.finish(space, clean))
    }

    /// Level starts at 0 and rises by `step` every `period` samples
    pub fn stairs(&mut self, step: f64, period: usize) -> LabResult<SynthesizedSignal> {
        let period = Self::check_period(period, "stairs")?;
        let space = self.space();
        let clean = (0..space.len())
            .map(|i| (i / period) as f64 * step)
            .collect();
        Ok(self.finish(space, clean))
    }

    /// Unit-frequency sine
    pub fn default_sine(&mut self) -> SynthesizedSignal {
        self.sine(synthesis::DEFAULT_SINE_FREQUENCY)
    }

    pub fn default_triangular(&mut self) -> LabResult<SynthesizedSignal> {
        self.triangular(synthesis::DEFAULT_PULSE_WIDTH, synthesis::DEFAULT_PERIOD)
    }

    pub fn default_rectangular(&mut self) -> LabResult<SynthesizedSignal> {
        self.rectangular(synthesis::DEFAULT_PULSE_WIDTH, synthesis::DEFAULT_PERIOD)
    }

    /// Unit step every default period
    pub fn default_stairs(&mut self) -> LabResult<SynthesizedSignal> {
        self.stairs(synthesis::DEFAULT_STAIR_STEP, synthesis::DEFAULT_PERIOD)
    }

    fn check_period(period: usize, operation: &str) -> LabResult<usize> {
        if period == 0 {
            return Err(LabErrorBuilder::new("synthesizer", operation)
                .invalid_parameter("period", "must be at least one sample"));
        }
        Ok(period)
    }

    fn finish(&mut self, space: Vec<f64>, clean: Vec<f64>) -> SynthesizedSignal {
        let noised = self.noise.apply(&clean);
        SynthesizedSignal { space, clean, noised }
    }
}

impl Default for SignalSynthesizer {
    fn default() -> Self {
        Self::from_config(&SynthesisConfig::default())
    }
}
