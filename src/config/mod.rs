// src/config/mod.rs
//! Configuration for filters, synthesis and analysis

pub mod constants;
pub mod loader;

pub use constants::*;
pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};

use crate::processing::filters::LearningRateSchedule;

/// Complete crate configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct LabConfig {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub fixed_order: FixedOrderConfig,
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Builder-based adaptive filter settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FilterConfig {
    #[serde(default = "defaults::filter_learning_rate")]
    pub learning_rate: f64,

    /// Seed for weight initialisation; `None` draws from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,

    /// Whether and how the learning rate decays during `train`
    #[serde(default)]
    pub schedule: LearningRateSchedule,
}

/// Fixed-order filter settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FixedOrderConfig {
    #[serde(default = "defaults::fixed_order_learning_rate")]
    pub learning_rate: f64,

    #[serde(default = "defaults::fixed_order_decay_factor")]
    pub decay_factor: f64,
}

/// Signal synthesis settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SynthesisConfig {
    #[serde(default = "defaults::points")]
    pub points: usize,

    #[serde(default = "defaults::start")]
    pub start: f64,

    #[serde(default = "defaults::end")]
    pub end: f64,

    #[serde(default = "defaults::noise_amplitude")]
    pub noise_amplitude: f64,

    /// Seed for noise injection; `None` draws from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Which synthesized sine the frequency sweep drives through the filter
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SweepSignal {
    Clean,
    #[default]
    Noised,
}

/// Analysis settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AnalysisConfig {
    #[serde(default = "defaults::sweep_start")]
    pub sweep_start: u32,

    #[serde(default = "defaults::sweep_stop")]
    pub sweep_stop: u32,

    #[serde(default = "defaults::sweep_step")]
    pub sweep_step: u32,

    #[serde(default = "defaults::sweep_scale")]
    pub sweep_scale: f64,

    #[serde(default)]
    pub sweep_signal: SweepSignal,

    #[serde(default = "defaults::impulse_length")]
    pub impulse_length: usize,

    #[serde(default = "defaults::normalization_epsilon")]
    pub normalization_epsilon: f64,

    /// Fail instead of flooring when a segment peak is near zero
    #[serde(default)]
    pub strict_normalization: bool,
}

/// Default value providers using constants
mod defaults {
    use crate::config::constants::*;

    pub fn filter_learning_rate() -> f64 { filter::DEFAULT_LEARNING_RATE }

    pub fn fixed_order_learning_rate() -> f64 { fixed_order::DEFAULT_LEARNING_RATE }
    pub fn fixed_order_decay_factor() -> f64 { fixed_order::DEFAULT_DECAY_FACTOR }

    pub fn points() -> usize { synthesis::DEFAULT_POINTS }
    pub fn start() -> f64 { synthesis::DEFAULT_START }
    pub fn end() -> f64 { synthesis::DEFAULT_END }
    pub fn noise_amplitude() -> f64 { synthesis::NOISE_AMPLITUDE }

    pub fn sweep_start() -> u32 { analysis::SWEEP_START }
    pub fn sweep_stop() -> u32 { analysis::SWEEP_STOP }
    pub fn sweep_step() -> u32 { analysis::SWEEP_STEP }
    pub fn sweep_scale() -> f64 { analysis::SWEEP_SCALE }
    pub fn impulse_length() -> usize { analysis::IMPULSE_LENGTH }
    pub fn normalization_epsilon() -> f64 { analysis::NORMALIZATION_EPSILON }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            learning_rate: defaults::filter_learning_rate(),
            seed: None,
            schedule: LearningRateSchedule::default(),
        }
    }
}

impl Default for FixedOrderConfig {
    fn default() -> Self {
        Self {
            learning_rate: defaults::fixed_order_learning_rate(),
            decay_factor: defaults::fixed_order_decay_factor(),
        }
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            points: defaults::points(),
            start: defaults::start(),
            end: defaults::end(),
            noise_amplitude: defaults::noise_amplitude(),
            seed: None,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sweep_start: defaults::sweep_start(),
            sweep_stop: defaults::sweep_stop(),
            sweep_step: defaults::sweep_step(),
            sweep_scale: defaults::sweep_scale(),
            sweep_signal: SweepSignal::default(),
            impulse_length: defaults::impulse_length(),
            normalization_epsilon: defaults::normalization_epsilon(),
            strict_normalization: false,
        }
    }
}

impl AnalysisConfig {
    /// Frequencies visited by the amplitude sweep, already scaled
    pub fn sweep_frequencies(&self) -> Vec<f64> {
        if self.sweep_step == 0 {
            return Vec::new();
        }
        (self.sweep_start..self.sweep_stop)
            .step_by(self.sweep_step as usize)
            .map(|f| f as f64 / self.sweep_scale)
            .collect()
    }
}

impl LabConfig {
    /// Validate configuration consistency
    pub fn validate_consistency(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(self.filter.learning_rate.is_finite()
            && self.filter.learning_rate > 0.0
            && self.filter.learning_rate <= validation::MAX_LEARNING_RATE)
        {
            errors.push(format!(
                "Filter learning rate {} must be in (0, {}]",
                self.filter.learning_rate, validation::MAX_LEARNING_RATE
            ));
        }

        if let Some(factor) = self.filter.schedule.decay_factor() {
            if !(factor > 0.0 && factor <= 1.0) {
                errors.push(format!("Filter decay factor {} must be in (0, 1]", factor));
            }
        }

        if !(self.fixed_order.learning_rate.is_finite()
            && self.fixed_order.learning_rate > 0.0
            && self.fixed_order.learning_rate <= validation::MAX_LEARNING_RATE)
        {
            errors.push(format!(
                "Fixed-order learning rate {} must be in (0, {}]",
                self.fixed_order.learning_rate, validation::MAX_LEARNING_RATE
            ));
        }

        if !(self.fixed_order.decay_factor > 0.0 && self.fixed_order.decay_factor <= 1.0) {
            errors.push(format!(
                "Fixed-order decay factor {} must be in (0, 1]",
                self.fixed_order.decay_factor
            ));
        }

        if self.synthesis.points == 0 || self.synthesis.points > validation::MAX_SIGNAL_POINTS {
            errors.push(format!(
                "Synthesis points {} must be in [1, {}]",
                self.synthesis.points, validation::MAX_SIGNAL_POINTS
            ));
        }

        if !(self.synthesis.start.is_finite() && self.synthesis.end.is_finite()) {
            errors.push("Synthesis bounds must be finite".to_string());
        }

        if self.synthesis.noise_amplitude < 0.0 {
            errors.push(format!(
                "Noise amplitude {} must not be negative",
                self.synthesis.noise_amplitude
            ));
        }

        if self.analysis.sweep_step == 0 {
            errors.push("Sweep step must be positive".to_string());
        }

        if self.analysis.sweep_start >= self.analysis.sweep_stop {
            errors.push(format!(
                "Sweep start {} must be below sweep stop {}",
                self.analysis.sweep_start, self.analysis.sweep_stop
            ));
        }

        if !(self.analysis.sweep_scale.is_finite() && self.analysis.sweep_scale > 0.0) {
            errors.push(format!("Sweep scale {} must be positive", self.analysis.sweep_scale));
        }

        if self.analysis.impulse_length == 0 {
            errors.push("Impulse length must be positive".to_string());
        }

        if !(self.analysis.normalization_epsilon > 0.0) {
            errors.push(format!(
                "Normalization epsilon {} must be positive",
                self.analysis.normalization_epsilon
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
