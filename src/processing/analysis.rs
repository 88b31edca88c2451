//! Signal-to-noise measurements and filter characterisation
//! Location: src/processing/analysis.rs

use rayon::prelude::*;

use crate::config::constants::analysis;
use crate::config::{AnalysisConfig, SweepSignal, SynthesisConfig};
use crate::error::{LabErrorBuilder, LabResult};
use crate::simulation::SignalSynthesizer;
use crate::utils::{check_same_length, max_abs, rms, RandomSource};

use super::filters::SignalFilter;

/// SNR of one normalized segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSnr {
    pub snr: f64,
    /// Smaller of the clean and noised peaks before normalization
    pub peak: f64,
    /// Peak was below epsilon and the divisor was floored
    pub floored: bool,
}

/// Per-segment results of [`AnalysisEngine::normalized_snr`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSnrReport {
    pub segments: Vec<SegmentSnr>,
}

impl NormalizedSnrReport {
    pub fn values(&self) -> Vec<f64> {
        self.segments.iter().map(|s| s.snr).collect()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Indices of segments normalized with the epsilon floor
    pub fn degenerate_segments(&self) -> Vec<usize> {
        self.segments
            .iter()
            .enumerate()
            .filter(|(_, s)| s.floored)
            .map(|(i, _)| i)
            .collect()
    }

    /// Mean over segments with a finite SNR
    pub fn mean(&self) -> Option<f64> {
        let finite: Vec<f64> = self.values().into_iter().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            None
        } else {
            Some(finite.iter().sum::<f64>() / finite.len() as f64)
        }
    }
}

/// Stateless analyses parameterised by configuration
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    config: AnalysisConfig,
    synthesis: SynthesisConfig,
}

impl AnalysisEngine {
    pub fn new(config: AnalysisConfig, synthesis: SynthesisConfig) -> Self {
        Self { config, synthesis }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// `(rms(clean) / rms(|clean - noised|))^2`, `+inf` when the noise is zero
    pub fn snr(clean: &[f64], noised: &[f64]) -> LabResult<f64> {
        check_same_length("clean/noised signal", clean.len(), noised.len(), "analysis", "snr")?;
        Ok(Self::snr_unchecked(clean, noised))
    }

    fn snr_unchecked(clean: &[f64], noised: &[f64]) -> f64 {
        let noise: Vec<f64> = clean.iter().zip(noised).map(|(c, n)| (c - n).abs()).collect();
        let noise_rms = rms(&noise);
        if noise_rms == 0.0 {
            return f64::INFINITY;
        }
        (rms(clean) / noise_rms).powi(2)
    }

    /// Normalized SNR over the whole signal as a single segment
    pub fn normalized_snr_default(&self, clean: &[f64], noised: &[f64]) -> LabResult<NormalizedSnrReport> {
        self.normalized_snr(clean, noised, analysis::DEFAULT_SNR_SPLITS)
    }

    /// One SNR per contiguous segment, each side scaled by its own peak
    ///
    /// Segments hold `len / splits` samples and the last one also takes the
    /// remainder.
    pub fn normalized_snr(&self, clean: &[f64], noised: &[f64], splits: usize) -> LabResult<NormalizedSnrReport> {
        check_same_length("clean/noised signal", clean.len(), noised.len(), "analysis", "normalized_snr")?;
        if splits == 0 || splits > clean.len() {
            return Err(LabErrorBuilder::new("analysis", "normalized_snr").invalid_parameter(
                "splits",
                &format!("{} splits for a signal of {} samples", splits, clean.len()),
            ));
        }

        let epsilon = self.config.normalization_epsilon;
        let segment_len = clean.len() / splits;
        let mut segments = Vec::with_capacity(splits);

        for segment in 0..splits {
            let from = segment * segment_len;
            let to = if segment + 1 == splits { clean.len() } else { from + segment_len };

            let (clean_part, clean_peak) = Self::normalize(&clean[from..to], epsilon);
            let (noised_part, noised_peak) = Self::normalize(&noised[from..to], epsilon);
            let peak = clean_peak.min(noised_peak);
            let floored = peak < epsilon;

            if floored {
                if self.config.strict_normalization {
                    return Err(LabErrorBuilder::new("analysis", "normalized_snr")
                        .degenerate_normalization(segment, peak));
                }
                tracing::warn!(segment, peak, epsilon, "near-zero segment peak, divisor floored");
            }

            segments.push(SegmentSnr {
                snr: Self::snr_unchecked(&clean_part, &noised_part),
                peak,
                floored,
            });
        }

        Ok(NormalizedSnrReport { segments })
    }

    fn normalize(data: &[f64], epsilon: f64) -> (Vec<f64>, f64) {
        let peak = max_abs(data);
        let divisor = peak.max(epsilon);
        (data.iter().map(|x| x / divisor).collect(), peak)
    }

    /// Frequencies of the amplitude sweep
    pub fn sweep_frequencies(&self) -> Vec<f64> {
        self.config.sweep_frequencies()
    }

    /// RMS of the filter's prediction for a sine at every sweep frequency
    ///
    /// Each frequency runs on its own clone of `filter` with its own noise
    /// stream derived from the synthesis seed, so the result does not depend
    /// on thread scheduling.
    pub fn amplitude_frequency_characteristic<F>(&self, filter: &F) -> Vec<f64>
    where
        F: SignalFilter + Clone + Send + Sync,
    {
        let frequencies = self.sweep_frequencies();
        let base = RandomSource::from_config(self.synthesis.seed);
        let signal = self.config.sweep_signal;

        let amplitudes: Vec<f64> = frequencies
            .par_iter()
            .enumerate()
            .map(|(index, &frequency)| {
                let mut synthesizer = SignalSynthesizer::from_config(&self.synthesis)
                    .with_random_source(base.derive(index as u64));
                let sine = synthesizer.sine(frequency);
                let input = match signal {
                    SweepSignal::Clean => sine.clean,
                    SweepSignal::Noised => sine.noised,
                };
                let mut worker = filter.clone();
                rms(&worker.predict(&input))
            })
            .collect();

        tracing::debug!(points = amplitudes.len(), ?signal, "amplitude sweep complete");
        amplitudes
    }

    /// Unit impulse through `predict`, returned as `(response, impulse)`
    pub fn impulse_response<F: SignalFilter>(&self, filter: &mut F) -> (Vec<f64>, Vec<f64>) {
        let mut impulse = vec![0.0; self.config.impulse_length];
        if let Some(first) = impulse.first_mut() {
            *first = 1.0;
        }
        let response = filter.predict(&impulse);
        (response, impulse)
    }
}
