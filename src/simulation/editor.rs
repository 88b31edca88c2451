//! Sub-range edits on an existing `(space, signal)` pair

use crate::error::LabResult;
use crate::utils::{check_same_length, linspace, RandomSource};

use super::noise::NoiseSource;

/// Inclusive x-coordinate bounds of an edit; `None` means the signal edge
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SignalRange {
    pub start: Option<f64>,
    pub end: Option<f64>,
}

impl SignalRange {
    /// The whole signal
    pub fn full() -> Self {
        Self::default()
    }

    pub fn between(start: f64, end: f64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }
}

/// Editor that adds sine, linear and noise components to a signal range
#[derive(Debug, Clone)]
pub struct SignalEditor {
    noise: NoiseSource,
}

impl SignalEditor {
    pub fn new(rng: RandomSource) -> Self {
        Self {
            noise: NoiseSource::new(1.0, rng),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(RandomSource::from_seed(seed))
    }

    /// `n` points over `[start, end]`
    pub fn signal_space(start: f64, end: f64, n: usize) -> Vec<f64> {
        linspace(start, end, n)
    }

    /// Fresh space with an all-zero signal
    pub fn empty(start: f64, end: f64, n: usize) -> (Vec<f64>, Vec<f64>) {
        (Self::signal_space(start, end, n), vec![0.0; n])
    }

    /// Fill missing bounds from the space edges and order them
    ///
    /// Returns `None` only when a bound is missing and the space is empty.
    pub fn assert_bounds(space: &[f64], range: SignalRange) -> Option<(f64, f64)> {
        let start = range.start.or_else(|| space.first().copied())?;
        let end = range.end.or_else(|| space.last().copied())?;
        if start > end {
            Some((end, start))
        } else {
            Some((start, end))
        }
    }

    /// Rightmost index whose coordinate is `<= x` on an ascending space
    ///
    /// Ties resolve to the last equal element. A target below the first
    /// coordinate resolves to 0 and one above the last to the last index.
    /// An empty space has no index.
    pub fn resolve_index(space: &[f64], x: f64) -> Option<usize> {
        if space.is_empty() {
            return None;
        }
        let upper = space.partition_point(|&value| value <= x);
        Some(upper.saturating_sub(1))
    }

    /// Inclusive index range covered by `range`
    pub fn resolve_range(space: &[f64], range: SignalRange) -> Option<(usize, usize)> {
        let (start, end) = Self::assert_bounds(space, range)?;
        Some((Self::resolve_index(space, start)?, Self::resolve_index(space, end)?))
    }

    /// Add `amplitude * sin(x * frequency + phase)` inside the range
    pub fn add_sine(
        &self,
        space: &[f64],
        signal: &[f64],
        frequency: f64,
        amplitude: f64,
        phase: f64,
        range: SignalRange,
    ) -> LabResult<Vec<f64>> {
        Self::edit(space, signal, range, "add_sine", |x| {
            amplitude * (x * frequency + phase).sin()
        })
    }

    /// Add `x * angle + offset` inside the range
    pub fn add_linear(
        &self,
        space: &[f64],
        signal: &[f64],
        angle: f64,
        offset: f64,
        range: SignalRange,
    ) -> LabResult<Vec<f64>> {
        Self::edit(space, signal, range, "add_linear", |x| x * angle + offset)
    }

    /// Add `amplitude * uniform(-1, 1)` inside the range
    pub fn add_noise(
        &mut self,
        space: &[f64],
        signal: &[f64],
        amplitude: f64,
        range: SignalRange,
    ) -> LabResult<Vec<f64>> {
        let noise = &mut self.noise;
        Self::edit(space, signal, range, "add_noise", |_| noise.sample_scaled(amplitude))
    }

    fn edit<F>(
        space: &[f64],
        signal: &[f64],
        range: SignalRange,
        operation: &str,
        mut delta: F,
    ) -> LabResult<Vec<f64>>
    where
        F: FnMut(f64) -> f64,
    {
        check_same_length("signal space/signal", space.len(), signal.len(), "signal_editor", operation)?;

        let mut output = signal.to_vec();
        if let Some((first, last)) = Self::resolve_range(space, range) {
            for i in first..=last {
                output[i] += delta(space[i]);
            }
        }
        Ok(output)
    }
}

impl Default for SignalEditor {
    fn default() -> Self {
        Self::new(RandomSource::from_entropy())
    }
}
