//! Stateful sandbox session: one filter and a clean/noised/filtered signal set
//!
//! [`Session`] is the surface a UI drives. It owns the current filter, the
//! shared signal space and three signals over it, and routes every edit,
//! training run, analysis and load/save through the lower-level modules.

use crate::config::constants::validation;
use crate::config::LabConfig;
use crate::error::{LabErrorBuilder, LabResult};
use crate::persistence::{decode_signal, encode_signal, FilterSnapshot};
use crate::processing::analysis::{AnalysisEngine, NormalizedSnrReport};
use crate::processing::filters::{
    AdaptiveFilter, FilterBuilder, FilterDirector, FilterOrder, TapRole, Weight,
};
use crate::simulation::{SignalEditor, SignalRange};
use crate::utils::{mean_squared_error, RandomSource};

/// Noise stream reserved for signal edits
const EDITOR_STREAM: u64 = 0xED17;

/// Which of the two editable signals an operation applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalTarget {
    Clean,
    Noised,
}

pub struct Session {
    config: LabConfig,
    director: FilterDirector,
    editor: SignalEditor,
    analysis: AnalysisEngine,
    filter: AdaptiveFilter,
    space: Vec<f64>,
    clean: Vec<f64>,
    noised: Vec<f64>,
    filtered: Vec<f64>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(LabConfig::default())
    }
}

impl Session {
    pub fn new(config: LabConfig) -> Self {
        let mut director = FilterDirector::new(FilterBuilder::from_config(&config.filter));
        let filter = director.builder_mut().new_filter(config.filter.learning_rate);
        let editor_rng = RandomSource::from_config(config.synthesis.seed).derive(EDITOR_STREAM);
        let (space, clean) = SignalEditor::empty(config.synthesis.start, config.synthesis.end, config.synthesis.points);

        Self {
            director,
            editor: SignalEditor::new(editor_rng),
            analysis: AnalysisEngine::new(config.analysis.clone(), config.synthesis.clone()),
            filter,
            noised: clean.clone(),
            filtered: clean.clone(),
            space,
            clean,
            config,
        }
    }

    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    pub fn filter(&self) -> &AdaptiveFilter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut AdaptiveFilter {
        &mut self.filter
    }

    pub fn signal_space(&self) -> &[f64] {
        &self.space
    }

    pub fn signal(&self, target: SignalTarget) -> &[f64] {
        match target {
            SignalTarget::Clean => &self.clean,
            SignalTarget::Noised => &self.noised,
        }
    }

    pub fn filtered(&self) -> &[f64] {
        &self.filtered
    }

    /// Fresh empty filter and zeroed signals over the configured space
    pub fn reset(&mut self) {
        self.filter = self.director.builder_mut().new_filter(self.config.filter.learning_rate);
        let synthesis = &self.config.synthesis;
        let (space, zeros) = SignalEditor::empty(synthesis.start, synthesis.end, synthesis.points);
        self.space = space;
        self.noised = zeros.clone();
        self.filtered = zeros.clone();
        self.clean = zeros;
        tracing::info!(points = self.space.len(), "session reset");
    }

    /// Replace the filter with a canned topology of random weights
    pub fn use_preset(&mut self, order: FilterOrder) {
        let mut filter = match order {
            FilterOrder::First => self.director.first_degree_filter(),
            FilterOrder::Second => self.director.second_degree_filter(),
        };
        filter.set_learning_rate(self.config.filter.learning_rate);
        self.filter = filter;
        tracing::info!(?order, "preset filter installed");
    }

    /// Run `epochs` full training passes, returning each pass's MSE
    ///
    /// The last pass's output becomes the filtered signal.
    pub fn train(&mut self, epochs: usize) -> LabResult<Vec<f64>> {
        if epochs > validation::MAX_EPOCHS {
            return Err(LabErrorBuilder::new("session", "train").invalid_parameter(
                "epochs",
                &format!("{} exceeds the limit of {}", epochs, validation::MAX_EPOCHS),
            ));
        }

        let mut errors = Vec::with_capacity(epochs);
        for _ in 0..epochs {
            self.filtered = self.filter.train(&self.clean, &self.noised)?;
            errors.push(mean_squared_error(&self.filtered, &self.clean));
        }

        tracing::info!(
            epochs,
            final_mse = errors.last().copied().unwrap_or(0.0),
            "training finished"
        );
        Ok(errors)
    }

    /// Predict over the noised signal; the result becomes the filtered signal
    pub fn infer(&mut self) -> &[f64] {
        self.filtered = self.filter.predict(&self.noised);
        &self.filtered
    }

    pub fn reset_weights(&mut self) {
        self.filter.reset_weights();
    }

    pub fn add_weight(&mut self, role: TapRole, initial_value: Option<f64>) {
        self.director.builder_mut().add_weight(&mut self.filter, role, initial_value);
    }

    pub fn remove_weight(&mut self, index: usize, role: TapRole) -> LabResult<Weight> {
        self.director.builder_mut().remove_weight(&mut self.filter, index, role)
    }

    pub fn toggle_weight(&mut self, index: usize, role: TapRole) -> LabResult<bool> {
        self.director.builder_mut().toggle_weight_enabled(&mut self.filter, index, role)
    }

    pub fn weights_summary(&self) -> String {
        let format_group = |role| {
            self.filter
                .weights(role)
                .iter()
                .map(|w| {
                    if w.enabled {
                        format!("{}", w.value)
                    } else {
                        format!("({} off)", w.value)
                    }
                })
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            "Input weights: [{}]\nOutput weights: [{}]",
            format_group(TapRole::In),
            format_group(TapRole::Out)
        )
    }

    pub fn reset_signal(&mut self, target: SignalTarget) {
        let zeros = vec![0.0; self.space.len()];
        *self.signal_mut(target) = zeros;
    }

    pub fn add_sine(
        &mut self,
        target: SignalTarget,
        frequency: f64,
        amplitude: f64,
        phase: f64,
        range: SignalRange,
    ) -> LabResult<()> {
        let edited = self
            .editor
            .add_sine(&self.space, self.signal(target), frequency, amplitude, phase, range)?;
        *self.signal_mut(target) = edited;
        Ok(())
    }

    pub fn add_line(&mut self, target: SignalTarget, angle: f64, offset: f64, range: SignalRange) -> LabResult<()> {
        let edited = self
            .editor
            .add_linear(&self.space, self.signal(target), angle, offset, range)?;
        *self.signal_mut(target) = edited;
        Ok(())
    }

    pub fn add_noise(&mut self, target: SignalTarget, amplitude: f64, range: SignalRange) -> LabResult<()> {
        let signal = match target {
            SignalTarget::Clean => &self.clean,
            SignalTarget::Noised => &self.noised,
        };
        let edited = self.editor.add_noise(&self.space, signal, amplitude, range)?;
        *self.signal_mut(target) = edited;
        Ok(())
    }

    /// New space of `n` points over `[a, b]`; all signals are zeroed
    pub fn generate_signal_space(&mut self, n: usize, a: f64, b: f64) -> LabResult<()> {
        if n > validation::MAX_SIGNAL_POINTS {
            return Err(LabErrorBuilder::new("session", "generate_signal_space").invalid_parameter(
                "points",
                &format!("{} exceeds the limit of {}", n, validation::MAX_SIGNAL_POINTS),
            ));
        }
        let (space, zeros) = SignalEditor::empty(a, b, n);
        self.space = space;
        self.noised = zeros.clone();
        self.filtered = zeros.clone();
        self.clean = zeros;
        Ok(())
    }

    pub fn snr(&self, splits: usize) -> LabResult<NormalizedSnrReport> {
        self.analysis.normalized_snr(&self.clean, &self.noised, splits)
    }

    pub fn amplitude_frequency_characteristic(&self) -> Vec<f64> {
        self.analysis.amplitude_frequency_characteristic(&self.filter)
    }

    /// Impulse response of the current filter; runs on a copy so the
    /// session filter's history is left alone
    pub fn impulse_response(&self) -> (Vec<f64>, Vec<f64>) {
        let mut scratch = self.filter.clone();
        self.analysis.impulse_response(&mut scratch)
    }

    pub fn save_filter(&self) -> LabResult<String> {
        FilterSnapshot::capture(&self.filter).to_json()
    }

    /// Replace the current weights from JSON; the filter is unchanged on error
    pub fn load_filter(&mut self, content: &str) -> LabResult<()> {
        let snapshot = FilterSnapshot::from_json(content)?;
        snapshot.apply(&mut self.filter);
        tracing::info!(
            in_taps = snapshot.feedforward.len(),
            out_taps = snapshot.feedback.len(),
            "filter loaded"
        );
        Ok(())
    }

    pub fn save_signal(&self, target: SignalTarget) -> LabResult<String> {
        encode_signal(&self.space, self.signal(target))
    }

    /// Load a signal and its space
    ///
    /// When the length changes, the other signal and the filtered signal are
    /// zeroed to match.
    pub fn load_signal(&mut self, target: SignalTarget, content: &str) -> LabResult<()> {
        let (space, signal) = decode_signal(content)?;
        if space.len() != self.space.len() {
            let zeros = vec![0.0; space.len()];
            self.clean = zeros.clone();
            self.noised = zeros.clone();
            self.filtered = zeros;
        }
        self.space = space;
        *self.signal_mut(target) = signal;
        tracing::info!(?target, points = self.space.len(), "signal loaded");
        Ok(())
    }

    fn signal_mut(&mut self, target: SignalTarget) -> &mut Vec<f64> {
        match target {
            SignalTarget::Clean => &mut self.clean,
            SignalTarget::Noised => &mut self.noised,
        }
    }
}
