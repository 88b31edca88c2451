//! Configurable-topology LMS adaptive filter

use crate::config::constants::filter;
use crate::config::FilterConfig;
use crate::error::LabResult;
use crate::utils::{check_same_length, RandomSource};

use super::taps::{TapGroup, TapRole, Weight};
use super::{LearningRateSchedule, SignalFilter};

/// Adaptive filter with feedforward (`in`) and feedback (`out`) taps
///
/// Each step pushes the current noised sample into the `in` history and the
/// previous output into the `out` history, then emits the weighted sum of
/// both histories over enabled taps. Histories persist between calls until
/// [`clear_history`](Self::clear_history) or a structural reset.
#[derive(Debug, Clone)]
pub struct AdaptiveFilter {
    feedforward: TapGroup,
    feedback: TapGroup,
    learning_rate: f64,
    current_rate: f64,
    schedule: LearningRateSchedule,
    bootstrap_len: usize,
    rng: RandomSource,
}

impl AdaptiveFilter {
    /// Empty filter with a constant learning rate
    pub fn new(learning_rate: f64) -> Self {
        Self::with_random_source(learning_rate, RandomSource::from_entropy())
    }

    pub fn with_random_source(learning_rate: f64, rng: RandomSource) -> Self {
        Self {
            feedforward: TapGroup::new(),
            feedback: TapGroup::new(),
            learning_rate,
            current_rate: learning_rate,
            schedule: LearningRateSchedule::Constant,
            bootstrap_len: filter::DEFAULT_BOOTSTRAP_LEN,
            rng,
        }
    }

    pub fn from_config(config: &FilterConfig) -> Self {
        Self::with_random_source(config.learning_rate, RandomSource::from_config(config.seed))
            .with_schedule(config.schedule)
    }

    pub fn with_schedule(mut self, schedule: LearningRateSchedule) -> Self {
        self.schedule = schedule;
        self.current_rate = self.learning_rate;
        self
    }

    /// Number of leading samples copied straight from the input
    pub fn with_bootstrap_len(mut self, bootstrap_len: usize) -> Self {
        self.bootstrap_len = bootstrap_len.max(1);
        self
    }

    pub fn group(&self, role: TapRole) -> &TapGroup {
        match role {
            TapRole::In => &self.feedforward,
            TapRole::Out => &self.feedback,
        }
    }

    pub fn group_mut(&mut self, role: TapRole) -> &mut TapGroup {
        match role {
            TapRole::In => &mut self.feedforward,
            TapRole::Out => &mut self.feedback,
        }
    }

    /// Snapshot of one group's weights
    pub fn weights(&self, role: TapRole) -> Vec<Weight> {
        self.group(role).weights().copied().collect()
    }

    /// Replace both groups; histories restart at zero
    pub fn load_weights(&mut self, feedforward: Vec<Weight>, feedback: Vec<Weight>) {
        self.feedforward = TapGroup::from_weights(feedforward);
        self.feedback = TapGroup::from_weights(feedback);
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Rate the next update will use
    pub fn current_learning_rate(&self) -> f64 {
        match self.schedule {
            LearningRateSchedule::PersistentDecay { .. } => self.current_rate,
            _ => self.learning_rate,
        }
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
        self.current_rate = learning_rate;
    }

    pub fn schedule(&self) -> LearningRateSchedule {
        self.schedule
    }

    pub fn bootstrap_len(&self) -> usize {
        self.bootstrap_len
    }

    /// Drop every tap in both groups
    pub fn reset(&mut self) {
        self.feedforward.clear();
        self.feedback.clear();
        self.current_rate = self.learning_rate;
    }

    /// Re-draw every weight value from uniform [0, 1); flags and history stay
    pub fn reset_weights(&mut self) {
        let rng = &mut self.rng;
        for weight in self.feedforward.weights_mut().chain(self.feedback.weights_mut()) {
            weight.value = rng.unit();
        }
    }

    /// Zero both histories without touching weights
    pub fn clear_history(&mut self) {
        self.feedforward.clear_samples();
        self.feedback.clear_samples();
    }

    pub fn info(&self) -> String {
        format!(
            "This filter has {} input weights and {} output weights.",
            self.feedforward.len(),
            self.feedback.len()
        )
    }

    /// Weighted sum of both histories over enabled taps
    pub fn output(&self) -> f64 {
        self.feedforward.output() + self.feedback.output()
    }

    /// Advance both histories by one sample and return the new output
    pub fn make_step(&mut self, current_noised: f64, current_filtered: f64) -> f64 {
        self.push_history(current_noised, current_filtered);
        self.output()
    }

    /// Train on a clean/noised pair, returning the filtered sequence
    pub fn train(&mut self, clean: &[f64], noised: &[f64]) -> LabResult<Vec<f64>> {
        check_same_length("clean/noised signal", clean.len(), noised.len(), "adaptive_filter", "train")?;

        let mut rate = self.current_learning_rate();
        let decay = self.schedule.decay_factor();
        let mut filtered = self.bootstrap(noised);

        for i in filtered.len()..noised.len() {
            let output = self.make_step(noised[i], filtered[i - 1]);
            filtered.push(output);

            let error = output - clean[i];
            self.feedforward.lms_update(rate * error);
            self.feedback.lms_update(rate * error);

            if let Some(factor) = decay {
                rate *= factor;
            }
        }

        if let LearningRateSchedule::PersistentDecay { .. } = self.schedule {
            self.current_rate = rate;
        }

        tracing::debug!(
            samples = noised.len(),
            in_taps = self.feedforward.len(),
            out_taps = self.feedback.len(),
            final_rate = rate,
            "adaptive filter trained"
        );
        Ok(filtered)
    }

    /// Run the recurrence without adapting weights
    pub fn predict(&mut self, noised: &[f64]) -> Vec<f64> {
        let mut filtered = self.bootstrap(noised);
        for i in filtered.len()..noised.len() {
            let output = self.make_step(noised[i], filtered[i - 1]);
            filtered.push(output);
        }
        filtered
    }

    fn push_history(&mut self, current_noised: f64, current_filtered: f64) {
        self.feedforward.push_front(current_noised);
        self.feedback.push_front(current_filtered);
    }

    /// Copy the leading samples and prime the history behind them
    fn bootstrap(&mut self, noised: &[f64]) -> Vec<f64> {
        let count = self.bootstrap_len.min(noised.len());
        let mut filtered = Vec::with_capacity(noised.len());
        for i in 0..count {
            if i > 0 {
                self.push_history(noised[i], filtered[i - 1]);
            }
            filtered.push(noised[i]);
        }
        filtered
    }
}

impl Default for AdaptiveFilter {
    fn default() -> Self {
        Self::new(filter::DEFAULT_LEARNING_RATE)
    }
}

impl SignalFilter for AdaptiveFilter {
    fn train(&mut self, clean: &[f64], noised: &[f64]) -> LabResult<Vec<f64>> {
        AdaptiveFilter::train(self, clean, noised)
    }

    fn predict(&mut self, noised: &[f64]) -> Vec<f64> {
        AdaptiveFilter::predict(self, noised)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabError;

    fn filter_with(in_weights: &[f64], out_weights: &[f64]) -> AdaptiveFilter {
        let mut filter = AdaptiveFilter::with_random_source(0.2, RandomSource::from_seed(1));
        filter.load_weights(
            in_weights.iter().map(|&v| Weight::new(v)).collect(),
            out_weights.iter().map(|&v| Weight::new(v)).collect(),
        );
        filter
    }

    #[test]
    fn test_zero_weights_predict_zero_after_bootstrap() {
        let mut filter = filter_with(&[0.0], &[0.0]);
        let signal = [0.7, 1.5, -2.0, 3.0];
        let predicted = filter.predict(&signal);
        assert_eq!(predicted, vec![0.7, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_filter_is_degenerate() {
        let mut filter = filter_with(&[], &[]);
        assert_eq!(filter.output(), 0.0);
        assert_eq!(filter.predict(&[1.0, 2.0, 3.0]), vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let mut filter = filter_with(&[0.5], &[0.5]);
        assert!(filter.predict(&[]).is_empty());
        assert!(filter.train(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_make_step_couples_both_histories() {
        let mut filter = filter_with(&[1.0], &[10.0]);
        let output = filter.make_step(2.0, 3.0);
        assert_eq!(output, 32.0);
        assert_eq!(filter.group(TapRole::In).samples(), vec![2.0]);
        assert_eq!(filter.group(TapRole::Out).samples(), vec![3.0]);
    }

    #[test]
    fn test_identity_filter_predicts_input() {
        let mut filter = filter_with(&[1.0], &[0.0]);
        let signal = [0.1, 0.2, 0.3];
        assert_eq!(filter.predict(&signal), signal.to_vec());
    }

    #[test]
    fn test_train_single_step_update() {
        let mut filter = filter_with(&[0.5], &[0.5]);
        let clean = [0.0, 1.0];
        let noised = [2.0, 4.0];

        let filtered = filter.train(&clean, &noised).unwrap();

        // output = 0.5 * 4 + 0.5 * 2 = 3, error = 2
        assert_eq!(filtered, vec![2.0, 3.0]);
        let w_in = filter.weights(TapRole::In)[0].value;
        let w_out = filter.weights(TapRole::Out)[0].value;
        assert!((w_in - (0.5 - 0.2 * 2.0 * 4.0)).abs() < 1e-12);
        assert!((w_out - (0.5 - 0.2 * 2.0 * 2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_train_rejects_length_mismatch() {
        let mut filter = filter_with(&[0.5], &[0.5]);
        let result = filter.train(&[0.0, 1.0], &[0.0]);
        assert!(matches!(
            result,
            Err(LabError::ShapeMismatch { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn test_disabled_taps_are_frozen_during_training() {
        let mut filter = filter_with(&[0.5], &[0.5]);
        filter.group_mut(TapRole::Out).weight_mut(0).unwrap().enabled = false;

        filter.train(&[0.0, 1.0, 0.0], &[1.0, 2.0, 3.0]).unwrap();

        let out = filter.weights(TapRole::Out)[0];
        assert_eq!(out.value, 0.5);
        assert!(!out.enabled);
        assert_ne!(filter.weights(TapRole::In)[0].value, 0.5);
    }

    #[test]
    fn test_constant_schedule_ignores_decay() {
        let mut filter = filter_with(&[0.5], &[0.5]);
        filter.train(&[0.0; 10], &[1.0; 10]).unwrap();
        assert_eq!(filter.current_learning_rate(), 0.2);
    }

    #[test]
    fn test_persistent_decay_carries_over() {
        let mut filter = filter_with(&[0.0], &[0.0])
            .with_schedule(LearningRateSchedule::PersistentDecay { factor: 0.5 });
        filter.train(&[0.0; 3], &[0.0; 3]).unwrap();
        // two update steps
        assert!((filter.current_learning_rate() - 0.05).abs() < 1e-12);
        filter.train(&[0.0; 2], &[0.0; 2]).unwrap();
        assert!((filter.current_learning_rate() - 0.025).abs() < 1e-12);
    }

    #[test]
    fn test_run_decay_restarts_each_call() {
        let clean = [0.0, 0.0, 0.0];
        let noised = [1.0, 1.0, 1.0];

        let mut decayed = filter_with(&[0.5], &[0.5])
            .with_schedule(LearningRateSchedule::RunDecay { factor: 0.5 });
        let mut constant = filter_with(&[0.5], &[0.5]);

        decayed.train(&clean, &noised).unwrap();
        constant.train(&clean, &noised).unwrap();

        assert_eq!(decayed.current_learning_rate(), 0.2);
        assert_ne!(
            decayed.weights(TapRole::In)[0].value,
            constant.weights(TapRole::In)[0].value
        );
    }

    #[test]
    fn test_reset_weights_keeps_flags_and_history() {
        let mut filter = filter_with(&[5.0, 5.0], &[5.0]);
        filter.group_mut(TapRole::In).weight_mut(1).unwrap().enabled = false;
        filter.make_step(1.0, 2.0);

        filter.reset_weights();

        let weights = filter.weights(TapRole::In);
        assert!(weights.iter().all(|w| (0.0..1.0).contains(&w.value)));
        assert!(!weights[1].enabled);
        assert_eq!(filter.group(TapRole::In).samples(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_reset_discards_structure() {
        let mut filter = filter_with(&[1.0], &[1.0, 1.0]);
        filter.reset();
        assert!(filter.group(TapRole::In).is_empty());
        assert!(filter.group(TapRole::Out).is_empty());
        assert_eq!(filter.info(), "This filter has 0 input weights and 0 output weights.");
    }

    #[test]
    fn test_history_persists_between_calls() {
        let mut filter = filter_with(&[0.0, 1.0], &[]);
        filter.predict(&[0.0, 9.0]);
        // second tap still sees the 9 from the previous run
        assert_eq!(filter.predict(&[0.0, 1.0]), vec![0.0, 9.0]);

        filter.clear_history();
        assert_eq!(filter.predict(&[0.0, 1.0]), vec![0.0, 0.0]);
    }
}
