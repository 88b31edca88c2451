//! Order-1 and order-2 filters with a fixed tap layout and decaying rate
//!
//! Both are [`AdaptiveFilter`]s with one feedforward tap, one or two feedback
//! taps and a [`LearningRateSchedule::PersistentDecay`] schedule. The flat
//! weight vector is `[in_0, out_0, out_1, ...]`, matching the input vector
//! `[noised_i, filtered_{i-1}, filtered_{i-2}, ...]` seen at each step.

use crate::config::FixedOrderConfig;
use crate::error::LabResult;
use crate::utils::check_same_length;

use super::adaptive::AdaptiveFilter;
use super::taps::{TapRole, Weight};
use super::{LearningRateSchedule, SignalFilter};

/// Supported fixed topologies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOrder {
    First,
    Second,
}

impl FilterOrder {
    /// Number of feedback taps, which is also the bootstrap length
    pub fn feedback_taps(&self) -> usize {
        match self {
            FilterOrder::First => 1,
            FilterOrder::Second => 2,
        }
    }

    /// Length of the per-step input vector
    pub fn input_len(&self) -> usize {
        1 + self.feedback_taps()
    }

    /// Equal weights summing to one
    pub fn initial_weights(&self) -> Vec<f64> {
        let n = self.input_len();
        vec![1.0 / n as f64; n]
    }
}

/// Fixed-topology adaptive filter
#[derive(Debug, Clone)]
pub struct FixedOrderFilter {
    order: FilterOrder,
    inner: AdaptiveFilter,
}

impl FixedOrderFilter {
    pub fn new(order: FilterOrder) -> Self {
        Self::with_config(order, &FixedOrderConfig::default())
    }

    pub fn first_order() -> Self {
        Self::new(FilterOrder::First)
    }

    pub fn second_order() -> Self {
        Self::new(FilterOrder::Second)
    }

    pub fn with_config(order: FilterOrder, config: &FixedOrderConfig) -> Self {
        let mut inner = AdaptiveFilter::new(config.learning_rate)
            .with_schedule(LearningRateSchedule::PersistentDecay {
                factor: config.decay_factor,
            })
            .with_bootstrap_len(order.feedback_taps());

        let weights = order.initial_weights();
        inner.load_weights(
            vec![Weight::new(weights[0])],
            weights[1..].iter().map(|&w| Weight::new(w)).collect(),
        );

        Self { order, inner }
    }

    pub fn order(&self) -> FilterOrder {
        self.order
    }

    /// Current (possibly decayed) learning rate
    pub fn learning_rate(&self) -> f64 {
        self.inner.current_learning_rate()
    }

    /// Flat weight vector `[in_0, out_0, ...]`
    pub fn weights(&self) -> Vec<f64> {
        self.inner
            .group(TapRole::In)
            .weights()
            .chain(self.inner.group(TapRole::Out).weights())
            .map(|w| w.value)
            .collect()
    }

    /// Dot product of the weight vector with `input`
    pub fn output_for(&self, input: &[f64]) -> LabResult<f64> {
        check_same_length("input vector", self.order.input_len(), input.len(), "fixed_order", "output_for")?;
        Ok(self.weights().iter().zip(input).map(|(w, x)| w * x).sum())
    }

    /// `w[i] -= rate * error * input[i]` at the current rate, enabled taps only
    pub fn update_weights(&mut self, error: f64, input: &[f64]) -> LabResult<()> {
        check_same_length("input vector", self.order.input_len(), input.len(), "fixed_order", "update_weights")?;
        let step = self.learning_rate() * error;
        let mut inputs = input.iter();
        for role in TapRole::ALL {
            for weight in self.inner.group_mut(role).weights_mut() {
                match inputs.next() {
                    Some(x) if weight.enabled => weight.value -= step * x,
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Train with per-step rate decay; the decayed rate persists
    pub fn train(&mut self, clean: &[f64], noised: &[f64]) -> LabResult<Vec<f64>> {
        self.inner.clear_history();
        self.inner.train(clean, noised)
    }

    /// Run the recurrence without decay or weight updates
    pub fn predict(&mut self, noised: &[f64]) -> Vec<f64> {
        self.inner.clear_history();
        self.inner.predict(noised)
    }
}

impl SignalFilter for FixedOrderFilter {
    fn train(&mut self, clean: &[f64], noised: &[f64]) -> LabResult<Vec<f64>> {
        FixedOrderFilter::train(self, clean, noised)
    }

    fn predict(&mut self, noised: &[f64]) -> Vec<f64> {
        FixedOrderFilter::predict(self, noised)
    }
}
