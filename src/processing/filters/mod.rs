// src/processing/filters/mod.rs
//! Online adaptive filters
//!
//! [`AdaptiveFilter`] is the generic engine: independent feedforward and
//! feedback tap groups, an LMS weight update and an optional learning-rate
//! decay schedule. [`FilterBuilder`] and [`FilterDirector`] build its
//! topology; [`FixedOrderFilter`] wraps it with the canned order-1 and
//! order-2 configurations.

pub mod adaptive;
pub mod builder;
pub mod fixed_order;
pub mod taps;

pub use adaptive::AdaptiveFilter;
pub use builder::{FilterBuilder, FilterDirector};
pub use fixed_order::{FilterOrder, FixedOrderFilter};
pub use taps::{TapGroup, TapRole, Weight};

use serde::{Deserialize, Serialize};

use crate::error::LabResult;

/// How the learning rate evolves while training
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LearningRateSchedule {
    /// Every update uses the base rate
    #[default]
    Constant,
    /// Rate is multiplied by `factor` after each step and restarts at the
    /// base rate on every `train` call
    RunDecay { factor: f64 },
    /// Rate is multiplied by `factor` after each step and the decayed value
    /// carries over to the next `train` call
    PersistentDecay { factor: f64 },
}

impl LearningRateSchedule {
    pub fn decay_factor(&self) -> Option<f64> {
        match self {
            LearningRateSchedule::Constant => None,
            LearningRateSchedule::RunDecay { factor }
            | LearningRateSchedule::PersistentDecay { factor } => Some(*factor),
        }
    }
}

/// Common train/predict surface shared by every filter in the crate
pub trait SignalFilter {
    /// Run the recurrence over `noised`, adapting weights towards `clean`
    fn train(&mut self, clean: &[f64], noised: &[f64]) -> LabResult<Vec<f64>>;

    /// Run the recurrence over `noised` without touching the weights
    fn predict(&mut self, noised: &[f64]) -> Vec<f64>;
}
