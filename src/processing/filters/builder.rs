//! Topology construction for [`AdaptiveFilter`]

use crate::config::constants::filter;
use crate::config::FilterConfig;
use crate::error::{LabErrorBuilder, LabResult};
use crate::utils::RandomSource;

use super::adaptive::AdaptiveFilter;
use super::taps::{TapRole, Weight};
use super::LearningRateSchedule;

/// Creates filters and performs every structural mutation on them
#[derive(Debug, Clone)]
pub struct FilterBuilder {
    rng: RandomSource,
    schedule: LearningRateSchedule,
    filters_built: u64,
}

impl Default for FilterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::with_random_source(RandomSource::from_entropy())
    }

    pub fn with_random_source(rng: RandomSource) -> Self {
        Self {
            rng,
            schedule: LearningRateSchedule::Constant,
            filters_built: 0,
        }
    }

    pub fn from_config(config: &FilterConfig) -> Self {
        let mut builder = Self::with_random_source(RandomSource::from_config(config.seed));
        builder.schedule = config.schedule;
        builder
    }

    /// Schedule given to every filter built from now on
    pub fn with_schedule(mut self, schedule: LearningRateSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Empty filter with no taps
    pub fn new_filter(&mut self, learning_rate: f64) -> AdaptiveFilter {
        let rng = self.rng.derive(self.filters_built);
        self.filters_built += 1;
        AdaptiveFilter::with_random_source(learning_rate, rng).with_schedule(self.schedule)
    }

    /// Empty filter at the default learning rate
    pub fn default_filter(&mut self) -> AdaptiveFilter {
        self.new_filter(filter::DEFAULT_LEARNING_RATE)
    }

    /// Append an enabled tap; `None` draws the value from uniform [0, 1)
    pub fn add_weight(&mut self, filter: &mut AdaptiveFilter, role: TapRole, initial_value: Option<f64>) {
        let value = initial_value.unwrap_or_else(|| self.rng.unit());
        filter.group_mut(role).append(Weight::new(value));
    }

    /// Remove the tap at `index`, returning its weight
    pub fn remove_weight(&mut self, filter: &mut AdaptiveFilter, index: usize, role: TapRole) -> LabResult<Weight> {
        let group = filter.group_mut(role);
        let len = group.len();
        group.remove(index).ok_or_else(|| {
            LabErrorBuilder::new("filter_builder", "remove_weight").out_of_range(role, index, len)
        })
    }

    /// Flip the enabled flag of the tap at `index`, returning the new state
    pub fn toggle_weight_enabled(&mut self, filter: &mut AdaptiveFilter, index: usize, role: TapRole) -> LabResult<bool> {
        let group = filter.group_mut(role);
        let len = group.len();
        let weight = group.weight_mut(index).ok_or_else(|| {
            LabErrorBuilder::new("filter_builder", "toggle_weight_enabled").out_of_range(role, index, len)
        })?;
        weight.enabled = !weight.enabled;
        Ok(weight.enabled)
    }
}

/// Canned topologies built purely through [`FilterBuilder`]
#[derive(Debug, Clone, Default)]
pub struct FilterDirector {
    builder: FilterBuilder,
}

impl FilterDirector {
    pub fn new(builder: FilterBuilder) -> Self {
        Self { builder }
    }

    pub fn builder_mut(&mut self) -> &mut FilterBuilder {
        &mut self.builder
    }

    /// One feedforward tap, one feedback tap
    pub fn first_degree_filter(&mut self) -> AdaptiveFilter {
        self.build(filter::FIRST_DEGREE_IN_TAPS, filter::FIRST_DEGREE_OUT_TAPS)
    }

    /// One feedforward tap, two feedback taps
    pub fn second_degree_filter(&mut self) -> AdaptiveFilter {
        self.build(filter::SECOND_DEGREE_IN_TAPS, filter::SECOND_DEGREE_OUT_TAPS)
    }

    fn build(&mut self, in_taps: usize, out_taps: usize) -> AdaptiveFilter {
        let mut filter = self.builder.default_filter();
        for _ in 0..in_taps {
            self.builder.add_weight(&mut filter, TapRole::In, None);
        }
        for _ in 0..out_taps {
            self.builder.add_weight(&mut filter, TapRole::Out, None);
        }
        filter
    }
}
