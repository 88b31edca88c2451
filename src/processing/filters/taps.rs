//! Tap groups: weights and their history samples stored side by side
//!
//! A [`TapGroup`] owns one slot per tap holding both the weight and the
//! buffered sample it multiplies. Every structural change goes through this
//! type, so the weight count and the history length can never diverge.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LabError, LabErrorBuilder};

/// Which history a tap group draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TapRole {
    /// Feedforward taps over past noised input samples
    In,
    /// Feedback taps over past filter outputs
    Out,
}

impl TapRole {
    pub const ALL: [TapRole; 2] = [TapRole::In, TapRole::Out];

    pub fn as_str(&self) -> &'static str {
        match self {
            TapRole::In => "in",
            TapRole::Out => "out",
        }
    }
}

impl fmt::Display for TapRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TapRole {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(TapRole::In),
            "out" => Ok(TapRole::Out),
            other => Err(LabErrorBuilder::new("taps", "parse_role")
                .invalid_parameter("group", &format!("expected \"in\" or \"out\", got {:?}", other))),
        }
    }
}

/// A single adaptive weight; disabled weights are frozen but keep their slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weight {
    pub value: f64,
    pub enabled: bool,
}

impl Weight {
    pub fn new(value: f64) -> Self {
        Self { value, enabled: true }
    }

    fn contribution(&self, sample: f64) -> f64 {
        if self.enabled {
            self.value * sample
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tap {
    weight: Weight,
    sample: f64,
}

/// Ordered taps; index 0 holds the most recent sample
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TapGroup {
    taps: Vec<Tap>,
}

impl TapGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group with the given weights and an all-zero history
    pub fn from_weights<I: IntoIterator<Item = Weight>>(weights: I) -> Self {
        Self {
            taps: weights
                .into_iter()
                .map(|weight| Tap { weight, sample: 0.0 })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Add a tap at the oldest end with a zero history sample
    pub fn append(&mut self, weight: Weight) {
        self.taps.push(Tap { weight, sample: 0.0 });
    }

    /// Remove the tap at `index` together with its history sample
    pub fn remove(&mut self, index: usize) -> Option<Weight> {
        if index < self.taps.len() {
            Some(self.taps.remove(index).weight)
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.taps.clear();
    }

    pub fn weight(&self, index: usize) -> Option<&Weight> {
        self.taps.get(index).map(|tap| &tap.weight)
    }

    pub fn weight_mut(&mut self, index: usize) -> Option<&mut Weight> {
        self.taps.get_mut(index).map(|tap| &mut tap.weight)
    }

    pub fn weights(&self) -> impl Iterator<Item = &Weight> + '_ {
        self.taps.iter().map(|tap| &tap.weight)
    }

    pub fn weights_mut(&mut self) -> impl Iterator<Item = &mut Weight> + '_ {
        self.taps.iter_mut().map(|tap| &mut tap.weight)
    }

    /// History samples, most recent first
    pub fn samples(&self) -> Vec<f64> {
        self.taps.iter().map(|tap| tap.sample).collect()
    }

    /// Overwrite the history; extra values are ignored, missing ones become 0
    pub fn set_samples(&mut self, samples: &[f64]) {
        for (i, tap) in self.taps.iter_mut().enumerate() {
            tap.sample = samples.get(i).copied().unwrap_or(0.0);
        }
    }

    /// Shift history by one, dropping the oldest sample
    pub fn push_front(&mut self, sample: f64) {
        let len = self.taps.len();
        if len == 0 {
            return;
        }
        for i in (1..len).rev() {
            self.taps[i].sample = self.taps[i - 1].sample;
        }
        self.taps[0].sample = sample;
    }

    pub fn clear_samples(&mut self) {
        for tap in &mut self.taps {
            tap.sample = 0.0;
        }
    }

    /// Weighted sum over enabled taps
    pub fn output(&self) -> f64 {
        self.taps
            .iter()
            .map(|tap| tap.weight.contribution(tap.sample))
            .sum()
    }

    /// LMS step `w -= step * sample` on enabled taps, `step = rate * error`
    pub fn lms_update(&mut self, step: f64) {
        for tap in self.taps.iter_mut().filter(|tap| tap.weight.enabled) {
            tap.weight.value -= step * tap.sample;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(values: &[f64]) -> TapGroup {
        TapGroup::from_weights(values.iter().map(|&v| Weight::new(v)))
    }

    #[test]
    fn test_push_front_drops_oldest() {
        let mut g = group(&[1.0, 1.0, 1.0]);
        g.push_front(1.0);
        g.push_front(2.0);
        g.push_front(3.0);
        g.push_front(4.0);
        assert_eq!(g.samples(), vec![4.0, 3.0, 2.0]);
    }

    #[test]
    fn test_push_front_on_empty_group_is_noop() {
        let mut g = TapGroup::new();
        g.push_front(5.0);
        assert!(g.is_empty());
        assert_eq!(g.output(), 0.0);
    }

    #[test]
    fn test_output_skips_disabled() {
        let mut g = group(&[2.0, 3.0]);
        g.set_samples(&[1.0, 10.0]);
        assert_eq!(g.output(), 32.0);

        g.weight_mut(1).unwrap().enabled = false;
        assert_eq!(g.output(), 2.0);
    }

    #[test]
    fn test_lms_update_freezes_disabled() {
        let mut g = group(&[1.0, 1.0]);
        g.set_samples(&[0.5, 0.5]);
        g.weight_mut(0).unwrap().enabled = false;

        g.lms_update(0.2);

        assert_eq!(g.weight(0).unwrap().value, 1.0);
        assert!((g.weight(1).unwrap().value - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_append_and_remove_keep_slots_paired() {
        let mut g = group(&[1.0, 2.0]);
        g.set_samples(&[7.0, 8.0]);
        g.append(Weight::new(3.0));
        assert_eq!(g.samples(), vec![7.0, 8.0, 0.0]);

        assert_eq!(g.remove(0), Some(Weight::new(1.0)));
        assert_eq!(g.samples(), vec![8.0, 0.0]);
        assert_eq!(g.remove(5), None);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("in".parse::<TapRole>().unwrap(), TapRole::In);
        assert_eq!("out".parse::<TapRole>().unwrap(), TapRole::Out);
        assert!("both".parse::<TapRole>().is_err());
        assert_eq!(TapRole::Out.to_string(), "out");
    }
}
