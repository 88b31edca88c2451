//! JSON mapping of a filter's weight groups
//!
//! ```json
//! {"in": [{"status": true, "value": 0.5}], "out": [{"status": false, "value": 0.1}]}
//! ```
//!
//! Only weights are stored. Loading restores both groups with zero history.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LabError, LabErrorBuilder, LabResult, PersistedFormat};
use crate::processing::filters::{AdaptiveFilter, TapRole, Weight};

/// One persisted weight; `status` records whether it is enabled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersistedWeight {
    pub status: bool,
    pub value: f64,
}

impl From<Weight> for PersistedWeight {
    fn from(weight: Weight) -> Self {
        Self {
            status: weight.enabled,
            value: weight.value,
        }
    }
}

impl From<PersistedWeight> for Weight {
    fn from(persisted: PersistedWeight) -> Self {
        Weight {
            value: persisted.value,
            enabled: persisted.status,
        }
    }
}

/// Both weight groups of a filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSnapshot {
    #[serde(rename = "in")]
    pub feedforward: Vec<PersistedWeight>,
    #[serde(rename = "out")]
    pub feedback: Vec<PersistedWeight>,
}

impl FilterSnapshot {
    pub fn capture(filter: &AdaptiveFilter) -> Self {
        Self {
            feedforward: filter.weights(TapRole::In).into_iter().map(Into::into).collect(),
            feedback: filter.weights(TapRole::Out).into_iter().map(Into::into).collect(),
        }
    }

    /// Replace the filter's weights; histories restart at zero
    pub fn apply(&self, filter: &mut AdaptiveFilter) {
        filter.load_weights(
            self.feedforward.iter().copied().map(Into::into).collect(),
            self.feedback.iter().copied().map(Into::into).collect(),
        );
    }

    pub fn to_json(&self) -> LabResult<String> {
        serde_json::to_string_pretty(self).map_err(encode_error)
    }

    /// Parse a snapshot; missing or unknown keys and wrong types are rejected
    pub fn from_json(content: &str) -> LabResult<Self> {
        let snapshot: Self = serde_json::from_str(content)?;
        if let Some(bad) = snapshot
            .feedforward
            .iter()
            .chain(&snapshot.feedback)
            .find(|w| !w.value.is_finite())
        {
            return Err(LabErrorBuilder::new("persistence", "decode_filter").malformed(
                PersistedFormat::FilterJson,
                &format!("non-finite weight value {}", bad.value),
                None,
            ));
        }
        Ok(snapshot)
    }
}

fn encode_error(err: serde_json::Error) -> LabError {
    LabErrorBuilder::new("persistence", "encode_filter").malformed(
        PersistedFormat::FilterJson,
        &err.to_string(),
        None,
    )
}

pub fn save_filter_file<P: AsRef<Path>>(filter: &AdaptiveFilter, path: P) -> LabResult<()> {
    let content = FilterSnapshot::capture(filter).to_json()?;
    std::fs::write(path.as_ref(), content)
        .map_err(|e| {
            LabErrorBuilder::new("persistence", "save_filter")
                .with_info("path", path.as_ref().display().to_string())
                .io(e)
        })?;
    tracing::debug!(path = %path.as_ref().display(), "filter saved");
    Ok(())
}

/// Read a snapshot from disk and apply it to `filter`
pub fn load_filter_file<P: AsRef<Path>>(filter: &mut AdaptiveFilter, path: P) -> LabResult<()> {
    let content = std::fs::read_to_string(path.as_ref())
        .map_err(|e| {
            LabErrorBuilder::new("persistence", "load_filter")
                .with_info("path", path.as_ref().display().to_string())
                .io(e)
        })?;
    FilterSnapshot::from_json(&content)?.apply(filter);
    tracing::debug!(path = %path.as_ref().display(), "filter loaded");
    Ok(())
}
