//! Adaptive-Lab: numeric engine for an adaptive-filtering sandbox
//!
//! The crate trains and runs LMS adaptive filters against synthesized or
//! user-edited signals and characterises them. It features:
//!
//! - Buildable filters with independent feedforward and feedback taps
//! - Fixed order-1 and order-2 filters with a decaying learning rate
//! - Test-signal synthesis and sub-range signal editing
//! - SNR, amplitude-frequency sweep and impulse-response analysis
//! - JSON filter and tab-separated signal persistence
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use adaptive_lab::{LabConfig, Session, SignalTarget, SignalRange, TapRole};
//!
//! fn main() -> Result<(), adaptive_lab::LabError> {
//!     let mut session = Session::new(LabConfig::default());
//!     session.add_weight(TapRole::In, Some(0.5));
//!     session.add_weight(TapRole::Out, Some(0.5));
//!
//!     session.add_sine(SignalTarget::Clean, 1.0, 1.0, 0.0, SignalRange::full())?;
//!     session.add_sine(SignalTarget::Noised, 1.0, 1.0, 0.0, SignalRange::full())?;
//!     session.add_noise(SignalTarget::Noised, 0.3, SignalRange::full())?;
//!
//!     let errors = session.train(20)?;
//!     println!("final MSE: {:?}", errors.last());
//!     println!("{}", session.weights_summary());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod persistence;
pub mod processing;
pub mod session;
pub mod simulation;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{ConfigLoader, LabConfig};
pub use error::{ErrorContext, LabError, LabResult};
pub use processing::analysis::{AnalysisEngine, NormalizedSnrReport};
pub use processing::filters::{
    AdaptiveFilter, FilterBuilder, FilterDirector, FilterOrder, FixedOrderFilter,
    LearningRateSchedule, SignalFilter, TapRole, Weight,
};
pub use session::{Session, SignalTarget};
pub use simulation::{SignalEditor, SignalRange, SignalSynthesizer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: "Numeric engine for an adaptive-filtering sandbox".to_string(),
        features: vec![
            "LMS adaptive filters".to_string(),
            "Fixed-order filters".to_string(),
            "Signal synthesis and editing".to_string(),
            "Filter analysis".to_string(),
            "Filter and signal persistence".to_string(),
        ],
    }
}

/// Library version information
#[derive(Debug, Clone)]
pub struct VersionInfo {
    /// Library name
    pub name: String,
    /// Version string
    pub version: String,
    /// Description
    pub description: String,
    /// List of features
    pub features: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        let info = version_info();
        assert_eq!(info.name, NAME);
        assert_eq!(info.version, VERSION);
        assert!(!info.features.is_empty());
    }
}
