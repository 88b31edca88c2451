//! Filters and the analyses run over them

pub mod analysis;
pub mod filters;

pub use analysis::{AnalysisEngine, NormalizedSnrReport, SegmentSnr};
pub use filters::{AdaptiveFilter, FixedOrderFilter, SignalFilter};
