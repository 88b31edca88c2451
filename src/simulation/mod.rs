//! Test-signal synthesis and sub-range signal editing

pub mod editor;
pub mod noise;
pub mod synthesizer;

pub use editor::{SignalEditor, SignalRange};
pub use noise::NoiseSource;
pub use synthesizer::{SignalSynthesizer, SynthesizedSignal};
