// src/config/constants.rs
//! Crate-wide default values and validation limits

/// Adaptive filter constants
pub mod filter {
    pub const DEFAULT_LEARNING_RATE: f64 = 0.2;
    pub const DEFAULT_BOOTSTRAP_LEN: usize = 1;
    pub const FIRST_DEGREE_IN_TAPS: usize = 1;
    pub const FIRST_DEGREE_OUT_TAPS: usize = 1;
    pub const SECOND_DEGREE_IN_TAPS: usize = 1;
    pub const SECOND_DEGREE_OUT_TAPS: usize = 2;
}

/// Fixed-order filter constants
pub mod fixed_order {
    pub const DEFAULT_LEARNING_RATE: f64 = 0.4;
    pub const DEFAULT_DECAY_FACTOR: f64 = 0.99;
}

/// Signal synthesis constants
pub mod synthesis {
    pub const DEFAULT_POINTS: usize = 1000;
    pub const DEFAULT_START: f64 = 0.0;
    pub const DEFAULT_END: f64 = 20.0;
    pub const DEFAULT_SINE_FREQUENCY: f64 = 1.0;
    pub const DEFAULT_PULSE_WIDTH: usize = 100;
    pub const DEFAULT_PERIOD: usize = 200;
    pub const DEFAULT_STAIR_STEP: f64 = 1.0;
    /// Half-width of the uniform noise added to every synthesized clean sample
    pub const NOISE_AMPLITUDE: f64 = 1.0;
}

/// Analysis constants
pub mod analysis {
    pub const SWEEP_START: u32 = 1;
    /// Exclusive upper bound of the swept integer frequencies
    pub const SWEEP_STOP: u32 = 25_000;
    pub const SWEEP_STEP: u32 = 200;
    pub const SWEEP_SCALE: f64 = 1000.0;
    pub const SWEEP_POINTS: usize = 125;
    pub const IMPULSE_LENGTH: usize = 50;
    pub const NORMALIZATION_EPSILON: f64 = 1e-6;
    pub const DEFAULT_SNR_SPLITS: usize = 1;
}

/// Validation limits
pub mod validation {
    pub const MAX_LEARNING_RATE: f64 = 10.0;
    pub const MAX_SIGNAL_POINTS: usize = 10_000_000;
    pub const MAX_EPOCHS: usize = 100_000;
}
