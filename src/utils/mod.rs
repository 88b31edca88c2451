//! Common utilities: numeric helpers, shape checks and the seedable random source

pub mod bounds;
pub mod numeric;
pub mod random;

pub use bounds::check_same_length;
pub use numeric::{linspace, max_abs, mean_squared_error, rms};
pub use random::RandomSource;
