//! Filter and signal persistence formats

pub mod filter_store;
pub mod signal_store;

pub use filter_store::{load_filter_file, save_filter_file, FilterSnapshot, PersistedWeight};
pub use signal_store::{decode_signal, encode_signal, load_signal_file, save_signal_file};
