//! Decibel levels and peak measurement.
//!
//! Levels are in dBFS: 0 dB is a full-scale sine with amplitude 1.0.

use ndarray::{ArrayBase, Data, Ix1};

/// Converts a level in decibels to a linear amplitude, `10^(db/20)`.
///
/// # Examples
///
/// ```
/// use audible_sines::level::db_to_amplitude;
///
/// assert_eq!(db_to_amplitude(0.0), 1.0);
/// assert!((db_to_amplitude(-20.0) - 0.1).abs() < 1e-12);
/// ```
pub fn db_to_amplitude(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Converts a linear amplitude to decibels, `20·log10(amplitude)`.
///
/// Silence maps to negative infinity.
pub fn amplitude_to_db(amplitude: f64) -> f64 {
    20.0 * amplitude.log10()
}

/// Largest absolute sample value.
pub fn peak<S: Data<Elem = f64>>(sample: &ArrayBase<S, Ix1>) -> f64 {
    sample.iter().fold(0.0_f64, |peak, s| peak.max(s.abs()))
}

/// Peak level of a sample in decibels.
///
/// # Examples
///
/// ```
/// use audible_sines::level::peak_db;
/// use ndarray::array;
///
/// assert!((peak_db(&array![0.0, -0.5, 0.25]) + 6.0206).abs() < 1e-4);
/// ```
pub fn peak_db<S: Data<Elem = f64>>(sample: &ArrayBase<S, Ix1>) -> f64 {
    amplitude_to_db(peak(sample))
}
