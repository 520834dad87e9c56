//! Pull-based signal trait.
//!
//! Every tone in this crate is produced by pulling samples from a `Signal`
//! until a fixed-length buffer is full.

use ndarray::Array1;

/// Common interface for sample sources.
///
/// The trait provides three operations:
/// - Single sample generation via `next_sample()`
/// - In-place buffer filling via `process()`
/// - Owned fixed-length rendering via `render()`
pub trait Signal {
    /// Generates the next sample from the signal.
    ///
    /// # Returns
    ///
    /// A sample value, typically between -1.0 and 1.0 for audio signals
    fn next_sample(&mut self) -> f64;

    /// Generates multiple samples into a buffer.
    ///
    /// Default implementation calls `next_sample()` for each element.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Mutable slice to fill with samples
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// Renders the next `len` samples into a new array.
    ///
    /// # Examples
    ///
    /// ```
    /// use audible_sines::{Signal, SineOscillator};
    ///
    /// let mut osc = SineOscillator::new(441.0, 44100);
    /// let tone = osc.render(100);
    /// assert_eq!(tone.len(), 100);
    /// ```
    fn render(&mut self, len: usize) -> Array1<f64> {
        Array1::from_shape_fn(len, |_| self.next_sample())
    }
}
