//! Sine oscillator and the fixed-length tone synthesizer.

use crate::Signal;
use ndarray::Array1;
use std::f64::consts::TAU;

/// A phase-accumulating sine oscillator.
///
/// Sample `n` is `sin(2π·f·n/sr + φ)` where `φ` is the start phase. The phase
/// is tracked as a fraction of a cycle in `[0, 1)` so it stays precise over
/// long renders.
#[derive(Debug, Clone, PartialEq)]
pub struct SineOscillator {
    /// Current phase as a cycle fraction (0.0 to 1.0)
    phase: f64,
    /// Cycles advanced per sample (frequency / sample_rate)
    phase_increment: f64,
    sample_rate: u32,
}

impl SineOscillator {
    /// Creates a sine oscillator starting at phase 0.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Frequency in Hz
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Examples
    ///
    /// ```
    /// use audible_sines::{Signal, SineOscillator};
    ///
    /// let mut osc = SineOscillator::new(440.0, 44100);
    /// assert_eq!(osc.next_sample(), 0.0);
    /// ```
    pub fn new(frequency: f64, sample_rate: u32) -> Self {
        Self {
            phase: 0.0,
            phase_increment: frequency / f64::from(sample_rate),
            sample_rate,
        }
    }

    /// Sets the start phase in radians. Any real value is accepted and
    /// wrapped into one cycle.
    ///
    /// # Examples
    ///
    /// ```
    /// use audible_sines::{Signal, SineOscillator};
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// let mut osc = SineOscillator::new(100.0, 44100).with_phase(FRAC_PI_2);
    /// assert!((osc.next_sample() - 1.0).abs() < 1e-12);
    /// ```
    pub fn with_phase(mut self, radians: f64) -> Self {
        let cycles = (radians / TAU).rem_euclid(1.0);
        // rem_euclid rounds tiny negative inputs up to exactly 1.0
        self.phase = if cycles >= 1.0 { 0.0 } else { cycles };
        self
    }

    /// Frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.phase_increment * f64::from(self.sample_rate)
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl Signal for SineOscillator {
    fn next_sample(&mut self) -> f64 {
        let sample = (self.phase * TAU).sin();

        self.phase += self.phase_increment;
        if self.phase >= 1.0 {
            self.phase = self.phase.fract();
        }

        sample
    }
}

/// Synthesizes `len` samples of `sin(2π·frequency·t/sample_rate + phase)`.
///
/// Pure: the same arguments always produce the same tone.
///
/// # Examples
///
/// ```
/// use audible_sines::tone;
///
/// // A quarter of the sample rate hits the crest on the second sample.
/// let t = tone(11025.0, 44100, 4, 0.0);
/// assert_eq!(t[1], 1.0);
/// ```
pub fn tone(frequency: f64, sample_rate: u32, len: usize, phase: f64) -> Array1<f64> {
    SineOscillator::new(frequency, sample_rate)
        .with_phase(phase)
        .render(len)
}
