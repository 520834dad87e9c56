//! Fixed-length fade-in / sustain / fade-out window.

use super::FadeCurve;
use crate::{Error, Result};
use ndarray::Array1;

/// Amplitude envelope for a fixed-length sample.
///
/// The window is `fade_len` samples rising from 0 to 1, a sustain segment
/// of ones, and `fade_len` samples falling back from 1 to 0. Its length is
/// always the configured sample length.
///
/// # Examples
///
/// ```
/// use audible_sines::envelopes::Window;
///
/// // 2 s at 44.1 kHz with 0.2 s fades
/// let window = Window::new(44100, 2.0, 0.2)?;
/// assert_eq!(window.len(), 88200);
/// assert_eq!(window.fade_len(), 8820);
/// assert_eq!(window.values()[0], 0.0);
/// assert_eq!(window.values()[44100], 1.0);
/// # Ok::<(), audible_sines::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    values: Array1<f64>,
    fade_len: usize,
    sample_rate: u32,
}

impl Window {
    /// Builds a window with linear fades.
    ///
    /// # Arguments
    ///
    /// * `sample_rate` - Sample rate in Hz
    /// * `sample_duration` - Sample length in seconds, truncated to whole samples
    /// * `fade_duration` - Length of each fade in seconds, rounded to whole samples
    ///
    /// # Errors
    ///
    /// Fails when the sample would be empty or too long to allocate, or when
    /// the two fades together are longer than the sample.
    pub fn new(sample_rate: u32, sample_duration: f64, fade_duration: f64) -> Result<Self> {
        Self::with_curve(sample_rate, sample_duration, fade_duration, FadeCurve::Linear)
    }

    /// Builds a window whose fades follow `curve`.
    pub fn with_curve(
        sample_rate: u32,
        sample_duration: f64,
        fade_duration: f64,
        curve: FadeCurve,
    ) -> Result<Self> {
        let len = sample_count(sample_rate, sample_duration)?;

        if !fade_duration.is_finite() || fade_duration < 0.0 {
            return Err(Error::InvalidFade(fade_duration));
        }
        let fade_len = (f64::from(sample_rate) * fade_duration).round() as usize;
        if fade_len.saturating_mul(2) > len {
            return Err(Error::FadeTooLong { fade: fade_len, len });
        }

        let sustain = len - 2 * fade_len;
        let values: Array1<f64> = curve
            .ramp(fade_len)
            .chain(std::iter::repeat_n(1.0, sustain))
            .chain(curve.ramp(fade_len).rev())
            .collect();
        debug_assert_eq!(values.len(), len);

        Ok(Self {
            values,
            fade_len,
            sample_rate,
        })
    }

    /// Number of samples in the window.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: construction rejects empty samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of samples in each of the two fades.
    pub fn fade_len(&self) -> usize {
        self.fade_len
    }

    /// Sample rate the window was built for.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// The envelope values, each in `[0, 1]`.
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Multiplies `sample` by the window in place.
    ///
    /// # Panics
    ///
    /// Panics if `sample` is not exactly [`len`](Window::len) samples long.
    pub fn apply(&self, sample: &mut Array1<f64>) {
        assert_eq!(
            sample.len(),
            self.len(),
            "sample length does not match window length"
        );
        *sample *= &self.values;
    }
}

/// Largest sample length that fits in a single `f64` allocation.
const MAX_SAMPLE_LEN: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// Converts a duration to a whole number of samples, truncating.
pub(crate) fn sample_count(sample_rate: u32, duration: f64) -> Result<usize> {
    if sample_rate == 0 {
        return Err(Error::ZeroSampleRate);
    }
    if !duration.is_finite() || duration <= 0.0 {
        return Err(Error::InvalidDuration(duration));
    }
    let samples = f64::from(sample_rate) * duration;
    if samples > MAX_SAMPLE_LEN as f64 {
        return Err(Error::SampleTooLong {
            sample_rate,
            duration,
        });
    }
    let len = samples as usize;
    if len == 0 {
        return Err(Error::EmptySample {
            sample_rate,
            duration,
        });
    }
    Ok(len)
}
