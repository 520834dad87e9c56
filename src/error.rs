//! Error type for generator and data module construction.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration errors.
///
/// Generation itself never fails: every precondition is checked when a
/// [`Window`](crate::envelopes::Window), [`Mixup`](crate::mixup::Mixup),
/// [`Generator`](crate::generators::Generator) or
/// [`DataModule`](crate::dataset::DataModule) is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("sample rate must be greater than zero")]
    ZeroSampleRate,

    #[error("sample duration must be positive and finite, got {0} s")]
    InvalidDuration(f64),

    #[error("a {duration} s sample at {sample_rate} Hz contains no samples")]
    EmptySample { sample_rate: u32, duration: f64 },

    #[error("a {duration} s sample at {sample_rate} Hz is too long to allocate")]
    SampleTooLong { sample_rate: u32, duration: f64 },

    #[error("fade duration must be non-negative and finite, got {0} s")]
    InvalidFade(f64),

    #[error("fades of {fade} samples on each side do not fit in a {len}-sample window")]
    FadeTooLong { fade: usize, len: usize },

    #[error("frequency must be positive and finite, got {0} Hz")]
    InvalidFrequency(f64),

    #[error("frequency range is inverted: {min} Hz > {max} Hz")]
    InvertedFrequencyRange { min: f64, max: f64 },

    #[error("frequency distribution needs a positive finite scale and shape, got Weibull({scale}, {shape})")]
    InvalidFrequencyDistribution { scale: f64, shape: f64 },

    #[error("random levels need a positive finite scale and shape, got Weibull({scale}, {shape})")]
    InvalidLevelDistribution { scale: f64, shape: f64 },

    #[error("level must be finite, got {0} dB")]
    InvalidLevel(f64),

    #[error("level range is inverted: {min} dB > {max} dB")]
    InvertedLevelRange { min: f64, max: f64 },

    #[error("phase must be finite, got {0} rad")]
    InvalidPhase(f64),

    #[error("{0} list is empty")]
    EmptyList(&'static str),

    #[error("mixup alpha must be positive and finite, got {0}")]
    InvalidMixupAlpha(f64),

    #[error("batch size must be at least 1")]
    ZeroBatchSize,

    #[error("data module has not been set up")]
    NotSetUp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = Error::FadeTooLong { fade: 600, len: 1000 };
        assert_eq!(
            err.to_string(),
            "fades of 600 samples on each side do not fit in a 1000-sample window"
        );

        let err = Error::InvalidLevel(f64::INFINITY);
        assert!(err.to_string().contains("inf dB"));
    }

    #[test]
    fn test_empty_list_names_the_list() {
        assert_eq!(Error::EmptyList("frequency").to_string(), "frequency list is empty");
    }
}
