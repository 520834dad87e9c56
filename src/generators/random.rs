//! Randomized tones with mixup.

use super::{Example, ExampleSource, Sample, check_frequency, check_level, render_tone};
use crate::envelopes::Window;
use crate::mixup::Mixup;
use crate::{Error, Result};
use rand::Rng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Weibull};
use serde::{Deserialize, Serialize};

/// Random policy: each example blends two independently drawn tones.
///
/// For every tone:
/// 1. `u ~ Weibull(frequency_scale, frequency_shape)`; the frequency is
///    `exp(ln(min_freq) + u·(ln(max_freq) - ln(min_freq)))`. With the default
///    shape most tones sit in the lower decades, and since `u` is not bounded
///    above a draw occasionally lands above `max_freq`.
/// 2. The level is uniform in `[min_level_db, max_level_db]`.
/// 3. The tone is rendered at phase 0, scaled to the level and windowed.
///
/// Two such tones `a` and `b` are then mixed as `λ·a + (1 - λ)·b` with
/// `λ ~ Beta(mixup_alpha, mixup_alpha)`.
///
/// # Examples
///
/// ```
/// use audible_sines::{GeneratorConfig, RandomTones};
///
/// let tones = RandomTones::default()
///     .with_epoch_size(3)
///     .with_frequency_range(100.0, 1000.0)
///     .with_level_range(-20.0, -6.0);
/// let mut generator = GeneratorConfig::default()
///     .with_sample_rate(8000)
///     .with_sample_duration(0.1)
///     .with_fade_duration(0.01)
///     .with_policy(tones)
///     .build()?;
/// assert_eq!(generator.iter().count(), 3);
/// # Ok::<(), audible_sines::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomTones {
    /// Examples per pass
    pub epoch_size: usize,
    /// Lower frequency bound in Hz
    pub min_freq: f64,
    /// Upper frequency bound in Hz
    pub max_freq: f64,
    /// Lower level bound in dBFS
    pub min_level_db: f64,
    /// Upper level bound in dBFS
    pub max_level_db: f64,
    /// Beta shape for the mixup weight
    pub mixup_alpha: f64,
    /// Weibull scale of the normalized log-frequency draw
    pub frequency_scale: f64,
    /// Weibull shape of the normalized log-frequency draw
    pub frequency_shape: f64,
}

impl Default for RandomTones {
    fn default() -> Self {
        Self {
            epoch_size: 100,
            min_freq: 20.0,
            max_freq: 20000.0,
            min_level_db: -14.0,
            max_level_db: 0.0,
            mixup_alpha: 0.05,
            frequency_scale: 0.25,
            frequency_shape: 1.48,
        }
    }
}

impl RandomTones {
    /// Defaults with the wider -40 to 0 dB level range.
    pub fn wide_range() -> Self {
        Self::default().with_level_range(-40.0, 0.0)
    }

    /// Sets the number of examples per pass.
    pub fn with_epoch_size(mut self, epoch_size: usize) -> Self {
        self.epoch_size = epoch_size;
        self
    }

    /// Sets the frequency bounds in Hz.
    pub fn with_frequency_range(mut self, min_freq: f64, max_freq: f64) -> Self {
        self.min_freq = min_freq;
        self.max_freq = max_freq;
        self
    }

    /// Sets the level bounds in dBFS.
    pub fn with_level_range(mut self, min_db: f64, max_db: f64) -> Self {
        self.min_level_db = min_db;
        self.max_level_db = max_db;
        self
    }

    /// Sets the mixup Beta shape.
    pub fn with_mixup_alpha(mut self, alpha: f64) -> Self {
        self.mixup_alpha = alpha;
        self
    }

    /// Sets the Weibull parameters of the log-frequency draw.
    pub fn with_frequency_distribution(mut self, scale: f64, shape: f64) -> Self {
        self.frequency_scale = scale;
        self.frequency_shape = shape;
        self
    }

    /// Validates the policy and builds its sampling state.
    pub(crate) fn prepare(&self) -> Result<RandomSource> {
        check_frequency(self.min_freq)?;
        check_frequency(self.max_freq)?;
        if self.min_freq > self.max_freq {
            return Err(Error::InvertedFrequencyRange {
                min: self.min_freq,
                max: self.max_freq,
            });
        }
        check_level(self.min_level_db)?;
        check_level(self.max_level_db)?;
        if self.min_level_db > self.max_level_db {
            return Err(Error::InvertedLevelRange {
                min: self.min_level_db,
                max: self.max_level_db,
            });
        }
        let invalid_shape = Error::InvalidFrequencyDistribution {
            scale: self.frequency_scale,
            shape: self.frequency_shape,
        };
        if !self.frequency_scale.is_finite() || !self.frequency_shape.is_finite() {
            return Err(invalid_shape);
        }
        let weibull =
            Weibull::new(self.frequency_scale, self.frequency_shape).map_err(|_| invalid_shape)?;

        Ok(RandomSource {
            epoch_size: self.epoch_size,
            log_min: self.min_freq.ln(),
            log_max: self.max_freq.ln(),
            min_level_db: self.min_level_db,
            max_level_db: self.max_level_db,
            weibull,
            mixup: Mixup::new(self.mixup_alpha)?,
        })
    }
}

/// Validated sampling state of a [`RandomTones`] policy.
#[derive(Debug, Clone)]
pub(crate) struct RandomSource {
    epoch_size: usize,
    log_min: f64,
    log_max: f64,
    min_level_db: f64,
    max_level_db: f64,
    weibull: Weibull<f64>,
    mixup: Mixup,
}

impl RandomSource {
    pub(crate) fn draw_frequency<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u = self.weibull.sample(rng);
        (self.log_min + u * (self.log_max - self.log_min)).exp()
    }

    pub(crate) fn draw_level<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min_level_db..=self.max_level_db)
    }

    /// One unmixed tone.
    pub(crate) fn draw_tone<R: Rng + ?Sized>(&self, window: &Window, rng: &mut R) -> Sample {
        let frequency = self.draw_frequency(rng);
        let level = self.draw_level(rng);
        render_tone(window, frequency, level, 0.0)
    }
}

impl ExampleSource for RandomSource {
    fn len(&self) -> usize {
        self.epoch_size
    }

    fn example(&self, _index: usize, window: &Window, rng: &mut StdRng) -> Example {
        let a = self.draw_tone(window, rng);
        let b = self.draw_tone(window, rng);
        Example::Mono(self.mixup.apply(rng, a, b))
    }
}
