//! Generator configuration.

use super::{Generator, OctavePairs, RandomTones, ToneGrid};
use crate::Result;
use crate::envelopes::FadeCurve;
use serde::{Deserialize, Serialize};

/// What a generator produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Policy {
    /// Randomized tones blended with mixup
    Random(RandomTones),
    /// Deterministic frequency × level grid
    Grid(ToneGrid),
    /// 400 Hz / 200 Hz octave pairs
    OctavePairs(OctavePairs),
}

impl Policy {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Random(_) => "random",
            Policy::Grid(_) => "grid",
            Policy::OctavePairs(_) => "octave_pairs",
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Policy::Random(RandomTones::default())
    }
}

impl From<RandomTones> for Policy {
    fn from(tones: RandomTones) -> Self {
        Policy::Random(tones)
    }
}

impl From<ToneGrid> for Policy {
    fn from(grid: ToneGrid) -> Self {
        Policy::Grid(grid)
    }
}

impl From<OctavePairs> for Policy {
    fn from(pairs: OctavePairs) -> Self {
        Policy::OctavePairs(pairs)
    }
}

/// Everything needed to build a [`Generator`].
///
/// Missing fields deserialize to their defaults, so a config file only has
/// to name what it changes.
///
/// # Examples
///
/// ```
/// use audible_sines::{GeneratorConfig, ToneGrid};
///
/// let config = GeneratorConfig::default()
///     .with_sample_rate(16000)
///     .with_sample_duration(0.5)
///     .with_fade_duration(0.05)
///     .with_policy(ToneGrid::new(vec![440.0, 880.0], vec![0.0, -6.0]))
///     .with_seed(17);
///
/// let mut generator = config.build()?;
/// assert_eq!(generator.sample_len(), 8000);
/// assert_eq!(generator.iter().count(), 4);
/// # Ok::<(), audible_sines::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Sample length in seconds, truncated to whole samples
    pub sample_duration: f64,
    /// Length of each fade in seconds, rounded to whole samples
    pub fade_duration: f64,
    /// Shape of the fades
    pub fade_curve: FadeCurve,
    /// Seed for the generator's random source; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// What to generate
    pub policy: Policy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            sample_duration: 2.0,
            fade_duration: 0.2,
            fade_curve: FadeCurve::Linear,
            seed: None,
            policy: Policy::default(),
        }
    }
}

impl GeneratorConfig {
    /// Default random policy: 100 mixup examples per pass.
    pub fn random() -> Self {
        Self::default()
    }

    /// Default validation grid: 20 log-spaced frequencies × 5 levels.
    pub fn grid() -> Self {
        Self::default().with_policy(ToneGrid::default())
    }

    /// Default test grid: 60, 120, 600 and 2000 Hz at 0, -12 and -14 dB.
    pub fn test_grid() -> Self {
        Self::default().with_policy(ToneGrid::test_set())
    }

    /// Octave pairs at 50 random phases per level.
    pub fn octave_pairs() -> Self {
        Self::default().with_policy(OctavePairs::default())
    }

    /// Octave pairs at 50 evenly spaced phases per level.
    pub fn octave_sweep() -> Self {
        Self::default().with_policy(OctavePairs::sweep(OctavePairs::DEFAULT_PHASES))
    }

    /// Sets the sample rate in Hz.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Sets the sample length in seconds.
    pub fn with_sample_duration(mut self, seconds: f64) -> Self {
        self.sample_duration = seconds;
        self
    }

    /// Sets the length of each fade in seconds.
    pub fn with_fade_duration(mut self, seconds: f64) -> Self {
        self.fade_duration = seconds;
        self
    }

    /// Sets the fade shape.
    pub fn with_fade_curve(mut self, curve: FadeCurve) -> Self {
        self.fade_curve = curve;
        self
    }

    /// Seeds the generator's random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the generation policy.
    pub fn with_policy(mut self, policy: impl Into<Policy>) -> Self {
        self.policy = policy.into();
        self
    }

    /// Validates the config and builds a generator from a copy of it.
    pub fn build(&self) -> Result<Generator> {
        Generator::new(self.clone())
    }
}
