//! Octave pairs for octave-relationship training and validation.

use super::grid::DEFAULT_LEVELS_DB;
use super::{Example, ExampleSource, check_frequency, check_level, check_non_empty, render_tone};
use crate::envelopes::Window;
use crate::{Error, Result};
use rand::Rng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Weibull};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Start phase of the upper tone of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Drawn uniformly from `[0, 2π)` every time the entry is visited
    Random,
    /// Fixed phase in radians
    Fixed(f64),
}

impl Phase {
    fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        match self {
            Phase::Random => random_phase(rng),
            Phase::Fixed(radians) => radians,
        }
    }
}

fn random_phase<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..TAU)
}

/// Level shared by both tones of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairLevel {
    /// `-40 dB · u` with `u` drawn from the policy's Weibull every time the
    /// entry is visited
    Random,
    /// Fixed level in dBFS
    Fixed(f64),
}

impl From<f64> for PairLevel {
    fn from(db: f64) -> Self {
        PairLevel::Fixed(db)
    }
}

/// Octave-pair policy.
///
/// For each level and each phase (level-major) the generator yields a pair:
/// the upper tone at `upper_freq` starting at that phase, and the lower tone
/// at `lower_freq` with its own uniformly random phase. Both share the level
/// and the window.
///
/// # Examples
///
/// ```
/// use audible_sines::{GeneratorConfig, OctavePairs, PairLevel};
///
/// let pairs = OctavePairs::sweep(4).with_levels([PairLevel::Fixed(0.0), PairLevel::Random]);
/// let mut generator = GeneratorConfig::default()
///     .with_sample_rate(8000)
///     .with_sample_duration(0.1)
///     .with_fade_duration(0.01)
///     .with_policy(pairs)
///     .build()?;
///
/// let pairs: Vec<_> = generator.iter().collect();
/// assert_eq!(pairs.len(), 8);
/// assert!(pairs.iter().all(|p| p.is_pair()));
/// # Ok::<(), audible_sines::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctavePairs {
    /// Levels of the pairs
    pub levels: Vec<PairLevel>,
    /// Start phases of the upper tone
    pub phases: Vec<Phase>,
    /// Upper tone frequency in Hz
    pub upper_freq: f64,
    /// Lower tone frequency in Hz
    pub lower_freq: f64,
    /// Weibull scale of random levels
    pub random_level_scale: f64,
    /// Weibull shape of random levels
    pub random_level_shape: f64,
}

impl Default for OctavePairs {
    /// 50 random phases at each of the default grid levels, 400 Hz over 200 Hz.
    fn default() -> Self {
        Self {
            levels: DEFAULT_LEVELS_DB.iter().copied().map(PairLevel::Fixed).collect(),
            phases: vec![Phase::Random; Self::DEFAULT_PHASES],
            upper_freq: 400.0,
            lower_freq: 200.0,
            random_level_scale: 0.25,
            random_level_shape: 1.48,
        }
    }
}

impl OctavePairs {
    /// Number of phases per level in the default and sweep policies.
    pub const DEFAULT_PHASES: usize = 50;

    /// Level reached by a random level draw of 1.
    pub const RANDOM_LEVEL_SPAN_DB: f64 = -40.0;

    /// `steps` fixed phases evenly spaced over `[0, 2π)`, end point excluded.
    pub fn sweep(steps: usize) -> Self {
        let phases = (0..steps)
            .map(|i| Phase::Fixed(TAU * i as f64 / steps as f64))
            .collect();
        Self::default().with_phases(phases)
    }

    /// Replaces the levels. Plain numbers are fixed levels in dBFS.
    pub fn with_levels<L: Into<PairLevel>>(mut self, levels: impl IntoIterator<Item = L>) -> Self {
        self.levels = levels.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the phases.
    pub fn with_phases(mut self, phases: Vec<Phase>) -> Self {
        self.phases = phases;
        self
    }

    /// Sets the two tone frequencies.
    pub fn with_frequencies(mut self, upper_freq: f64, lower_freq: f64) -> Self {
        self.upper_freq = upper_freq;
        self.lower_freq = lower_freq;
        self
    }

    /// Sets the Weibull parameters of random levels.
    pub fn with_random_level_distribution(mut self, scale: f64, shape: f64) -> Self {
        self.random_level_scale = scale;
        self.random_level_shape = shape;
        self
    }

    /// Validates the policy and builds its sampling state.
    pub(crate) fn prepare(&self) -> Result<OctaveSource> {
        check_non_empty(&self.levels, "level")?;
        check_non_empty(&self.phases, "phase")?;
        check_frequency(self.upper_freq)?;
        check_frequency(self.lower_freq)?;
        self.levels.iter().try_for_each(|level| match level {
            PairLevel::Fixed(db) => check_level(*db),
            PairLevel::Random => Ok(()),
        })?;
        self.phases.iter().try_for_each(|phase| match phase {
            Phase::Fixed(radians) if !radians.is_finite() => Err(Error::InvalidPhase(*radians)),
            _ => Ok(()),
        })?;

        let invalid_shape = Error::InvalidLevelDistribution {
            scale: self.random_level_scale,
            shape: self.random_level_shape,
        };
        if !self.random_level_scale.is_finite() || !self.random_level_shape.is_finite() {
            return Err(invalid_shape);
        }
        let level_weibull = Weibull::new(self.random_level_scale, self.random_level_shape)
            .map_err(|_| invalid_shape)?;

        Ok(OctaveSource {
            pairs: self.clone(),
            level_weibull,
        })
    }
}

/// Validated sampling state of an [`OctavePairs`] policy.
#[derive(Debug, Clone)]
pub(crate) struct OctaveSource {
    pairs: OctavePairs,
    level_weibull: Weibull<f64>,
}

impl OctaveSource {
    fn resolve_level<R: Rng + ?Sized>(&self, level: PairLevel, rng: &mut R) -> f64 {
        match level {
            PairLevel::Random => OctavePairs::RANDOM_LEVEL_SPAN_DB * self.level_weibull.sample(rng),
            PairLevel::Fixed(db) => db,
        }
    }
}

impl ExampleSource for OctaveSource {
    fn len(&self) -> usize {
        self.pairs.levels.len() * self.pairs.phases.len()
    }

    fn example(&self, index: usize, window: &Window, rng: &mut StdRng) -> Example {
        let phases = &self.pairs.phases;
        let level = self.resolve_level(self.pairs.levels[index / phases.len()], rng);
        let phase = phases[index % phases.len()].resolve(rng);
        let upper = render_tone(window, self.pairs.upper_freq, level, phase);
        let lower = render_tone(window, self.pairs.lower_freq, level, random_phase(rng));
        Example::Pair { upper, lower }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::peak_db;
    use crate::oscillators::tone;
    use rand::SeedableRng;

    fn source(pairs: OctavePairs) -> OctaveSource {
        pairs.prepare().unwrap()
    }

    #[test]
    fn test_defaults() {
        let pairs = OctavePairs::default();
        assert_eq!(pairs.phases.len(), 50);
        assert!(pairs.phases.iter().all(|p| *p == Phase::Random));
        assert_eq!(pairs.levels[2], PairLevel::Fixed(-9.0));
        assert_eq!((pairs.upper_freq, pairs.lower_freq), (400.0, 200.0));
        assert_eq!(source(pairs).len(), 250);
    }

    #[test]
    fn test_sweep_excludes_end_point() {
        let pairs = OctavePairs::sweep(4);
        let expected: Vec<Phase> = [0.0, 0.25, 0.5, 0.75]
            .iter()
            .map(|f| Phase::Fixed(f * TAU))
            .collect();
        assert_eq!(pairs.phases, expected);
    }

    #[test]
    fn test_upper_tone_uses_fixed_phase() {
        let window = Window::new(8000, 0.1, 0.0).unwrap();
        let pairs = source(OctavePairs::sweep(4).with_levels([0.0]));
        let mut rng = StdRng::seed_from_u64(9);

        let example = pairs.example(1, &window, &mut rng);
        let (upper, lower) = example.into_pair().unwrap();
        assert_eq!(upper, tone(400.0, 8000, 800, TAU * 0.25));
        assert_eq!(lower.len(), 800);
    }

    #[test]
    fn test_random_phases_differ_between_visits() {
        let window = Window::new(8000, 0.1, 0.0).unwrap();
        let pairs = source(OctavePairs::default());
        let mut rng = StdRng::seed_from_u64(9);
        let first = pairs.example(0, &window, &mut rng);
        let second = pairs.example(0, &window, &mut rng);
        assert_ne!(first, second);
    }

    #[test]
    fn test_random_levels_are_drawn_per_visit() {
        let window = Window::new(8000, 0.1, 0.01).unwrap();
        let pairs = source(OctavePairs::sweep(1).with_levels([PairLevel::Random]));
        let mut rng = StdRng::seed_from_u64(5);

        // the fixed-phase 400 Hz tone lands on its crest, so its peak is the level
        let levels: Vec<f64> = (0..200)
            .map(|_| {
                let (upper, _) = pairs.example(0, &window, &mut rng).into_pair().unwrap();
                peak_db(&upper)
            })
            .collect();

        assert!(levels.iter().all(|db| *db <= 1e-8), "level above full scale");
        assert!(levels.windows(2).all(|w| (w[0] - w[1]).abs() > 1e-9));
        // The Weibull(0.25, 1.48) median is ~0.195, i.e. about -7.8 dB
        let quieter = levels.iter().filter(|db| **db < -7.8).count();
        assert!((60..140).contains(&quieter), "{quieter} of 200 below the median");
    }

    #[test]
    fn test_pair_shares_its_level() {
        let window = Window::new(8000, 0.1, 0.01).unwrap();
        let pairs = source(OctavePairs::sweep(1).with_levels([PairLevel::Random]));
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let (upper, lower) = pairs.example(0, &window, &mut rng).into_pair().unwrap();
            // 40 samples per 200 Hz cycle miss the crest by at most π/40
            assert!((peak_db(&upper) - peak_db(&lower)).abs() < 0.05);
        }
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            OctavePairs::default().with_phases(vec![]).prepare().unwrap_err(),
            Error::EmptyList("phase")
        );
        assert_eq!(
            OctavePairs::default()
                .with_phases(vec![Phase::Fixed(f64::INFINITY)])
                .prepare()
                .unwrap_err(),
            Error::InvalidPhase(f64::INFINITY)
        );
        assert_eq!(
            OctavePairs::default()
                .with_levels([f64::NEG_INFINITY])
                .prepare()
                .unwrap_err(),
            Error::InvalidLevel(f64::NEG_INFINITY)
        );
        assert_eq!(
            OctavePairs::default()
                .with_frequencies(400.0, 0.0)
                .prepare()
                .unwrap_err(),
            Error::InvalidFrequency(0.0)
        );
        assert_eq!(
            OctavePairs::default()
                .with_random_level_distribution(0.0, 1.48)
                .prepare()
                .unwrap_err(),
            Error::InvalidLevelDistribution { scale: 0.0, shape: 1.48 }
        );
        assert!(OctavePairs::sweep(50).prepare().is_ok());
    }

    #[test]
    fn test_levels_from_json() {
        let pairs: OctavePairs =
            serde_json::from_str(r#"{ "levels": [{ "fixed": -6.0 }, "random"], "phases": ["random"] }"#)
                .unwrap();
        assert_eq!(pairs.levels, vec![PairLevel::Fixed(-6.0), PairLevel::Random]);
        assert_eq!(pairs.upper_freq, 400.0);
    }
}
