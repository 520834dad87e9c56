//! Deterministic frequency × level grid.

use super::{Example, ExampleSource, check_frequency, check_level, check_non_empty, render_tone};
use crate::Result;
use crate::envelopes::Window;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Levels used by the default validation grid, in dBFS.
pub(crate) const DEFAULT_LEVELS_DB: [f64; 5] = [0.0, -3.0, -9.0, -20.0, -30.0];

/// `steps` frequencies spaced evenly in log-frequency, starting at `min`
/// and stopping one step short of `max`.
///
/// # Examples
///
/// ```
/// use audible_sines::log_frequencies;
///
/// let freqs = log_frequencies(20.0, 20000.0, 3);
/// assert!((freqs[0] - 20.0).abs() < 1e-9);
/// assert!((freqs[1] - 200.0).abs() < 1e-9);
/// assert!((freqs[2] - 2000.0).abs() < 1e-9);
/// ```
pub fn log_frequencies(min: f64, max: f64, steps: usize) -> Vec<f64> {
    let (log_min, log_max) = (min.ln(), max.ln());
    (0..steps)
        .map(|i| (i as f64 * (log_max - log_min) / steps as f64 + log_min).exp())
        .collect()
}

/// Grid policy: every frequency at every level, phase 0.
///
/// Examples run frequency-major: all levels of the first frequency, then all
/// levels of the second, and so on. Every pass is identical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneGrid {
    /// Frequencies in Hz
    pub frequencies: Vec<f64>,
    /// Levels in dBFS
    pub levels_db: Vec<f64>,
}

impl Default for ToneGrid {
    /// 20 log-spaced frequencies from 20 Hz toward 20 kHz at 0, -3, -9, -20
    /// and -30 dB.
    fn default() -> Self {
        Self {
            frequencies: log_frequencies(20.0, 20000.0, 20),
            levels_db: DEFAULT_LEVELS_DB.to_vec(),
        }
    }
}

impl ToneGrid {
    /// Creates a grid from explicit frequencies and levels.
    pub fn new(frequencies: Vec<f64>, levels_db: Vec<f64>) -> Self {
        Self {
            frequencies,
            levels_db,
        }
    }

    /// The held-out test grid: 60, 120, 600 and 2000 Hz at 0, -12 and -14 dB.
    pub fn test_set() -> Self {
        Self::new(vec![60.0, 120.0, 600.0, 2000.0], vec![0.0, -12.0, -14.0])
    }

    /// The `(frequency, level)` pair rendered at `index`.
    pub fn point(&self, index: usize) -> Option<(f64, f64)> {
        let levels = self.levels_db.len();
        if levels == 0 {
            return None;
        }
        let frequency = *self.frequencies.get(index / levels)?;
        Some((frequency, self.levels_db[index % levels]))
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_non_empty(&self.frequencies, "frequency")?;
        check_non_empty(&self.levels_db, "level")?;
        self.frequencies.iter().try_for_each(|&f| check_frequency(f))?;
        self.levels_db.iter().try_for_each(|&db| check_level(db))
    }
}

impl ExampleSource for ToneGrid {
    fn len(&self) -> usize {
        self.frequencies.len() * self.levels_db.len()
    }

    fn example(&self, index: usize, window: &Window, _rng: &mut StdRng) -> Example {
        let frequency = self.frequencies[index / self.levels_db.len()];
        let level = self.levels_db[index % self.levels_db.len()];
        Example::Mono(render_tone(window, frequency, level, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::level::peak_db;
    use rand::SeedableRng;

    #[test]
    fn test_default_frequencies() {
        let grid = ToneGrid::default();
        assert_eq!(grid.frequencies.len(), 20);
        assert!((grid.frequencies[0] - 20.0).abs() < 1e-9);
        // 20 · 1000^(19/20)
        assert!((grid.frequencies[19] - 14158.9).abs() < 0.1);
        assert!(grid.frequencies.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(grid.levels_db, vec![0.0, -3.0, -9.0, -20.0, -30.0]);
        assert_eq!(grid.len(), 100);
    }

    #[test]
    fn test_points_are_frequency_major() {
        let grid = ToneGrid::new(vec![100.0, 200.0], vec![0.0, -6.0, -12.0]);
        let points: Vec<_> = (0..grid.len()).map(|i| grid.point(i).unwrap()).collect();
        assert_eq!(
            points,
            vec![
                (100.0, 0.0),
                (100.0, -6.0),
                (100.0, -12.0),
                (200.0, 0.0),
                (200.0, -6.0),
                (200.0, -12.0),
            ]
        );
        assert_eq!(grid.point(6), None);
    }

    #[test]
    fn test_validation() {
        assert_eq!(ToneGrid::new(vec![], vec![0.0]).validate(), Err(Error::EmptyList("frequency")));
        assert_eq!(ToneGrid::new(vec![100.0], vec![]).validate(), Err(Error::EmptyList("level")));
        assert_eq!(
            ToneGrid::new(vec![100.0, -5.0], vec![0.0]).validate(),
            Err(Error::InvalidFrequency(-5.0))
        );
        assert_eq!(
            ToneGrid::new(vec![100.0], vec![0.0, f64::NEG_INFINITY]).validate(),
            Err(Error::InvalidLevel(f64::NEG_INFINITY))
        );
        assert_eq!(ToneGrid::test_set().validate(), Ok(()));
    }

    #[test]
    fn test_levels_above_full_scale() {
        let grid = ToneGrid::new(vec![2000.0], vec![6.0]);
        assert_eq!(grid.validate(), Ok(()));

        let window = Window::new(8000, 0.1, 0.01).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let sample = grid.example(0, &window, &mut rng).into_mono().unwrap();
        assert!((peak_db(&sample) - 6.0).abs() < 1e-8);
    }

    #[test]
    fn test_test_set() {
        let grid = ToneGrid::test_set();
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.point(4), Some((120.0, -12.0)));
    }
}
