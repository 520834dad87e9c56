//! Ramp shapes for the fade segments of a window.

use serde::{Deserialize, Serialize};

/// Shape of the fade-in ramp (the fade-out is its mirror image).
///
/// Every shape maps `[0, 1]` monotonically onto `[0, 1]`, so a window built
/// from it never leaves that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeCurve {
    /// Straight line from 0 to 1
    #[default]
    Linear,

    /// Smoothstep ease-in/ease-out, `3t² - 2t³`
    SCurve,
}

impl FadeCurve {
    /// Applies the curve to a normalized position, clamped to `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use audible_sines::envelopes::FadeCurve;
    ///
    /// assert_eq!(FadeCurve::Linear.apply(0.25), 0.25);
    /// assert_eq!(FadeCurve::SCurve.apply(0.5), 0.5);
    /// ```
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            FadeCurve::Linear => t,
            FadeCurve::SCurve => t * t * (3.0 - 2.0 * t),
        }
    }

    /// Builds a rising ramp of `len` points from 0 to 1, both ends included.
    ///
    /// The points sit at `i / (len - 1)` before shaping; a one-point ramp is
    /// `[0.0]` and a zero-point ramp is empty.
    pub fn ramp(&self, len: usize) -> impl DoubleEndedIterator<Item = f64> + '_ {
        let last = len.saturating_sub(1).max(1) as f64;
        (0..len).map(move |i| self.apply(i as f64 / last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_linear_ramp_matches_linspace() {
        let ramp: Vec<f64> = FadeCurve::Linear.ramp(5).collect();
        assert_eq!(ramp, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_degenerate_ramps() {
        assert_eq!(FadeCurve::Linear.ramp(0).count(), 0);
        assert_eq!(FadeCurve::Linear.ramp(1).collect::<Vec<_>>(), vec![0.0]);
        assert_eq!(FadeCurve::Linear.ramp(2).collect::<Vec<_>>(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_scurve_endpoints_and_symmetry() {
        let curve = FadeCurve::SCurve;
        assert_eq!(curve.apply(0.0), 0.0);
        assert_eq!(curve.apply(1.0), 1.0);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert!((curve.apply(t) + curve.apply(1.0 - t) - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_curves_are_monotonic() {
        for curve in [FadeCurve::Linear, FadeCurve::SCurve] {
            let ramp: Vec<f64> = curve.ramp(257).collect();
            assert!(ramp.windows(2).all(|w| w[0] <= w[1]), "{curve:?} is not monotonic");
        }
    }

    #[test]
    fn test_clamping() {
        assert_eq!(FadeCurve::Linear.apply(-0.5), 0.0);
        assert_eq!(FadeCurve::SCurve.apply(1.5), 1.0);
    }
}
