//! Mixup augmentation: convex blends of two samples.

use crate::{Error, Result};
use ndarray::Array1;
use rand::Rng;
use rand_distr::{Beta, Distribution};

/// Blends two samples with a weight drawn from `Beta(α, α)`.
///
/// Small `α` pushes the weight toward 0 or 1, so most outputs are close to
/// one of the two sources; `α = 1` mixes uniformly.
///
/// # Examples
///
/// ```
/// use audible_sines::Mixup;
/// use ndarray::array;
/// use rand::SeedableRng;
///
/// let mixup = Mixup::new(0.05)?;
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let mixed = mixup.apply(&mut rng, array![1.0, 1.0], array![-1.0, -1.0]);
/// assert!(mixed.iter().all(|s| (-1.0..=1.0).contains(s)));
/// # Ok::<(), audible_sines::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Mixup {
    alpha: f64,
    beta: Beta<f64>,
}

impl Mixup {
    /// Creates a mixup combiner with shape parameter `alpha`.
    ///
    /// # Errors
    ///
    /// `alpha` must be positive and finite.
    pub fn new(alpha: f64) -> Result<Self> {
        if !alpha.is_finite() {
            return Err(Error::InvalidMixupAlpha(alpha));
        }
        let beta = Beta::new(alpha, alpha).map_err(|_| Error::InvalidMixupAlpha(alpha))?;
        Ok(Self { alpha, beta })
    }

    /// The Beta shape parameter.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Draws a mixing weight in `[0, 1]`.
    pub fn draw_weight<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let weight = self.beta.sample(rng);
        // extreme shapes can underflow both gamma draws
        if weight.is_nan() { 0.5 } else { weight.clamp(0.0, 1.0) }
    }

    /// Returns `weight·a + (1 - weight)·b`, reusing `a`'s buffer.
    pub fn blend(a: Array1<f64>, b: &Array1<f64>, weight: f64) -> Array1<f64> {
        let mut mixed = a;
        mixed.zip_mut_with(b, |x, &y| *x = *x * weight + y * (1.0 - weight));
        mixed
    }

    /// Draws a weight and blends `a` with `b`.
    pub fn apply<R: Rng + ?Sized>(&self, rng: &mut R, a: Array1<f64>, b: Array1<f64>) -> Array1<f64> {
        let weight = self.draw_weight(rng);
        Self::blend(a, &b, weight)
    }
}
