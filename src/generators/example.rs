//! Items produced by a generator pass.

use ndarray::Array1;

/// One fixed-length, windowed tone.
pub type Sample = Array1<f64>;

/// A single item of a pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Example {
    /// A single sample (random and grid policies)
    Mono(Sample),
    /// A tone and its lower octave (octave-pair policy)
    Pair { upper: Sample, lower: Sample },
}

impl Example {
    /// The sample of a mono example.
    pub fn as_mono(&self) -> Option<&Sample> {
        match self {
            Example::Mono(sample) => Some(sample),
            Example::Pair { .. } => None,
        }
    }

    /// Consumes a mono example, returning its sample.
    pub fn into_mono(self) -> Option<Sample> {
        match self {
            Example::Mono(sample) => Some(sample),
            Example::Pair { .. } => None,
        }
    }

    /// Consumes a pair example, returning `(upper, lower)`.
    pub fn into_pair(self) -> Option<(Sample, Sample)> {
        match self {
            Example::Mono(_) => None,
            Example::Pair { upper, lower } => Some((upper, lower)),
        }
    }

    /// Returns true for octave pairs.
    pub fn is_pair(&self) -> bool {
        matches!(self, Example::Pair { .. })
    }

    /// Every sample in the example, upper before lower for pairs.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        let (first, second) = match self {
            Example::Mono(sample) => (sample, None),
            Example::Pair { upper, lower } => (upper, Some(lower)),
        };
        std::iter::once(first).chain(second)
    }
}
