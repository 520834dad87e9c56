//! Sample generators.
//!
//! A [`Generator`] turns a [`GeneratorConfig`] into a finite, restartable
//! sequence of windowed sine tones. What the sequence contains is decided
//! by the config's [`Policy`]:
//!
//! - [`RandomTones`]: Weibull-shaped log-frequency draws, uniform levels,
//!   mixup of two tones per example
//! - [`ToneGrid`]: every frequency at every level, always the same output
//! - [`OctavePairs`]: a tone paired with the tone an octave below

mod config;
mod example;
mod generator;
mod grid;
mod octave;
mod random;
mod render;

pub use config::{GeneratorConfig, Policy};
pub use example::{Example, Sample};
pub use generator::{Generator, Pass};
pub use grid::{ToneGrid, log_frequencies};
pub use octave::{OctavePairs, PairLevel, Phase};
pub use random::RandomTones;
pub use render::render_tone;

use crate::envelopes::Window;
use crate::{Error, Result};
use rand::rngs::StdRng;

/// Produces the example at a given position of a pass.
pub(crate) trait ExampleSource {
    /// Examples per pass.
    fn len(&self) -> usize;

    /// Renders example `index`, which is always below `len()`.
    fn example(&self, index: usize, window: &Window, rng: &mut StdRng) -> Example;
}

pub(crate) fn check_frequency(frequency: f64) -> Result<()> {
    if frequency.is_finite() && frequency > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidFrequency(frequency))
    }
}

pub(crate) fn check_level(db: f64) -> Result<()> {
    if db.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidLevel(db))
    }
}

pub(crate) fn check_non_empty<T>(items: &[T], what: &'static str) -> Result<()> {
    if items.is_empty() {
        Err(Error::EmptyList(what))
    } else {
        Ok(())
    }
}
