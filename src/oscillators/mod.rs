//! The sine oscillator and the fixed-length tone synthesizer built on it.

mod sine;

pub use sine::{SineOscillator, tone};
