//! Fade envelopes applied to every generated tone.
//!
//! A [`Window`] is the fixed fade-in / sustain / fade-out multiplier that
//! keeps tones from starting or stopping with a click. [`FadeCurve`] picks
//! the shape of the two ramps.

mod curve;
mod window;

pub use curve::FadeCurve;
pub use window::Window;
