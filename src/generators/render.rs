//! Windowed tone rendering shared by every policy.

use super::Sample;
use crate::envelopes::Window;
use crate::level::db_to_amplitude;
use crate::oscillators::tone;

/// Renders a tone at `frequency` Hz and `level_db` dBFS, shaped by `window`.
///
/// The raw tone is scaled to the level first and then multiplied by the
/// window. At levels up to 0 dBFS no sample exceeds the window value at its
/// position.
///
/// # Examples
///
/// ```
/// use audible_sines::envelopes::Window;
/// use audible_sines::generators::render_tone;
///
/// let window = Window::new(8000, 0.5, 0.05)?;
/// let sample = render_tone(&window, 440.0, -6.0, 0.0);
/// assert_eq!(sample.len(), window.len());
/// # Ok::<(), audible_sines::Error>(())
/// ```
pub fn render_tone(window: &Window, frequency: f64, level_db: f64, phase: f64) -> Sample {
    let mut sample = tone(frequency, window.sample_rate(), window.len(), phase);
    sample *= db_to_amplitude(level_db);
    window.apply(&mut sample);
    sample
}
