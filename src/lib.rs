//! Audible Sines - synthetic sine-tone data for neural vocoders
//!
//! This library generates fixed-length, windowed sine tones for training and
//! validating audio models. Tones fade in and out to avoid clicks, and are
//! produced lazily by [`Generator`]s under one of three policies:
//!
//! - **Random** ([`RandomTones`]): Weibull-shaped log-frequency draws,
//!   uniform levels in decibels, and mixup of two tones per example
//! - **Grid** ([`ToneGrid`]): every frequency at every level, identical on
//!   every pass
//! - **Octave pairs** ([`OctavePairs`]): a 400 Hz tone paired with a 200 Hz
//!   tone at the same level
//!
//! A [`DataModule`] wires train, validation and test generators together and
//! serves them as `(batch, sample_len)` arrays.
//!
//! ```
//! use audible_sines::{DataModule, GeneratorConfig, RandomTones, ToneGrid};
//!
//! let small = GeneratorConfig::default()
//!     .with_sample_rate(8000)
//!     .with_sample_duration(0.5)
//!     .with_fade_duration(0.05);
//!
//! let mut module = DataModule::builder()
//!     .train(small.clone().with_policy(RandomTones::default().with_epoch_size(8)).with_seed(1))
//!     .validation(small.clone().with_policy(ToneGrid::test_set()))
//!     .test(small.with_policy(ToneGrid::new(vec![440.0], vec![0.0, -6.0])))
//!     .build()?;
//! module.setup()?;
//!
//! for batch in module.train_batches()? {
//!     assert_eq!(batch.shape(), (4, 4000));
//! }
//! # Ok::<(), audible_sines::Error>(())
//! ```

pub mod dataset;
pub mod envelopes;
pub mod error;
pub mod generators;
pub mod level;
pub mod mixup;
pub mod oscillators;
pub mod signal;

// Re-export commonly used types at the crate root
pub use dataset::{Batch, Batches, DataModule, DataModuleBuilder, GeneratorFactory, Split};
pub use envelopes::{FadeCurve, Window};
pub use error::{Error, Result};
pub use generators::{
    Example, Generator, GeneratorConfig, OctavePairs, PairLevel, Pass, Phase, Policy, RandomTones,
    Sample, ToneGrid, log_frequencies, render_tone,
};
pub use mixup::Mixup;
pub use oscillators::{SineOscillator, tone};
pub use signal::Signal;
