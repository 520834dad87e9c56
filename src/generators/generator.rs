//! The generator and its pass iterator.

use super::octave::OctaveSource;
use super::random::RandomSource;
use super::{Example, ExampleSource, GeneratorConfig, Policy, Sample, ToneGrid};
use crate::Result;
use crate::envelopes::Window;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::iter::FusedIterator;

/// Validated, ready-to-run form of a [`Policy`].
#[derive(Debug, Clone)]
enum Source {
    Random(RandomSource),
    Grid(ToneGrid),
    OctavePairs(OctaveSource),
}

impl Source {
    fn new(policy: &Policy) -> Result<Self> {
        Ok(match policy {
            Policy::Random(tones) => Source::Random(tones.prepare()?),
            Policy::Grid(grid) => {
                grid.validate()?;
                Source::Grid(grid.clone())
            }
            Policy::OctavePairs(pairs) => Source::OctavePairs(pairs.prepare()?),
        })
    }

    fn as_source(&self) -> &dyn ExampleSource {
        match self {
            Source::Random(source) => source,
            Source::Grid(grid) => grid,
            Source::OctavePairs(pairs) => pairs,
        }
    }
}

/// A finite, restartable source of windowed sine examples.
///
/// Each call to [`iter`](Generator::iter) starts a new pass of
/// [`len`](Generator::len) examples. Random draws come from the generator's
/// own RNG, so a second pass of a random policy continues the stream and
/// yields fresh examples, while a grid pass is identical every time.
///
/// # Examples
///
/// ```
/// use audible_sines::{GeneratorConfig, ToneGrid};
///
/// let mut generator = GeneratorConfig::default()
///     .with_sample_rate(8000)
///     .with_sample_duration(0.25)
///     .with_fade_duration(0.02)
///     .with_policy(ToneGrid::test_set())
///     .build()?;
///
/// let first: Vec<_> = generator.iter().collect();
/// let second: Vec<_> = generator.iter().collect();
/// assert_eq!(first.len(), 12);
/// assert_eq!(first, second);
/// # Ok::<(), audible_sines::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    window: Window,
    source: Source,
    rng: StdRng,
}

impl Generator {
    /// Validates `config` and builds the window and sampling state.
    ///
    /// # Errors
    ///
    /// Returns the first configuration problem found.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let window = Window::with_curve(
            config.sample_rate,
            config.sample_duration,
            config.fade_duration,
            config.fade_curve,
        )?;
        let source = Source::new(&config.policy)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        tracing::debug!(
            policy = config.policy.name(),
            sample_len = window.len(),
            fade_len = window.fade_len(),
            pass_len = source.as_source().len(),
            seed = ?config.seed,
            "built sample generator"
        );

        Ok(Self {
            config,
            window,
            source,
            rng,
        })
    }

    /// The configuration this generator was built from.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The envelope applied to every tone.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Samples per tone.
    pub fn sample_len(&self) -> usize {
        self.window.len()
    }

    /// Examples per pass.
    pub fn len(&self) -> usize {
        self.source.as_source().len()
    }

    /// Returns true when a pass yields nothing (a random policy with epoch size 0).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders the example at `index` of a pass, or `None` past the end.
    pub fn example(&mut self, index: usize) -> Option<Example> {
        let source = self.source.as_source();
        (index < source.len()).then(|| source.example(index, &self.window, &mut self.rng))
    }

    /// Draws a single unmixed tone from a random policy.
    ///
    /// Returns `None` for the grid and octave-pair policies.
    pub fn random_tone(&mut self) -> Option<Sample> {
        match &self.source {
            Source::Random(source) => Some(source.draw_tone(&self.window, &mut self.rng)),
            Source::Grid(_) | Source::OctavePairs(_) => None,
        }
    }

    /// Starts a new pass.
    pub fn iter(&mut self) -> Pass<'_> {
        Pass {
            generator: self,
            next: 0,
        }
    }
}

impl<'a> IntoIterator for &'a mut Generator {
    type Item = Example;
    type IntoIter = Pass<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One pass over a generator, rendering examples lazily.
#[derive(Debug)]
pub struct Pass<'a> {
    generator: &'a mut Generator,
    next: usize,
}

impl Pass<'_> {
    /// Sample length of the examples in this pass.
    pub fn sample_len(&self) -> usize {
        self.generator.sample_len()
    }
}

impl Iterator for Pass<'_> {
    type Item = Example;

    fn next(&mut self) -> Option<Example> {
        let example = self.generator.example(self.next)?;
        self.next += 1;
        Some(example)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.generator.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Pass<'_> {}

impl FusedIterator for Pass<'_> {}
