//! The data module: three generator factories and their batched endpoints.

use super::Batches;
use crate::generators::{Generator, GeneratorConfig};
use crate::{Error, Result};
use std::fmt;

/// Builds a generator on demand.
///
/// Implemented by [`GeneratorConfig`] and by any closure returning
/// `Result<Generator>`, so a split can be described either as data or as
/// code.
pub trait GeneratorFactory {
    /// Creates a fresh generator.
    fn create(&self) -> Result<Generator>;
}

impl GeneratorFactory for GeneratorConfig {
    fn create(&self) -> Result<Generator> {
        self.build()
    }
}

impl<F> GeneratorFactory for F
where
    F: Fn() -> Result<Generator>,
{
    fn create(&self) -> Result<Generator> {
        self()
    }
}

/// One of the three dataset splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Split {
    Train,
    Validation,
    Test,
}

impl Split {
    /// All splits in setup order.
    pub const ALL: [Split; 3] = [Split::Train, Split::Validation, Split::Test];
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Split::Train => "train",
            Split::Validation => "validation",
            Split::Test => "test",
        };
        f.write_str(name)
    }
}

struct Generators {
    train: Generator,
    validation: Generator,
    test: Generator,
}

/// Train, validation and test generators behind batched endpoints.
///
/// The module starts out holding only factories. [`setup`](DataModule::setup)
/// runs each factory once; after that the `*_batches` endpoints each start a
/// new pass over their split.
///
/// # Examples
///
/// ```
/// use audible_sines::{DataModule, GeneratorConfig, RandomTones};
///
/// let small = GeneratorConfig::default()
///     .with_sample_rate(8000)
///     .with_sample_duration(0.25)
///     .with_fade_duration(0.02);
///
/// let mut module = DataModule::builder()
///     .batch_size(2)
///     .train(small.clone().with_policy(RandomTones::default().with_epoch_size(5)))
///     .validation(small.clone().with_policy(audible_sines::ToneGrid::test_set()))
///     .test(small)
///     .build()?;
///
/// module.setup()?;
/// let shapes: Vec<_> = module.train_batches()?.map(|b| b.shape()).collect();
/// assert_eq!(shapes, vec![(2, 2000), (2, 2000), (1, 2000)]);
/// # Ok::<(), audible_sines::Error>(())
/// ```
pub struct DataModule {
    batch_size: usize,
    drop_last: bool,
    train: Box<dyn GeneratorFactory>,
    validation: Box<dyn GeneratorFactory>,
    test: Box<dyn GeneratorFactory>,
    generators: Option<Generators>,
}

impl DataModule {
    /// Default batch size.
    pub const DEFAULT_BATCH_SIZE: usize = 4;

    /// Default module: random training tones, the 100-tone validation grid
    /// and the 12-tone test grid, batches of 4.
    pub fn new() -> Self {
        Self {
            batch_size: Self::DEFAULT_BATCH_SIZE,
            drop_last: false,
            train: Box::new(GeneratorConfig::random()),
            validation: Box::new(GeneratorConfig::grid()),
            test: Box::new(GeneratorConfig::test_grid()),
            generators: None,
        }
    }

    /// Octave-pair module: random-phase pairs for training, the 50-phase
    /// sweep for validation and the default test grid.
    pub fn octave_pairs() -> Self {
        Self {
            train: Box::new(GeneratorConfig::octave_pairs()),
            validation: Box::new(GeneratorConfig::octave_sweep()),
            ..Self::new()
        }
    }

    /// Starts a builder with the default factories.
    pub fn builder() -> DataModuleBuilder {
        DataModuleBuilder::default()
    }

    /// Batch size used by every endpoint.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Whether a trailing short batch is dropped.
    pub fn drop_last(&self) -> bool {
        self.drop_last
    }

    /// Instantiates all three generators.
    ///
    /// Each factory runs exactly once; later calls return immediately.
    ///
    /// # Errors
    ///
    /// Fails with the first factory error, leaving the module not set up.
    pub fn setup(&mut self) -> Result<()> {
        if self.generators.is_some() {
            tracing::debug!("data module already set up");
            return Ok(());
        }

        let generators = Generators {
            train: self.train.create()?,
            validation: self.validation.create()?,
            test: self.test.create()?,
        };
        tracing::info!(
            train = generators.train.len(),
            validation = generators.validation.len(),
            test = generators.test.len(),
            batch_size = self.batch_size,
            "data module ready"
        );
        self.generators = Some(generators);
        Ok(())
    }

    /// Returns true once [`setup`](DataModule::setup) has succeeded.
    pub fn is_ready(&self) -> bool {
        self.generators.is_some()
    }

    /// The generator behind `split`, if set up.
    pub fn generator(&self, split: Split) -> Option<&Generator> {
        let generators = self.generators.as_ref()?;
        Some(match split {
            Split::Train => &generators.train,
            Split::Validation => &generators.validation,
            Split::Test => &generators.test,
        })
    }

    /// Starts a batched pass over `split`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSetUp`] before [`setup`](DataModule::setup).
    pub fn batches(&mut self, split: Split) -> Result<Batches<'_>> {
        let (batch_size, drop_last) = (self.batch_size, self.drop_last);
        let generators = self.generators.as_mut().ok_or(Error::NotSetUp)?;
        let generator = match split {
            Split::Train => &mut generators.train,
            Split::Validation => &mut generators.validation,
            Split::Test => &mut generators.test,
        };
        tracing::debug!(%split, batch_size, "starting pass");
        Ok(Batches::new(generator.iter(), batch_size, drop_last))
    }

    /// Batched pass over the training split.
    pub fn train_batches(&mut self) -> Result<Batches<'_>> {
        self.batches(Split::Train)
    }

    /// Batched pass over the validation split.
    pub fn val_batches(&mut self) -> Result<Batches<'_>> {
        self.batches(Split::Validation)
    }

    /// Batched pass over the test split.
    pub fn test_batches(&mut self) -> Result<Batches<'_>> {
        self.batches(Split::Test)
    }
}

impl Default for DataModule {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DataModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataModule")
            .field("batch_size", &self.batch_size)
            .field("drop_last", &self.drop_last)
            .field("ready", &self.is_ready())
            .finish_non_exhaustive()
    }
}

/// Builder for [`DataModule`].
///
/// Splits left unset get the default factories. When a seed is given, the
/// default factories are seeded with `seed`, `seed + 1` and `seed + 2`;
/// explicitly provided factories are used as they are.
#[derive(Default)]
pub struct DataModuleBuilder {
    batch_size: Option<usize>,
    drop_last: bool,
    seed: Option<u64>,
    train: Option<Box<dyn GeneratorFactory>>,
    validation: Option<Box<dyn GeneratorFactory>>,
    test: Option<Box<dyn GeneratorFactory>>,
}

impl DataModuleBuilder {
    /// Sets the batch size (default 4).
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Drops a trailing short batch instead of yielding it.
    pub fn drop_last(mut self, drop_last: bool) -> Self {
        self.drop_last = drop_last;
        self
    }

    /// Seeds the default factories.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the training factory.
    pub fn train(mut self, factory: impl GeneratorFactory + 'static) -> Self {
        self.train = Some(Box::new(factory));
        self
    }

    /// Sets the validation factory.
    pub fn validation(mut self, factory: impl GeneratorFactory + 'static) -> Self {
        self.validation = Some(Box::new(factory));
        self
    }

    /// Sets the test factory.
    pub fn test(mut self, factory: impl GeneratorFactory + 'static) -> Self {
        self.test = Some(Box::new(factory));
        self
    }

    /// Builds the module. Factories are not run until `setup`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroBatchSize`] for a batch size of 0.
    pub fn build(self) -> Result<DataModule> {
        let batch_size = self.batch_size.unwrap_or(DataModule::DEFAULT_BATCH_SIZE);
        if batch_size == 0 {
            return Err(Error::ZeroBatchSize);
        }

        let seed = self.seed;
        let default_factory = |config: GeneratorConfig, offset: u64| -> Box<dyn GeneratorFactory> {
            match seed {
                Some(seed) => Box::new(config.with_seed(seed.wrapping_add(offset))),
                None => Box::new(config),
            }
        };

        Ok(DataModule {
            batch_size,
            drop_last: self.drop_last,
            train: self
                .train
                .unwrap_or_else(|| default_factory(GeneratorConfig::random(), 0)),
            validation: self
                .validation
                .unwrap_or_else(|| default_factory(GeneratorConfig::grid(), 1)),
            test: self
                .test
                .unwrap_or_else(|| default_factory(GeneratorConfig::test_grid(), 2)),
            generators: None,
        })
    }
}
