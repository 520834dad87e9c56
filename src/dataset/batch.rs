//! Fixed-size batches over a generator pass.

use crate::generators::{Example, Pass, Sample};
use ndarray::Array2;
use std::iter::FusedIterator;

/// A batch of examples stacked into `(batch, sample_len)` arrays.
#[derive(Debug, Clone, PartialEq)]
pub enum Batch {
    /// Stacked mono samples
    Mono(Array2<f64>),
    /// Stacked octave pairs, upper and lower tones in separate arrays
    Pair {
        upper: Array2<f64>,
        lower: Array2<f64>,
    },
}

impl Batch {
    /// `(batch size, sample length)`.
    pub fn shape(&self) -> (usize, usize) {
        self.primary().dim()
    }

    /// Number of examples in the batch.
    pub fn len(&self) -> usize {
        self.shape().0
    }

    /// Returns true for a batch without rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The mono array, or the upper array of a pair batch.
    pub fn primary(&self) -> &Array2<f64> {
        match self {
            Batch::Mono(samples) => samples,
            Batch::Pair { upper, .. } => upper,
        }
    }

    /// Consumes a mono batch, returning its array.
    pub fn into_mono(self) -> Option<Array2<f64>> {
        match self {
            Batch::Mono(samples) => Some(samples),
            Batch::Pair { .. } => None,
        }
    }

    /// Consumes a pair batch, returning `(upper, lower)`.
    pub fn into_pair(self) -> Option<(Array2<f64>, Array2<f64>)> {
        match self {
            Batch::Mono(_) => None,
            Batch::Pair { upper, lower } => Some((upper, lower)),
        }
    }

    /// Stacks examples row by row.
    ///
    /// Every example must have the same kind and length, which holds for
    /// anything drawn from a single generator.
    fn stack(examples: &[Example], sample_len: usize) -> Self {
        match examples.first() {
            Some(Example::Pair { .. }) => Batch::Pair {
                upper: stack_rows(examples, sample_len, |e| e.samples().next()),
                lower: stack_rows(examples, sample_len, |e| e.samples().last()),
            },
            _ => Batch::Mono(stack_rows(examples, sample_len, Example::as_mono)),
        }
    }
}

fn stack_rows<'e>(
    examples: &'e [Example],
    sample_len: usize,
    pick: impl Fn(&'e Example) -> Option<&'e Sample>,
) -> Array2<f64> {
    let mut out = Array2::zeros((examples.len(), sample_len));
    for (mut row, example) in out.rows_mut().into_iter().zip(examples) {
        if let Some(sample) = pick(example) {
            row.assign(sample);
        }
    }
    out
}

/// Groups a [`Pass`] into batches of at most `batch_size` examples.
///
/// The last batch may be short unless `drop_last` was requested.
#[derive(Debug)]
pub struct Batches<'a> {
    pass: Pass<'a>,
    batch_size: usize,
    drop_last: bool,
    buffer: Vec<Example>,
}

impl<'a> Batches<'a> {
    /// Wraps a pass. `batch_size` must be at least 1.
    pub(crate) fn new(pass: Pass<'a>, batch_size: usize, drop_last: bool) -> Self {
        debug_assert!(batch_size > 0);
        Self {
            pass,
            batch_size,
            drop_last,
            buffer: Vec::with_capacity(batch_size),
        }
    }

    fn remaining(&self) -> usize {
        let examples = self.pass.len();
        if self.drop_last {
            examples / self.batch_size
        } else {
            examples.div_ceil(self.batch_size)
        }
    }
}

impl Iterator for Batches<'_> {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        self.buffer.clear();
        self.buffer.extend(self.pass.by_ref().take(self.batch_size));

        if self.buffer.is_empty() || (self.drop_last && self.buffer.len() < self.batch_size) {
            return None;
        }

        let batch = Batch::stack(&self.buffer, self.pass.sample_len());
        tracing::trace!(rows = batch.len(), "assembled batch");
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Batches<'_> {}

impl FusedIterator for Batches<'_> {}
