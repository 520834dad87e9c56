//! Train / validation / test wiring and batched iteration.

mod batch;
mod module;

pub use batch::{Batch, Batches};
pub use module::{DataModule, DataModuleBuilder, GeneratorFactory, Split};
