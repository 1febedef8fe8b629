//! Guess structural type definitions from JSON samples.
//!
//! ```text
//! Value ──load──▶ Node ──infer──▶ ShapeStore + root hash ──serialize──▶ Vec<JsonType>
//! ```
//!
//! Every call owns its store, so independent guesses can run on separate
//! threads without coordination.
pub mod error;
pub mod inference;
pub mod ir;
pub mod options;
pub mod render;
pub mod serialize;
pub mod shape;
pub mod store;
pub mod tree;

use serde_json::Value;

pub use error::{Error, Result};
pub use inference::{Inference, Inferred};
pub use ir::{AnyType, JsonType, ObjectField, PrimitiveType, TypeBody};
pub use options::GuessOptions;
pub use serialize::serialize;

/// Definitions for a single sample, with default options.
pub fn guess(value: &Value) -> Result<Vec<JsonType>> {
    guess_with(value, &GuessOptions::default())
}

pub fn guess_with(value: &Value, options: &GuessOptions) -> Result<Vec<JsonType>> {
    guess_samples(std::slice::from_ref(value), options)
}

/// Definitions covering every sample at once. Keys missing from some samples
/// come out nullable.
pub fn guess_samples<'v, I>(values: I, options: &GuessOptions) -> Result<Vec<JsonType>>
where
    I: IntoIterator<Item = &'v Value>,
{
    let mut inference = Inference::with_options(options);
    for value in values {
        inference.observe_value(value)?;
    }
    let Inferred { store, root } = inference.solve()?;
    Ok(serialize(&store, root, options))
}
