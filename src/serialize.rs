//! Shape graph → named, renderer-agnostic type definitions.
//!
//! collect (hash-named, children first) → inline array wrappers → flag the
//! root → assign human names. Each pass takes the previous list by value and
//! returns a new one.
pub mod collect;
pub mod inline;
pub mod naming;

use tracing::debug;

use crate::ir::JsonType;
use crate::options::GuessOptions;
use crate::shape::ShapeHash;
use crate::store::ShapeStore;

pub use collect::collect_types;
pub use inline::{ARRAY_INLINE_ROUNDS, inline_arrays};
pub use naming::assign_names;

pub fn serialize(store: &ShapeStore, root: ShapeHash, options: &GuessOptions) -> Vec<JsonType> {
    let root_id = root.to_string();
    let types = collect_types(store, root);
    let collected = types.len();
    let types = inline_arrays(types, &root_id);
    let types = mark_root(types, &root_id);
    let types = assign_names(types, &root_id, options);
    debug!(collected, emitted = types.len(), "serialized type definitions");
    types
}

fn mark_root(mut types: Vec<JsonType>, root: &str) -> Vec<JsonType> {
    match types.iter_mut().find(|t| t.name == root) {
        Some(def) => def.is_root = true,
        None => panic!("invariant violated: root definition {root} missing after collection"),
    }
    types
}
