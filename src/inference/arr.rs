use std::collections::HashSet;

use crate::shape::{ArrayShape, Canonical};

/// Arrays unify by pooling their possible element types. Positions are not
/// compared and element alternatives are not merged with each other.
pub fn merge_arrays(arrays: &[ArrayShape]) -> ArrayShape {
    let mut seen = HashSet::new();
    let elements = arrays
        .iter()
        .flat_map(|arr| arr.elements.iter())
        .filter(|el| seen.insert(el.content_hash()))
        .cloned()
        .collect();
    ArrayShape { elements }
}
