//! Unification of sibling shapes.
//!
//! Shapes are partitioned by kind and each partition is merged on its own,
//! so a `string` alternative never meets an array alternative during the
//! recursive merge. Result order: objects, arrays, primitives.

use std::collections::HashSet;

use crate::shape::{Canonical, LeafShape, Shape};
use crate::store::ShapeStore;

use super::{arr, obj};

/// Dedupe `leaves` by content hash, follow object references, then merge.
pub fn unify<I>(store: &mut ShapeStore, leaves: I) -> Vec<LeafShape>
where
    I: IntoIterator<Item = LeafShape>,
{
    let mut seen = HashSet::new();
    let shapes: Vec<Shape> = leaves
        .into_iter()
        .filter(|leaf| seen.insert(leaf.content_hash()))
        .map(|leaf| store.deref_leaf(&leaf))
        .collect();
    merge_shapes(store, shapes)
}

/// Minimal union describing every shape in `shapes`.
///
/// Empty input yields an empty list (an array that never held a value).
pub fn merge_shapes(store: &mut ShapeStore, shapes: Vec<Shape>) -> Vec<LeafShape> {
    let mut objects = Vec::new();
    let mut arrays = Vec::new();
    let mut primitives = Vec::new();
    for shape in shapes {
        match shape {
            Shape::Object(o) => objects.push(o),
            Shape::Array(a) => arrays.push(a),
            Shape::Primitive(k) => primitives.push(k),
        }
    }

    let mut out = Vec::new();
    if !objects.is_empty() {
        out.push(obj::merge_objects(store, &objects));
    }
    if !arrays.is_empty() {
        out.push(LeafShape::Array(arr::merge_arrays(&arrays)));
    }
    let mut seen = HashSet::new();
    out.extend(
        primitives
            .into_iter()
            .filter(|kind| seen.insert(*kind))
            .map(LeafShape::Primitive),
    );
    out
}
