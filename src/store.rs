//! Content-addressed shape store, scoped to one inference run.

use indexmap::IndexMap;

use crate::shape::{ArrayShape, Canonical, LeafShape, ObjectShape, Shape, ShapeHash, StoredShape};

#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    shapes: IndexMap<ShapeHash, StoredShape>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert-or-overwrite under the shape's content hash. Saving a
    /// structurally identical shape twice is a no-op in effect.
    pub fn save(&mut self, shape: StoredShape) -> ShapeHash {
        let hash = shape.content_hash();
        self.shapes.insert(hash, shape);
        hash
    }

    pub fn save_object(&mut self, obj: ObjectShape) -> LeafShape {
        LeafShape::ObjectRef(self.save(StoredShape::Object(obj)))
    }

    pub fn save_array(&mut self, arr: ArrayShape) -> ShapeHash {
        self.save(StoredShape::Array(arr))
    }

    /// Panics when `hash` is not present: every hash handed out by this
    /// store is saved first, so a miss is a bug in the engine.
    pub fn resolve(&self, hash: ShapeHash) -> &StoredShape {
        match self.shapes.get(&hash) {
            Some(shape) => shape,
            None => panic!("invariant violated: shape {hash} not found in store"),
        }
    }

    /// Follow an object reference; inline shapes pass through.
    pub fn deref_leaf(&self, leaf: &LeafShape) -> Shape {
        match leaf {
            LeafShape::Primitive(kind) => Shape::Primitive(*kind),
            LeafShape::Array(arr) => Shape::Array(arr.clone()),
            LeafShape::ObjectRef(target) => self.resolve(*target).clone().into(),
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
