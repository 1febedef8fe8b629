//! Shape graph → one definition per distinct array or object shape.

use std::collections::HashSet;

use crate::ir::{AnyType, JsonType, ObjectField, TypeBody};
use crate::shape::{ArrayShape, Canonical, LeafShape, ObjectShape, ObjectShapeField, ShapeHash, StoredShape};
use crate::store::ShapeStore;

/// Walk everything reachable from `root`. Every definition is named by the
/// content hash of its shape and children come before their parents.
/// Structurally identical shapes are emitted once, at their first visit.
pub fn collect_types(store: &ShapeStore, root: ShapeHash) -> Vec<JsonType> {
    let mut collector = Collector {
        store,
        seen: HashSet::new(),
        out: Vec::new(),
    };
    collector.stored(root);
    collector.out
}

struct Collector<'a> {
    store: &'a ShapeStore,
    seen: HashSet<ShapeHash>,
    out: Vec<JsonType>,
}

impl<'a> Collector<'a> {
    fn stored(&mut self, hash: ShapeHash) {
        if !self.seen.insert(hash) {
            return;
        }
        let store = self.store;
        match store.resolve(hash) {
            StoredShape::Object(obj) => self.object(hash, obj),
            StoredShape::Array(arr) => self.array(hash, arr),
        }
    }

    fn leaf(&mut self, leaf: &'a LeafShape) {
        match leaf {
            LeafShape::Primitive(_) => {}
            LeafShape::ObjectRef(target) => self.stored(*target),
            LeafShape::Array(arr) => {
                let hash = arr.content_hash();
                if self.seen.insert(hash) {
                    self.array(hash, arr);
                }
            }
        }
    }

    fn object(&mut self, hash: ShapeHash, obj: &'a ObjectShape) {
        for field in &obj.fields {
            for ty in &field.types {
                self.leaf(ty);
            }
        }
        self.out.push(JsonType {
            name: hash.to_string(),
            body: TypeBody::Object {
                fields: obj.fields.iter().map(to_field).collect(),
            },
            is_root: false,
        });
    }

    fn array(&mut self, hash: ShapeHash, arr: &'a ArrayShape) {
        for el in &arr.elements {
            self.leaf(el);
        }
        self.out.push(JsonType {
            name: hash.to_string(),
            body: TypeBody::Array {
                element: coalesce_leaves(&arr.elements),
            },
            is_root: false,
        });
    }
}

/// Objects and nested arrays become references to their own definitions.
fn to_type(leaf: &LeafShape) -> AnyType {
    match leaf {
        LeafShape::Primitive(kind) => AnyType::primitive(*kind),
        LeafShape::ObjectRef(target) => AnyType::named(target.to_string()),
        LeafShape::Array(arr) => AnyType::named(arr.content_hash().to_string()),
    }
}

fn coalesce_leaves(leaves: &[LeafShape]) -> AnyType {
    AnyType::coalesce(leaves.iter().map(to_type).collect())
}

fn to_field(field: &ObjectShapeField) -> ObjectField {
    ObjectField {
        name: field.name.clone(),
        ty: coalesce_leaves(&field.types),
        nullable: field.nullable,
    }
}
