use indexmap::IndexSet;

use crate::shape::{LeafShape, ObjectShape, ObjectShapeField};
use crate::store::ShapeStore;

use super::merge::unify;

/// Merge N occurrences of an object into one stored shape.
///
/// Keys keep the order in which they are first seen. A field is nullable
/// exactly when some occurrence lacks it; a `null` value alone does not
/// make it nullable, it only adds `null` to the field's alternatives.
pub fn merge_objects(store: &mut ShapeStore, objects: &[ObjectShape]) -> LeafShape {
    let all_keys: IndexSet<&str> = objects
        .iter()
        .flat_map(|obj| obj.fields.iter().map(|f| f.name.as_str()))
        .collect();

    let mut fields = Vec::with_capacity(all_keys.len());
    for key in all_keys {
        let mut present_in = 0;
        let mut candidates = Vec::new();
        for obj in objects {
            if let Some(field) = obj.fields.iter().find(|f| f.name == key) {
                present_in += 1;
                candidates.extend(field.types.iter().cloned());
            }
        }
        fields.push(ObjectShapeField {
            name: key.to_owned(),
            types: unify(store, candidates),
            nullable: present_in < objects.len(),
        });
    }

    store.save_object(ObjectShape { fields })
}
