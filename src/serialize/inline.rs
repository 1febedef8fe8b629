//! Inline synthetic array wrappers.
//!
//! Every non-root definition whose body is an array is a wrapper: its
//! references become `Array<element>` in place and the definition goes away.
//! Each round resolves one level of nesting. After the last round, wrappers
//! that are still referenced stay in the output as named definitions.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::ir::{AnyType, JsonType, TypeBody};

pub const ARRAY_INLINE_ROUNDS: usize = 5;

pub fn inline_arrays(mut types: Vec<JsonType>, root: &str) -> Vec<JsonType> {
    let wrappers: HashMap<String, AnyType> = types
        .iter()
        .filter(|t| t.name != root)
        .filter_map(|t| match &t.body {
            TypeBody::Array { element } => Some((t.name.clone(), AnyType::array(element.clone()))),
            TypeBody::Object { .. } => None,
        })
        .collect();
    if wrappers.is_empty() {
        return types;
    }

    let mut rounds = 0;
    while rounds < ARRAY_INLINE_ROUNDS && types.iter().any(|t| references_any(&t.body, &wrappers)) {
        rounds += 1;
        for t in &mut types {
            t.body = t.body.map_named(&mut |name: &str| match wrappers.get(name) {
                Some(inlined) => inlined.clone(),
                None => AnyType::named(name),
            });
        }
    }
    debug!(wrappers = wrappers.len(), rounds, "inlined array wrappers");

    retain_live(types, root, &wrappers)
}

fn references_any(body: &TypeBody, names: &HashMap<String, AnyType>) -> bool {
    let mut leaves = Vec::new();
    body.named_leaves(&mut leaves);
    leaves.iter().any(|name| names.contains_key(*name))
}

/// Drop wrappers, except those still reachable from a kept definition.
fn retain_live(types: Vec<JsonType>, root: &str, wrappers: &HashMap<String, AnyType>) -> Vec<JsonType> {
    let by_name: HashMap<&str, &JsonType> = types.iter().map(|t| (t.name.as_str(), t)).collect();
    let mut live: HashSet<String> = HashSet::new();
    let mut frontier: Vec<&JsonType> = types
        .iter()
        .filter(|t| t.name == root || !wrappers.contains_key(&t.name))
        .collect();

    while let Some(t) = frontier.pop() {
        let mut leaves = Vec::new();
        t.body.named_leaves(&mut leaves);
        for name in leaves {
            if wrappers.contains_key(name) && live.insert(name.to_owned()) {
                if let Some(&wrapper) = by_name.get(name) {
                    frontier.push(wrapper);
                }
            }
        }
    }

    if !live.is_empty() {
        warn!(
            residual = live.len(),
            limit = ARRAY_INLINE_ROUNDS,
            "array nesting exceeds the inlining bound; keeping named wrappers"
        );
    }

    types
        .into_iter()
        .filter(|t| t.name == root || !wrappers.contains_key(&t.name) || live.contains(&t.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ObjectField, PrimitiveType};

    fn array_def(name: &str, element: AnyType) -> JsonType {
        JsonType {
            name: name.into(),
            body: TypeBody::Array { element },
            is_root: false,
        }
    }

    fn number() -> AnyType {
        AnyType::primitive(PrimitiveType::Number)
    }

    /// `w1 -> w2 -> ... -> wn -> number`, root referencing `w1`.
    fn chain(n: usize) -> Vec<JsonType> {
        let mut types = Vec::new();
        for i in (1..=n).rev() {
            let element = if i == n { number() } else { AnyType::named(format!("w{}", i + 1)) };
            types.push(array_def(&format!("w{i}"), element));
        }
        types.push(array_def("root", AnyType::named("w1")));
        types
    }

    fn depth_of(ty: &AnyType) -> usize {
        match ty {
            AnyType::Array { element } => 1 + depth_of(element),
            _ => 0,
        }
    }

    #[test]
    fn wrapper_references_become_inline_arrays() {
        let types = vec![
            array_def("w", number()),
            JsonType {
                name: "obj".into(),
                body: TypeBody::Object {
                    fields: vec![ObjectField { name: "xs".into(), ty: AnyType::named("w"), nullable: false }],
                },
                is_root: false,
            },
            array_def("root", AnyType::named("obj")),
        ];
        let out = inline_arrays(types, "root");
        assert_eq!(out.len(), 2);
        let TypeBody::Object { fields } = &out[0].body else { panic!("expected object") };
        assert_eq!(fields[0].ty, AnyType::array(number()));
    }

    #[test]
    fn root_array_keeps_its_definition() {
        let out = inline_arrays(chain(1), "root");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].body, TypeBody::Array { element: AnyType::array(number()) });
    }

    #[test]
    fn chains_up_to_the_bound_inline_fully() {
        let out = inline_arrays(chain(ARRAY_INLINE_ROUNDS), "root");
        assert_eq!(out.len(), 1);
        let TypeBody::Array { element } = &out[0].body else { panic!("expected array") };
        assert_eq!(depth_of(element), ARRAY_INLINE_ROUNDS);
    }

    #[test]
    fn deeper_chains_keep_a_residual_wrapper() {
        let out = inline_arrays(chain(ARRAY_INLINE_ROUNDS + 1), "root");
        let names: Vec<_> = out.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["w6", "root"]);
        let TypeBody::Array { element } = &out[1].body else { panic!("expected array") };
        let mut leaves = Vec::new();
        element.named_leaves(&mut leaves);
        assert_eq!(leaves, ["w6"]);
    }
}
