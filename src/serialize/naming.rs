//! Human-readable names for hash-named definitions.
//!
//! 1. The root gets the configured root name, everything else the placeholder.
//! 2. A field whose type references exactly one distinct definition lends it
//!    its capitalised name. Later fields win over earlier ones.
//! 3. Names shared by several definitions get `1`, `2`, ... suffixes in
//!    definition order. The root never gets a suffix; a non-root landing on
//!    the root name always does.
//! 4. All references are rewritten to the final names.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};

use crate::ir::{AnyType, JsonType, TypeBody};
use crate::options::GuessOptions;

pub fn assign_names(types: Vec<JsonType>, root: &str, options: &GuessOptions) -> Vec<JsonType> {
    let mut names: IndexMap<String, String> = types
        .iter()
        .map(|t| {
            let default = if t.name == root { &options.root_name } else { &options.placeholder_name };
            (t.name.clone(), default.clone())
        })
        .collect();

    for t in &types {
        let TypeBody::Object { fields } = &t.body else {
            continue;
        };
        for field in fields {
            let mut leaves = Vec::new();
            field.ty.named_leaves(&mut leaves);
            let distinct: IndexSet<&str> = leaves.into_iter().collect();
            if distinct.len() != 1 {
                continue;
            }
            let target: &str = distinct[0];
            if target == root {
                continue;
            }
            let Some(borrowed) = capitalize(&field.name) else {
                continue;
            };
            if let Some(slot) = names.get_mut(target) {
                *slot = borrowed;
            }
        }
    }

    let resolved = disambiguate(&names, root, &options.root_name);

    types
        .into_iter()
        .map(|t| JsonType {
            name: lookup(&resolved, &t.name),
            body: t.body.map_named(&mut |id: &str| AnyType::named(lookup(&resolved, id))),
            is_root: t.is_root,
        })
        .collect()
}

fn lookup(names: &IndexMap<String, String>, id: &str) -> String {
    match names.get(id) {
        Some(name) => name.clone(),
        None => panic!("invariant violated: reference to unknown definition {id}"),
    }
}

fn capitalize(s: &str) -> Option<String> {
    let mut chars = s.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

/// Map every definition id to a unique final name.
fn disambiguate(names: &IndexMap<String, String>, root: &str, root_name: &str) -> IndexMap<String, String> {
    let mut groups: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for (id, name) in names {
        if id != root {
            groups.entry(name.as_str()).or_default().push(id.as_str());
        }
    }

    let needs_suffix = |name: &str, ids: &[&str]| ids.len() > 1 || name == root_name;

    let mut taken: HashSet<String> = groups
        .iter()
        .filter(|(name, ids)| !needs_suffix(name, ids))
        .map(|(name, _)| (*name).to_owned())
        .collect();
    taken.insert(root_name.to_owned());

    let mut out = IndexMap::with_capacity(names.len());
    if names.contains_key(root) {
        out.insert(root.to_owned(), root_name.to_owned());
    }
    for (name, ids) in &groups {
        if !needs_suffix(name, ids) {
            out.insert(ids[0].to_owned(), (*name).to_owned());
            continue;
        }
        let mut counter = 0usize;
        for id in ids {
            let suffixed = loop {
                counter += 1;
                let candidate = format!("{name}{counter}");
                if !taken.contains(&candidate) {
                    break candidate;
                }
            };
            taken.insert(suffixed.clone());
            out.insert((*id).to_owned(), suffixed);
        }
    }
    out
}
