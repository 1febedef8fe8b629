//! Generic value tree fed to the inferencer.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::shape::PrimitiveKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Primitive(PrimitiveKind),
    Array(Vec<Node>),
    /// Keys in document order (serde_json is built with `preserve_order`).
    Object(Vec<(String, Node)>),
}

impl Node {
    /// Walk a JSON value, rejecting containers nested deeper than `max_depth`.
    pub fn load(value: &Value, max_depth: usize) -> Result<Self> {
        load_value(value, 0, max_depth)
    }

    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            Node::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }
}

fn load_value(v: &Value, depth: usize, max_depth: usize) -> Result<Node> {
    match v {
        Value::Null => Ok(Node::Primitive(PrimitiveKind::Null)),
        Value::Bool(_) => Ok(Node::Primitive(PrimitiveKind::Boolean)),
        Value::Number(_) => Ok(Node::Primitive(PrimitiveKind::Number)),
        Value::String(_) => Ok(Node::Primitive(PrimitiveKind::String)),
        Value::Array(xs) => {
            let depth = enter(depth, max_depth)?;
            xs.iter()
                .map(|x| load_value(x, depth, max_depth))
                .collect::<Result<Vec<_>>>()
                .map(Node::Array)
        }
        Value::Object(map) => {
            let depth = enter(depth, max_depth)?;
            load_object(map, depth, max_depth)
        }
    }
}

fn load_object(map: &Map<String, Value>, depth: usize, max_depth: usize) -> Result<Node> {
    let mut children = Vec::with_capacity(map.len());
    for (k, v) in map {
        children.push((k.clone(), load_value(v, depth, max_depth)?));
    }
    Ok(Node::Object(children))
}

fn enter(depth: usize, max_depth: usize) -> Result<usize> {
    let depth = depth + 1;
    if depth > max_depth {
        return Err(Error::DepthLimitExceeded { limit: max_depth });
    }
    Ok(depth)
}
