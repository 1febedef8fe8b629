//! Shape inference over value trees.
//!
//! Walk the tree bottom-up, give every object a stored shape and hand back a
//! reference to it, unify the children of every array through the merger,
//! and keep all of it in a store owned by this one run.
//!
//! Design goals:
//! - Structurally identical objects collapse to one stored shape wherever
//!   they occur.
//! - A field is optional iff some merged occurrence lacks it.
//! - No ambient state: two `Inference`s never see each other's shapes.
pub mod arr;
pub mod merge;
pub mod obj;

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::options::GuessOptions;
use crate::shape::{ArrayShape, LeafShape, ObjectShape, ObjectShapeField, ShapeHash};
use crate::store::ShapeStore;
use crate::tree::Node;

pub use merge::{merge_shapes, unify};

// ------------------------------ Observe ---------------------------------- //

/// Tree walker writing into a borrowed store.
pub struct Inferencer<'s> {
    store: &'s mut ShapeStore,
    max_depth: usize,
}

impl<'s> Inferencer<'s> {
    pub fn new(store: &'s mut ShapeStore, max_depth: usize) -> Self {
        Self { store, max_depth }
    }

    /// Primitives pass through; arrays stay inline; objects are always
    /// stored and returned as references, even when seen only once.
    pub fn infer_node_shape(&mut self, node: &Node) -> Result<LeafShape> {
        self.node_shape(node, 0)
    }

    pub fn infer_object_shape(&mut self, children: &[(String, Node)]) -> Result<LeafShape> {
        self.object_shape(children, 0)
    }

    pub fn infer_array_shape(&mut self, children: &[Node]) -> Result<ArrayShape> {
        self.array_shape(children, 0)
    }

    fn node_shape(&mut self, node: &Node, depth: usize) -> Result<LeafShape> {
        match node {
            Node::Primitive(kind) => Ok(LeafShape::Primitive(*kind)),
            Node::Array(children) => self.array_shape(children, depth).map(LeafShape::Array),
            Node::Object(children) => self.object_shape(children, depth),
        }
    }

    fn object_shape(&mut self, children: &[(String, Node)], depth: usize) -> Result<LeafShape> {
        let depth = self.descend(depth)?;
        let mut fields = Vec::with_capacity(children.len());
        for (name, value) in children {
            fields.push(ObjectShapeField {
                name: name.clone(),
                types: vec![self.node_shape(value, depth)?],
                nullable: false,
            });
        }
        Ok(self.store.save_object(ObjectShape { fields }))
    }

    fn array_shape(&mut self, children: &[Node], depth: usize) -> Result<ArrayShape> {
        let depth = self.descend(depth)?;
        let mut resolved = Vec::with_capacity(children.len());
        for child in children {
            resolved.push(self.node_shape(child, depth)?);
        }
        Ok(ArrayShape { elements: unify(self.store, resolved) })
    }

    fn descend(&self, depth: usize) -> Result<usize> {
        let depth = depth + 1;
        if depth > self.max_depth {
            return Err(Error::DepthLimitExceeded { limit: self.max_depth });
        }
        Ok(depth)
    }
}

// ------------------------------- Front API -------------------------------- //

/// Streaming front end: observe one or more samples, then solve.
pub struct Inference {
    store: ShapeStore,
    samples: Vec<LeafShape>,
    max_depth: usize,
}

/// A populated store plus the hash of the root shape inside it.
#[derive(Debug, Clone)]
pub struct Inferred {
    pub store: ShapeStore,
    pub root: ShapeHash,
}

impl Default for Inference {
    fn default() -> Self {
        Self::new()
    }
}

impl Inference {
    pub fn new() -> Self {
        Self::with_options(&GuessOptions::default())
    }

    pub fn with_options(options: &GuessOptions) -> Self {
        Self {
            store: ShapeStore::new(),
            samples: Vec::new(),
            max_depth: options.max_depth,
        }
    }

    pub fn observe_value(&mut self, v: &Value) -> Result<()> {
        let node = Node::load(v, self.max_depth)?;
        self.observe_node(&node)
    }

    pub fn observe_node(&mut self, node: &Node) -> Result<()> {
        if let Some(kind) = node.primitive_kind() {
            return Err(Error::PrimitiveRoot(kind));
        }
        let shape = Inferencer::new(&mut self.store, self.max_depth).infer_node_shape(node)?;
        self.samples.push(shape);
        Ok(())
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Unify all observed samples into a single root shape.
    ///
    /// Several samples are unified like the children of one array, so a
    /// key missing from some samples becomes nullable.
    pub fn solve(mut self) -> Result<Inferred> {
        let sample_count = self.samples.len();
        let mut unified = match sample_count {
            0 => return Err(Error::NoSamples),
            1 => std::mem::take(&mut self.samples),
            _ => unify(&mut self.store, std::mem::take(&mut self.samples)),
        };
        if unified.len() != 1 {
            return Err(Error::IncompatibleSamples { found: unified.len() });
        }
        let root = match unified.remove(0) {
            LeafShape::ObjectRef(hash) => hash,
            LeafShape::Array(arr) => self.store.save_array(arr),
            LeafShape::Primitive(kind) => {
                panic!("invariant violated: primitive `{kind}` reached the root after observe")
            }
        };
        debug!(samples = sample_count, shapes = self.store.len(), root = ?root, "inference solved");
        Ok(Inferred { store: self.store, root })
    }
}

// ------------------------------- Tests ------------------------------------ //
