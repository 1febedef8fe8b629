//! Structural shapes inferred from sample values.
//!
//! Object shapes live in the [`ShapeStore`](crate::store::ShapeStore) and are
//! only ever referenced through [`LeafShape::ObjectRef`]. Array shapes travel
//! inline. Identity everywhere is the content hash of the canonical encoding
//! below: field order is part of it, so `{a, b}` and `{b, a}` differ.

use std::fmt;

// ------------------------------ Kinds ------------------------------------ //

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Boolean,
    Number,
    Null,
}

impl PrimitiveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Null => "null",
        }
    }

    fn tag(self) -> u8 {
        match self {
            Self::String => 0,
            Self::Boolean => 1,
            Self::Number => 2,
            Self::Null => 3,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ------------------------------ Shapes ----------------------------------- //

/// A shape that can sit in an array element list or an object field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafShape {
    Primitive(PrimitiveKind),
    Array(ArrayShape),
    ObjectRef(ShapeHash),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayShape {
    /// Distinct alternatives; empty for an array that never held a value.
    pub elements: Vec<LeafShape>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectShapeField {
    pub name: String,
    pub types: Vec<LeafShape>,
    /// Absent from at least one merged-in occurrence.
    pub nullable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectShape {
    /// Insertion order of the first occurrence.
    pub fields: Vec<ObjectShapeField>,
}

/// What the store owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredShape {
    Array(ArrayShape),
    Object(ObjectShape),
}

/// A shape with every reference followed one level, as fed to the merger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Primitive(PrimitiveKind),
    Array(ArrayShape),
    Object(ObjectShape),
}

impl From<StoredShape> for Shape {
    fn from(stored: StoredShape) -> Self {
        match stored {
            StoredShape::Array(arr) => Shape::Array(arr),
            StoredShape::Object(obj) => Shape::Object(obj),
        }
    }
}

// --------------------------- Content hashing ----------------------------- //

/// Digest of a shape's canonical encoding.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeHash(blake3::Hash);

impl ShapeHash {
    pub fn of<T: Canonical + ?Sized>(shape: &T) -> Self {
        let mut hasher = blake3::Hasher::new();
        shape.feed(&mut hasher);
        Self(hasher.finalize())
    }
}

impl fmt::Display for ShapeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.to_hex().as_str())
    }
}

impl fmt::Debug for ShapeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // short prefix is plenty to tell hashes apart in debug dumps
        write!(f, "#{}", &self.0.to_hex()[..12])
    }
}

/// Canonical, order-preserving structural encoding.
pub trait Canonical {
    fn feed(&self, hasher: &mut blake3::Hasher);

    fn content_hash(&self) -> ShapeHash {
        ShapeHash::of(self)
    }
}

const TAG_PRIMITIVE: u8 = 0x01;
const TAG_ARRAY: u8 = 0x02;
const TAG_OBJECT: u8 = 0x03;
const TAG_REF: u8 = 0x04;

fn feed_len(hasher: &mut blake3::Hasher, len: usize) {
    hasher.update(&(len as u64).to_le_bytes());
}

fn feed_str(hasher: &mut blake3::Hasher, s: &str) {
    // length prefix keeps ["ab","c"] apart from ["a","bc"]
    feed_len(hasher, s.len());
    hasher.update(s.as_bytes());
}

impl Canonical for PrimitiveKind {
    fn feed(&self, hasher: &mut blake3::Hasher) {
        hasher.update(&[TAG_PRIMITIVE, self.tag()]);
    }
}

impl Canonical for ArrayShape {
    fn feed(&self, hasher: &mut blake3::Hasher) {
        hasher.update(&[TAG_ARRAY]);
        feed_len(hasher, self.elements.len());
        for el in &self.elements {
            el.feed(hasher);
        }
    }
}

impl Canonical for ObjectShape {
    fn feed(&self, hasher: &mut blake3::Hasher) {
        hasher.update(&[TAG_OBJECT]);
        feed_len(hasher, self.fields.len());
        for field in &self.fields {
            feed_str(hasher, &field.name);
            hasher.update(&[field.nullable as u8]);
            feed_len(hasher, field.types.len());
            for ty in &field.types {
                ty.feed(hasher);
            }
        }
    }
}

impl Canonical for LeafShape {
    fn feed(&self, hasher: &mut blake3::Hasher) {
        match self {
            LeafShape::Primitive(kind) => kind.feed(hasher),
            LeafShape::Array(arr) => arr.feed(hasher),
            LeafShape::ObjectRef(target) => {
                hasher.update(&[TAG_REF]);
                hasher.update(target.0.as_bytes());
            }
        }
    }
}

impl Canonical for StoredShape {
    fn feed(&self, hasher: &mut blake3::Hasher) {
        match self {
            StoredShape::Array(arr) => arr.feed(hasher),
            StoredShape::Object(obj) => obj.feed(hasher),
        }
    }
}

impl Canonical for Shape {
    fn feed(&self, hasher: &mut blake3::Hasher) {
        match self {
            Shape::Primitive(kind) => kind.feed(hasher),
            Shape::Array(arr) => arr.feed(hasher),
            Shape::Object(obj) => obj.feed(hasher),
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
