//! Named type definitions handed to renderers. No shapes or hashes leak here.

use serde::Serialize;

use crate::shape::PrimitiveKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    String,
    Boolean,
    Number,
    Null,
    /// Element type of an array that never held a value.
    Never,
}

impl PrimitiveType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Null => "null",
            Self::Never => "never",
        }
    }
}

impl From<PrimitiveKind> for PrimitiveType {
    fn from(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::String => Self::String,
            PrimitiveKind::Boolean => Self::Boolean,
            PrimitiveKind::Number => Self::Number,
            PrimitiveKind::Null => Self::Null,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnyType {
    Primitive {
        #[serde(rename = "type")]
        ty: PrimitiveType,
    },
    Named {
        name: String,
    },
    Object {
        fields: Vec<ObjectField>,
    },
    Array {
        #[serde(rename = "type")]
        element: Box<AnyType>,
    },
    Union {
        #[serde(rename = "types")]
        members: Vec<AnyType>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: AnyType,
    pub nullable: bool,
}

/// Body of a top-level definition: only arrays and objects get one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeBody {
    Object {
        fields: Vec<ObjectField>,
    },
    Array {
        #[serde(rename = "type")]
        element: AnyType,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonType {
    pub name: String,
    #[serde(rename = "type")]
    pub body: TypeBody,
    pub is_root: bool,
}

impl AnyType {
    pub fn primitive(ty: impl Into<PrimitiveType>) -> Self {
        AnyType::Primitive { ty: ty.into() }
    }

    pub fn named(name: impl Into<String>) -> Self {
        AnyType::Named { name: name.into() }
    }

    pub fn array(element: AnyType) -> Self {
        AnyType::Array { element: Box::new(element) }
    }

    /// `never` for no alternatives, the bare type for one, a union otherwise.
    pub fn coalesce(mut members: Vec<AnyType>) -> Self {
        match members.len() {
            0 => AnyType::primitive(PrimitiveType::Never),
            1 => members.remove(0),
            _ => AnyType::Union { members },
        }
    }

    /// Rebuild the type with every `Named` leaf passed through `f`.
    pub fn map_named(&self, f: &mut impl FnMut(&str) -> AnyType) -> AnyType {
        match self {
            AnyType::Primitive { .. } => self.clone(),
            AnyType::Named { name } => f(name.as_str()),
            AnyType::Object { fields } => AnyType::Object {
                fields: fields.iter().map(|field| field.map_named(f)).collect(),
            },
            AnyType::Array { element } => AnyType::array(element.map_named(f)),
            AnyType::Union { members } => AnyType::Union {
                members: members.iter().map(|m| m.map_named(f)).collect(),
            },
        }
    }

    /// Names referenced anywhere inside, in first-seen order, with repeats.
    pub fn named_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            AnyType::Primitive { .. } => {}
            AnyType::Named { name } => out.push(name),
            AnyType::Object { fields } => fields.iter().for_each(|f| f.ty.named_leaves(out)),
            AnyType::Array { element } => element.named_leaves(out),
            AnyType::Union { members } => members.iter().for_each(|m| m.named_leaves(out)),
        }
    }
}

impl ObjectField {
    pub fn map_named(&self, f: &mut impl FnMut(&str) -> AnyType) -> ObjectField {
        ObjectField {
            name: self.name.clone(),
            ty: self.ty.map_named(f),
            nullable: self.nullable,
        }
    }
}

impl TypeBody {
    pub fn map_named(&self, f: &mut impl FnMut(&str) -> AnyType) -> TypeBody {
        match self {
            TypeBody::Object { fields } => TypeBody::Object {
                fields: fields.iter().map(|field| field.map_named(f)).collect(),
            },
            TypeBody::Array { element } => TypeBody::Array { element: element.map_named(f) },
        }
    }

    pub fn named_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TypeBody::Object { fields } => fields.iter().for_each(|f| f.ty.named_leaves(out)),
            TypeBody::Array { element } => element.named_leaves(out),
        }
    }
}
