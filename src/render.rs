//! TypeScript-flavoured text for a list of definitions.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::{AnyType, JsonType, ObjectField, TypeBody};

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern compiles"));

/// One `type Name = ...;` per definition, in order, separated by a blank line.
pub fn typescript(types: &[JsonType]) -> String {
    let mut out = String::new();
    for (i, def) in types.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str("type ");
        out.push_str(&def.name);
        out.push_str(" = ");
        match &def.body {
            TypeBody::Object { fields } => write_block(&mut out, fields),
            TypeBody::Array { element } => {
                out.push_str("Array<");
                write_type(&mut out, element);
                out.push('>');
            }
        }
        out.push_str(";\n");
    }
    out
}

fn write_block(out: &mut String, fields: &[ObjectField]) {
    out.push_str("{\n");
    for field in fields {
        out.push_str("  ");
        write_field(out, field);
        out.push_str(";\n");
    }
    out.push('}');
}

fn write_field(out: &mut String, field: &ObjectField) {
    if IDENTIFIER.is_match(&field.name) {
        out.push_str(&field.name);
    } else {
        // JSON string syntax is valid TypeScript string syntax
        out.push_str(&serde_json::Value::String(field.name.clone()).to_string());
    }
    if field.nullable {
        out.push('?');
    }
    out.push_str(": ");
    write_type(out, &field.ty);
}

fn write_type(out: &mut String, ty: &AnyType) {
    match ty {
        AnyType::Primitive { ty } => out.push_str(ty.as_str()),
        AnyType::Named { name } => out.push_str(name),
        AnyType::Array { element } => {
            out.push_str("Array<");
            write_type(out, element);
            out.push('>');
        }
        AnyType::Union { members } => {
            for (i, member) in members.iter().enumerate() {
                if i > 0 {
                    out.push_str(" | ");
                }
                write_type(out, member);
            }
        }
        AnyType::Object { fields } => {
            if fields.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push_str("{ ");
            for field in fields {
                write_field(out, field);
                out.push_str("; ");
            }
            out.push('}');
        }
    }
}
