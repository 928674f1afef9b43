//! Normalized output schema and its protobuf encoding.
//!
//! These messages match `proto/codegen.proto` tag for tag. They are written
//! with the `prost` derive macros directly rather than generated at build time,
//! so building the crate does not need `protoc`. Any change here must be
//! mirrored in the `.proto` file.
//!
//! The messages also derive `Serialize` to give tooling a readable JSON view;
//! that view is for inspection only and is not part of the wire contract.

use serde::Serialize;

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Schema {
    #[prost(message, repeated, tag = "1")]
    pub types: Vec<Type>,
}

/// A top-level declaration. Exactly one variant is set on a well-formed value.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Type {
    #[prost(oneof = "type_::Value", tags = "1, 2, 3, 4")]
    #[serde(flatten)]
    pub value: Option<type_::Value>,
}

pub mod type_ {
    use serde::Serialize;

    #[derive(Clone, PartialEq, ::prost::Oneof, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub enum Value {
        #[prost(message, tag = "1")]
        Scalar(super::Scalar),
        #[prost(message, tag = "2")]
        Enum(super::Enum),
        #[prost(message, tag = "3")]
        Input(super::Input),
        #[prost(message, tag = "4")]
        Object(super::Object),
    }
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Scalar {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Enum {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[prost(message, repeated, tag = "3")]
    pub values: Vec<EnumValue>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct EnumValue {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Present only when the value is deprecated.
    #[prost(message, optional, tag = "3")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Deprecation>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Input {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[prost(message, repeated, tag = "3")]
    pub fields: Vec<Field>,
}

/// An input object's field.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[prost(string, optional, tag = "3")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[prost(message, optional, tag = "4")]
    #[serde(rename = "type")]
    pub type_ref: Option<TypeRef>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Object {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[prost(message, repeated, tag = "3")]
    pub functions: Vec<Function>,
}

/// An object type's field, exposed as a chainable function on the client.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[prost(message, optional, tag = "3")]
    pub return_type: Option<TypeRef>,
    #[prost(message, optional, tag = "4")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Deprecation>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Deprecation {
    #[prost(string, tag = "1")]
    pub reason: String,
}

/// A reference to a type with `NON_NULL` folded into `nullable`.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct TypeRef {
    #[prost(bool, tag = "1")]
    pub nullable: bool,
    #[prost(oneof = "type_ref::Kind", tags = "2, 3, 4, 5")]
    #[serde(flatten)]
    pub kind: Option<type_ref::Kind>,
}

pub mod type_ref {
    use serde::Serialize;

    #[derive(Clone, PartialEq, ::prost::Oneof, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub enum Kind {
        #[prost(message, tag = "2")]
        ScalarType(super::ScalarTypeRef),
        #[prost(message, tag = "3")]
        EnumType(super::EnumTypeRef),
        #[prost(message, tag = "4")]
        ObjectType(super::ObjectTypeRef),
        #[prost(message, tag = "5")]
        ListType(super::ListTypeRef),
    }
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct ScalarTypeRef {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct EnumTypeRef {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct ObjectTypeRef {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTypeRef {
    #[prost(message, optional, tag = "1")]
    pub of_type: Option<Box<TypeRef>>,
}

// ---------------------------------------------------------------------------
// Convenience accessors
// ---------------------------------------------------------------------------

impl Type {
    /// Name of the declaration, whatever its variant.
    pub fn name(&self) -> Option<&str> {
        match self.value.as_ref()? {
            type_::Value::Scalar(s) => Some(&s.name),
            type_::Value::Enum(e) => Some(&e.name),
            type_::Value::Input(i) => Some(&i.name),
            type_::Value::Object(o) => Some(&o.name),
        }
    }
}

impl TypeRef {
    /// Name of the referenced type; `None` for lists.
    pub fn name(&self) -> Option<&str> {
        match self.kind.as_ref()? {
            type_ref::Kind::ScalarType(r) => Some(&r.name),
            type_ref::Kind::EnumType(r) => Some(&r.name),
            type_ref::Kind::ObjectType(r) => Some(&r.name),
            type_ref::Kind::ListType(_) => None,
        }
    }

    /// Element type of a list reference.
    pub fn list_element(&self) -> Option<&TypeRef> {
        match self.kind.as_ref()? {
            type_ref::Kind::ListType(list) => list.of_type.as_deref(),
            _ => None,
        }
    }
}
