//! GraphQL introspection model and parser.
//!
//! The model mirrors the shape of an introspection response: a [`Schema`] owns
//! an ordered list of [`Type`]s, and every edge between types (field return
//! types, argument types) is a [`TypeRef`] chain that names its target rather
//! than pointing at it. Resolving a name back to a `Type` happens on demand via
//! [`Schema::get_type`], so the graph is built in a single structural pass and
//! is immutable afterwards.
//!
//! Query helpers over the model live in [`query`].

pub mod query;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::CodegenError;

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// The kind of a type or type reference.
///
/// Deserialization rejects any string outside this closed set, so an unknown
/// kind fails in the parser instead of during transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeKind {
    /// The introspection spelling of the kind, e.g. `INPUT_OBJECT`.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Scalar => "SCALAR",
            TypeKind::Object => "OBJECT",
            TypeKind::Interface => "INTERFACE",
            TypeKind::Union => "UNION",
            TypeKind::Enum => "ENUM",
            TypeKind::InputObject => "INPUT_OBJECT",
            TypeKind::List => "LIST",
            TypeKind::NonNull => "NON_NULL",
        }
    }

    /// Wrapper kinds only appear inside a [`TypeRef`] chain.
    pub fn is_wrapper(self) -> bool {
        matches!(self, TypeKind::List | TypeKind::NonNull)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of the introspection: every type the server exposes, in response order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default, deserialize_with = "null_as_default")]
    pub types: Vec<Type>,
}

/// A named type in the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Type {
    pub kind: TypeKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Populated for objects and interfaces.
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Vec<Field>,
    /// Populated for input objects.
    #[serde(default, deserialize_with = "null_as_default")]
    pub input_fields: Vec<InputValue>,
    /// Populated for enums.
    #[serde(default, deserialize_with = "null_as_default")]
    pub enum_values: Vec<EnumValue>,
}

/// A field of an object or interface type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// The field's return type.
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default, deserialize_with = "null_as_default")]
    pub args: Vec<InputValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

/// A field argument or an input object's field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Raw GraphQL literal text, passed through untouched.
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

/// A value of an enum type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

/// Type information for a field, argument, or the inner layer of a wrapper.
///
/// `List` and `NonNull` refs carry the wrapped ref in `of_type`; every other
/// kind terminates the chain with a `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}

/// Deepest chain of `LIST`/`NON_NULL` layers a type reference may have.
///
/// Each list layer nests two protobuf messages and decoders stop at a
/// recursion depth of 100, so deeper chains would encode but never decode.
pub const MAX_TYPE_REF_DEPTH: usize = 32;

impl TypeRef {
    /// A terminal reference to a named type.
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            of_type: None,
        }
    }

    /// Wrap `inner` in a `NON_NULL` layer.
    pub fn non_null(inner: TypeRef) -> Self {
        Self {
            kind: TypeKind::NonNull,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    /// Wrap `inner` in a `LIST` layer.
    pub fn list(inner: TypeRef) -> Self {
        Self {
            kind: TypeKind::List,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    /// Number of wrapper layers above the innermost ref.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Some(inner) = current.of_type.as_deref() {
            depth += 1;
            current = inner;
        }
        depth
    }
}

impl Field {
    /// The deprecation reason when the field is deprecated. A deprecated field
    /// without a reason yields `""`.
    pub fn deprecation(&self) -> Option<&str> {
        deprecation(self.is_deprecated, self.deprecation_reason.as_deref())
    }
}

impl EnumValue {
    /// Same contract as [`Field::deprecation`].
    pub fn deprecation(&self) -> Option<&str> {
        deprecation(self.is_deprecated, self.deprecation_reason.as_deref())
    }
}

fn deprecation(is_deprecated: bool, reason: Option<&str>) -> Option<&str> {
    is_deprecated.then(|| reason.unwrap_or_default())
}

/// Treat an explicit JSON `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// The `__schema` envelope, optionally nested under a GraphQL `data` key.
#[derive(Deserialize)]
struct Response {
    #[serde(rename = "__schema")]
    schema: Option<Schema>,
    data: Option<Envelope>,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "__schema")]
    schema: Option<Schema>,
}

/// Parse raw introspection JSON text into a [`Schema`].
///
/// Accepts both `{"__schema": ...}` and `{"data": {"__schema": ...}}`.
pub fn parse(introspection_json: &str) -> Result<Schema, CodegenError> {
    let response: Response = serde_json::from_str(introspection_json)?;
    finish(response)
}

/// Parse an already-decoded JSON value. Same contract as [`parse`].
pub fn parse_value(introspection: &Value) -> Result<Schema, CodegenError> {
    let response = Response::deserialize(introspection)?;
    finish(response)
}

fn finish(response: Response) -> Result<Schema, CodegenError> {
    let schema = response
        .schema
        .or_else(|| response.data.and_then(|d| d.schema))
        .ok_or_else(|| CodegenError::malformed("#", "missing `__schema` envelope"))?;
    validate(&schema)?;
    tracing::debug!(types = schema.types.len(), "parsed introspection schema");
    Ok(schema)
}

// ---------------------------------------------------------------------------
// Structural validation
// ---------------------------------------------------------------------------

/// Check the invariants the rest of the pipeline relies on: top-level types are
/// named and never wrappers, wrapper refs always carry `ofType`, named refs
/// always carry a name, and no chain is deeper than [`MAX_TYPE_REF_DEPTH`].
fn validate(schema: &Schema) -> Result<(), CodegenError> {
    for (i, ty) in schema.types.iter().enumerate() {
        if ty.name.is_empty() {
            return Err(CodegenError::malformed(
                format!("types[{i}]"),
                "type has no name",
            ));
        }
        if ty.kind.is_wrapper() {
            return Err(CodegenError::malformed(
                &ty.name,
                format!("{} cannot be a top-level type", ty.kind),
            ));
        }

        for field in &ty.fields {
            let path = format!("{}.{}", ty.name, field.name);
            validate_ref(&field.type_ref, &path)?;
            for arg in &field.args {
                validate_ref(&arg.type_ref, &format!("{path}({})", arg.name))?;
            }
        }
        for input in &ty.input_fields {
            validate_ref(&input.type_ref, &format!("{}.{}", ty.name, input.name))?;
        }
    }
    Ok(())
}

fn validate_ref(type_ref: &TypeRef, path: &str) -> Result<(), CodegenError> {
    let depth = type_ref.depth();
    if depth > MAX_TYPE_REF_DEPTH {
        return Err(CodegenError::malformed(
            path,
            format!("type reference nests {depth} wrappers, at most {MAX_TYPE_REF_DEPTH} allowed"),
        ));
    }
    check_chain(type_ref, path)
}

fn check_chain(type_ref: &TypeRef, path: &str) -> Result<(), CodegenError> {
    if type_ref.kind.is_wrapper() {
        return match &type_ref.of_type {
            Some(inner) => check_chain(inner, path),
            None => Err(CodegenError::malformed(
                path,
                format!("{} reference without `ofType`", type_ref.kind),
            )),
        };
    }
    match type_ref.name.as_deref() {
        Some(name) if !name.is_empty() => Ok(()),
        _ => Err(CodegenError::malformed(
            path,
            format!("{} reference without a name", type_ref.kind),
        )),
    }
}
