//! Lower an introspection [`Schema`] into the normalized [`pb::Schema`].
//!
//! Each top-level type is dispatched on its kind:
//!
//! | Input kind     | Output variant |
//! |----------------|----------------|
//! | `SCALAR`       | `Scalar`       |
//! | `ENUM`         | `Enum`         |
//! | `INPUT_OBJECT` | `Input`        |
//! | `OBJECT`       | `Object`       |
//!
//! Any other kind aborts the whole transformation with
//! [`CodegenError::UnsupportedKind`]; a partially generated schema would
//! produce silently broken SDKs.
//!
//! Type references are lowered recursively. `NON_NULL` never reaches the
//! output: it only clears the `nullable` flag of the ref it wraps.

use std::collections::HashSet;

use prost::Message;

use crate::config::TransformOptions;
use crate::error::CodegenError;
use crate::introspection::query::root_type;
use crate::introspection::{
    self, EnumValue, Field, InputValue, Schema, Type, TypeKind, TypeRef, MAX_TYPE_REF_DEPTH,
};
use crate::pb;

/// Stateless lowering of introspection schemas under a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    options: TransformOptions,
}

impl Transformer {
    pub fn new(options: TransformOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Transform every type in `schema`, in order. Fails on the first
    /// unsupported kind without returning partial output.
    pub fn transform(&self, schema: &Schema) -> Result<pb::Schema, CodegenError> {
        let types = schema
            .types
            .iter()
            .map(|ty| self.transform_type(ty))
            .collect::<Result<Vec<_>, _>>()?;
        self.warn_name_collisions(schema);
        if root_type(schema, &self.options).is_none() {
            tracing::warn!(
                root_type = %self.options.root_type,
                "schema has no root type; the client will have no entry point"
            );
        }
        tracing::debug!(types = types.len(), "transformed schema");
        Ok(pb::Schema { types })
    }

    /// A literal `client_name` type next to the root type yields two output
    /// declarations under one name.
    fn warn_name_collisions(&self, schema: &Schema) {
        let mut seen = HashSet::new();
        for ty in &schema.types {
            let name = self.options.normalize_name(&ty.name);
            if !seen.insert(name) {
                tracing::warn!(
                    name,
                    source = %ty.name,
                    "two types share the same output name"
                );
            }
        }
    }

    fn transform_type(&self, ty: &Type) -> Result<pb::Type, CodegenError> {
        tracing::debug!(name = %ty.name, kind = %ty.kind, "transforming type");
        let value = match ty.kind {
            TypeKind::Scalar => pb::type_::Value::Scalar(self.transform_scalar(ty)),
            TypeKind::Enum => pb::type_::Value::Enum(self.transform_enum(ty)),
            TypeKind::InputObject => pb::type_::Value::Input(self.transform_input(ty)?),
            TypeKind::Object => pb::type_::Value::Object(self.transform_object(ty)?),
            TypeKind::Interface | TypeKind::Union | TypeKind::List | TypeKind::NonNull => {
                return Err(CodegenError::UnsupportedKind {
                    path: ty.name.clone(),
                    kind: ty.kind,
                })
            }
        };
        Ok(pb::Type { value: Some(value) })
    }

    fn transform_scalar(&self, ty: &Type) -> pb::Scalar {
        pb::Scalar {
            name: self.name(&ty.name),
            description: ty.description.clone(),
        }
    }

    fn transform_enum(&self, ty: &Type) -> pb::Enum {
        pb::Enum {
            name: self.name(&ty.name),
            description: ty.description.clone(),
            values: ty.enum_values.iter().map(transform_enum_value).collect(),
        }
    }

    fn transform_input(&self, ty: &Type) -> Result<pb::Input, CodegenError> {
        let fields = ty
            .input_fields
            .iter()
            .map(|iv| self.transform_input_field(iv, &ty.name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(pb::Input {
            name: self.name(&ty.name),
            description: ty.description.clone(),
            fields,
        })
    }

    fn transform_input_field(
        &self,
        iv: &InputValue,
        parent: &str,
    ) -> Result<pb::Field, CodegenError> {
        let path = format!("{parent}.{}", iv.name);
        Ok(pb::Field {
            name: iv.name.clone(),
            description: iv.description.clone(),
            default_value: iv.default_value.clone(),
            type_ref: Some(self.lower_type_ref(&iv.type_ref, &path)?),
        })
    }

    fn transform_object(&self, ty: &Type) -> Result<pb::Object, CodegenError> {
        let functions = ty
            .fields
            .iter()
            .map(|f| self.transform_function(f, &ty.name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(pb::Object {
            name: self.name(&ty.name),
            description: ty.description.clone(),
            functions,
        })
    }

    fn transform_function(
        &self,
        field: &Field,
        parent: &str,
    ) -> Result<pb::Function, CodegenError> {
        let path = format!("{parent}.{}", field.name);
        Ok(pb::Function {
            name: field.name.clone(),
            description: field.description.clone(),
            return_type: Some(self.lower_type_ref(&field.type_ref, &path)?),
            deprecated: field.deprecation().map(to_deprecation),
        })
    }

    /// Lower a type reference chain.
    ///
    /// `nullable` is false exactly when the outermost layer is `NON_NULL`; that
    /// layer is then stripped and the inner ref decides the variant. Lists
    /// recurse into their element, so element nullability is kept
    /// independently of the list's own.
    pub fn lower_type_ref(
        &self,
        type_ref: &TypeRef,
        path: &str,
    ) -> Result<pb::TypeRef, CodegenError> {
        tracing::trace!(path, kind = %type_ref.kind, "lowering type ref");

        let depth = type_ref.depth();
        if depth > MAX_TYPE_REF_DEPTH {
            return Err(CodegenError::malformed(
                path,
                format!("type reference nests {depth} wrappers, at most {MAX_TYPE_REF_DEPTH} allowed"),
            ));
        }

        let nullable = type_ref.kind != TypeKind::NonNull;
        let inner = if nullable {
            type_ref
        } else {
            of_type(type_ref, path)?
        };

        let kind = match inner.kind {
            TypeKind::Enum => pb::type_ref::Kind::EnumType(pb::EnumTypeRef {
                name: self.ref_name(inner, path)?,
            }),
            TypeKind::Object => pb::type_ref::Kind::ObjectType(pb::ObjectTypeRef {
                name: self.ref_name(inner, path)?,
            }),
            TypeKind::Scalar => pb::type_ref::Kind::ScalarType(pb::ScalarTypeRef {
                name: self.ref_name(inner, path)?,
            }),
            TypeKind::List => {
                let element_path = format!("{path}[]");
                let element = self.lower_type_ref(of_type(inner, path)?, &element_path)?;
                pb::type_ref::Kind::ListType(pb::ListTypeRef {
                    of_type: Some(Box::new(element)),
                })
            }
            TypeKind::Interface | TypeKind::Union | TypeKind::InputObject | TypeKind::NonNull => {
                return Err(CodegenError::UnsupportedKind {
                    path: path.to_string(),
                    kind: inner.kind,
                })
            }
        };

        Ok(pb::TypeRef {
            nullable,
            kind: Some(kind),
        })
    }

    fn name(&self, name: &str) -> String {
        self.options.normalize_name(name).to_string()
    }

    fn ref_name(&self, type_ref: &TypeRef, path: &str) -> Result<String, CodegenError> {
        type_ref
            .name
            .as_deref()
            .map(|name| self.name(name))
            .ok_or_else(|| {
                CodegenError::malformed(
                    path,
                    format!("{} reference without a name", type_ref.kind),
                )
            })
    }
}

fn of_type<'a>(type_ref: &'a TypeRef, path: &str) -> Result<&'a TypeRef, CodegenError> {
    type_ref.of_type.as_deref().ok_or_else(|| {
        CodegenError::malformed(path, format!("{} reference without `ofType`", type_ref.kind))
    })
}

fn transform_enum_value(ev: &EnumValue) -> pb::EnumValue {
    pb::EnumValue {
        name: ev.name.clone(),
        description: ev.description.clone(),
        deprecated: ev.deprecation().map(to_deprecation),
    }
}

fn to_deprecation(reason: &str) -> pb::Deprecation {
    pb::Deprecation {
        reason: reason.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Transform a parsed schema and encode it to protobuf bytes.
pub fn transform(schema: &Schema, options: &TransformOptions) -> Result<Vec<u8>, CodegenError> {
    let pb = Transformer::new(options.clone()).transform(schema)?;
    let mut buf = Vec::with_capacity(pb.encoded_len());
    pb.encode(&mut buf)?;
    Ok(buf)
}

/// Parse introspection JSON text, transform it, and encode it to protobuf bytes.
pub fn transform_json(
    introspection_json: &str,
    options: &TransformOptions,
) -> Result<Vec<u8>, CodegenError> {
    let schema = introspection::parse(introspection_json)?;
    transform(&schema, options)
}

/// Decode protobuf bytes produced by [`transform`].
pub fn decode(bytes: &[u8]) -> Result<pb::Schema, CodegenError> {
    Ok(pb::Schema::decode(bytes)?)
}
