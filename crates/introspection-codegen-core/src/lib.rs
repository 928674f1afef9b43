//! # introspection-codegen-core
//!
//! Turn a GraphQL introspection result into a normalized, protobuf-encoded
//! schema that per-language SDK emitters consume.
//!
//! The pipeline has three stages:
//!
//! 1. [`introspection::parse`] decodes the raw JSON into an immutable type graph.
//! 2. The query helpers in [`introspection::query`] answer structural questions
//!    over that graph (leaf fields, required arguments, ID scalars).
//! 3. [`Transformer`] lowers the graph into [`pb::Schema`], renaming the root
//!    type and flattening `NON_NULL`/`LIST` wrappers into tagged references.
//!
//! ```
//! use introspection_codegen_core::{decode, transform_json, TransformOptions};
//!
//! let json = r#"{"__schema": {"types": [{"kind": "SCALAR", "name": "ContainerID"}]}}"#;
//! let bytes = transform_json(json, &TransformOptions::default()).unwrap();
//! let schema = decode(&bytes).unwrap();
//! assert_eq!(schema.types[0].name(), Some("ContainerID"));
//! ```

pub mod config;
pub mod error;
pub mod introspection;
pub mod pb;
pub mod transform;

pub use config::TransformOptions;
pub use error::CodegenError;
pub use introspection::query::root_type;
pub use introspection::{parse, parse_value, Schema, TypeKind, MAX_TYPE_REF_DEPTH};
pub use transform::{decode, transform, transform_json, Transformer};
