//! Error types for introspection parsing and schema transformation.

use thiserror::Error;

use crate::introspection::TypeKind;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed introspection at {path}: {message}")]
    MalformedInput { path: String, message: String },

    #[error("Unsupported type kind {kind} at {path}")]
    UnsupportedKind { path: String, kind: TypeKind },

    #[error("Protobuf encoding error: {0}")]
    Encode(#[from] prost::EncodeError),

    #[error("Protobuf decoding error: {0}")]
    Decode(#[from] prost::DecodeError),
}

impl CodegenError {
    pub(crate) fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True when the input document could not be decoded into the expected shape.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Json(_) | Self::MalformedInput { .. })
    }
}
