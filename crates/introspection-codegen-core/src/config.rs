//! Configuration for schema transformation.

use serde::{Deserialize, Serialize};

/// Options for transforming an introspection schema.
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (`root-type`, `client-name`), matching
/// the JSON accepted by the CLI `--config` flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TransformOptions {
    /// Name of the GraphQL root operation type in the input. Default: `Query`.
    pub root_type: String,
    /// Name the root type is emitted under. Default: `Client`.
    pub client_name: String,
}

impl TransformOptions {
    /// Apply the single naming rule: the root type is renamed to the client name,
    /// every other name passes through untouched.
    pub fn normalize_name<'a>(&'a self, name: &'a str) -> &'a str {
        if name == self.root_type {
            &self.client_name
        } else {
            name
        }
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            root_type: "Query".to_string(),
            client_name: "Client".to_string(),
        }
    }
}
