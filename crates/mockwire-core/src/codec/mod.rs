//! Conversion between wire documents and domain objects.
//!
//! Decoding parses text into a [`serde_json::Value`] tree, normalizes headers,
//! lifts filter identifiers out of the tree, runs structural decode into a
//! builder, resolves the filters and finalizes the builder. Encoding runs the
//! same steps backwards.

pub mod document;

mod configuration;
mod request;
mod response;

use crate::error::CodecError;
use crate::filter::FilterRegistry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Key holding the request filter identifier of a configuration
pub const REQUEST_FILTER_KEY: &str = "requestFilter";
/// Key holding the response filter identifier of a request
pub const RESPONSE_FILTER_KEY: &str = "responseFilter";

const REQUESTS_KEY: &str = "requests";
const RESPONSES_KEY: &str = "responses";

/// Codec settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    /// Indent encoded documents
    pub pretty: bool,
}

/// Decodes and encodes configurations, requests and responses.
///
/// Holds no per-document state, so one codec can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct JsonCodec {
    registry: Arc<FilterRegistry>,
    options: CodecOptions,
}

impl JsonCodec {
    pub fn new(registry: Arc<FilterRegistry>) -> Self {
        Self::with_options(registry, CodecOptions::default())
    }

    pub fn with_options(registry: Arc<FilterRegistry>, options: CodecOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    pub fn options(&self) -> CodecOptions {
        self.options
    }

    fn write_tree(&self, tree: &Value) -> Result<String, CodecError> {
        let text = if self.options.pretty {
            serde_json::to_string_pretty(tree)?
        } else {
            serde_json::to_string(tree)?
        };
        Ok(text)
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::new(Arc::new(FilterRegistry::with_builtin_filters()))
    }
}

fn into_object(tree: Value, document: &'static str) -> Result<Map<String, Value>, CodecError> {
    match tree {
        Value::Object(object) => Ok(object),
        _ => Err(CodecError::NotAnObject { document }),
    }
}

fn as_object_mut<'a>(
    tree: &'a mut Value,
    document: &'static str,
) -> Result<&'a mut Map<String, Value>, CodecError> {
    tree.as_object_mut()
        .ok_or(CodecError::NotAnObject { document })
}

/// Remove a filter identifier from the tree.
///
/// Absent, null and empty identifiers all mean "no filter".
fn take_filter_identifier(
    object: &mut Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, CodecError> {
    match object.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(identifier)) if identifier.is_empty() => Ok(None),
        Some(Value::String(identifier)) => Ok(Some(identifier)),
        Some(_) => Err(CodecError::InvalidFilterField { field }),
    }
}

/// Replace whatever structural encode produced under `field` with the identifier.
fn put_filter_identifier(object: &mut Map<String, Value>, field: &str, identifier: Option<&str>) {
    object.remove(field);
    if let Some(identifier) = identifier {
        object.insert(field.to_string(), Value::String(identifier.to_string()));
    }
}

/// Remove a list of nested documents from the tree.
fn take_nested(object: &mut Map<String, Value>, field: &str) -> Result<Vec<Value>, CodecError> {
    match object.remove(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(CodecError::Json(<serde_json::Error as serde::de::Error>::custom(format!(
            "field '{}' must be an array",
            field
        )))),
    }
}
