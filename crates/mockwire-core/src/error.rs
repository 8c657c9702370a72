//! Error types for document decoding and encoding.

use crate::filter::FilterError;

/// Error raised while decoding or encoding a wire document
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Malformed JSON, or a tree that does not fit the target structure
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    /// Malformed YAML document
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Document path with an extension no parser is known for
    #[error("Unknown file type: {0}")]
    UnknownFileType(String),
    /// Document root (or a nested element) is not a JSON object
    #[error("Expected a JSON object for {document}")]
    NotAnObject { document: &'static str },
    /// Filter identifier present but not a string
    #[error("Field '{field}' must hold a type identifier string")]
    InvalidFilterField { field: &'static str },
    /// Filter identifier could not be resolved or reduced
    #[error(transparent)]
    Filter(#[from] FilterError),
    /// Builder could not be finalized
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Error raised when a builder is finalized with required fields unset
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
