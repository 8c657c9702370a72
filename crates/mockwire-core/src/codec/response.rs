//! Response document codec.

use crate::codec::document::parse_tree_for_path;
use crate::codec::{into_object, JsonCodec};
use crate::error::CodecError;
use crate::headers::prepare_headers;
use crate::types::response::{Response, ResponseBuilder};
use serde_json::Value;
use tracing::debug;

const DOCUMENT: &str = "response";

impl JsonCodec {
    /// Decode a JSON response document
    pub fn decode_response(&self, text: &str) -> Result<Response, CodecError> {
        let tree: Value = serde_json::from_str(text)?;
        self.response_from_tree(tree)
    }

    /// Decode a response document whose syntax follows the path extension
    pub fn decode_response_document(
        &self,
        content: &str,
        path: &str,
    ) -> Result<Response, CodecError> {
        self.response_from_tree(parse_tree_for_path(content, path)?)
    }

    /// Decode a response from an already parsed tree
    pub fn response_from_tree(&self, tree: Value) -> Result<Response, CodecError> {
        let object = prepare_headers(into_object(tree, DOCUMENT)?);
        let builder: ResponseBuilder = serde_json::from_value(Value::Object(object))?;
        let response = builder.build();
        debug!(status = response.status(), "Decoded response");
        Ok(response)
    }

    /// Encode a response as a JSON document
    pub fn encode_response(&self, response: &Response) -> Result<String, CodecError> {
        self.write_tree(&self.response_to_tree(response)?)
    }

    /// Encode a response into a tree
    pub fn response_to_tree(&self, response: &Response) -> Result<Value, CodecError> {
        Ok(serde_json::to_value(response)?)
    }
}
