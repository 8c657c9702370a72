//! Configuration document codec.

use crate::codec::document::parse_tree_for_path;
use crate::codec::{
    as_object_mut, into_object, put_filter_identifier, take_filter_identifier, take_nested,
    JsonCodec, REQUESTS_KEY, REQUEST_FILTER_KEY,
};
use crate::error::CodecError;
use crate::types::configuration::{Configuration, ConfigurationBuilder};
use serde_json::Value;
use tracing::debug;

const DOCUMENT: &str = "configuration";

impl JsonCodec {
    /// Decode a JSON configuration document
    pub fn decode_configuration(&self, text: &str) -> Result<Configuration, CodecError> {
        let tree: Value = serde_json::from_str(text)?;
        self.configuration_from_tree(tree)
    }

    /// Decode a configuration document whose syntax follows the path extension
    pub fn decode_configuration_document(
        &self,
        content: &str,
        path: &str,
    ) -> Result<Configuration, CodecError> {
        debug!(path, "Decoding configuration document");
        self.configuration_from_tree(parse_tree_for_path(content, path)?)
    }

    /// Decode a configuration from an already parsed tree
    pub fn configuration_from_tree(&self, tree: Value) -> Result<Configuration, CodecError> {
        let mut object = into_object(tree, DOCUMENT)?;
        let filter_identifier = take_filter_identifier(&mut object, REQUEST_FILTER_KEY)?;
        let requests = take_nested(&mut object, REQUESTS_KEY)?
            .into_iter()
            .map(|request| self.request_from_tree(request))
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder: ConfigurationBuilder = serde_json::from_value(Value::Object(object))?;
        builder = builder.with_requests(requests);

        if let Some(identifier) = filter_identifier {
            let filter = self.registry.resolve_request_filter(&identifier)?;
            builder = builder.with_request_filter(filter);
        }

        let configuration = builder.build();
        debug!(
            requests = configuration.requests().len(),
            request_filter = configuration.request_filter().map(|f| f.type_name()),
            "Decoded configuration"
        );
        Ok(configuration)
    }

    /// Encode a configuration as a JSON document
    pub fn encode_configuration(
        &self,
        configuration: &Configuration,
    ) -> Result<String, CodecError> {
        self.write_tree(&self.configuration_to_tree(configuration)?)
    }

    /// Encode a configuration into a tree, nested filter identifiers included
    pub fn configuration_to_tree(
        &self,
        configuration: &Configuration,
    ) -> Result<Value, CodecError> {
        let mut tree = serde_json::to_value(configuration)?;
        let object = as_object_mut(&mut tree, DOCUMENT)?;

        if let Some(Value::Array(encoded)) = object.get_mut(REQUESTS_KEY) {
            for (slot, request) in encoded.iter_mut().zip(configuration.requests()) {
                self.write_response_filter(slot, request)?;
            }
        }

        let identifier = configuration
            .request_filter()
            .map(|filter| self.registry.identifier_of_request_filter(filter))
            .transpose()?;
        put_filter_identifier(object, REQUEST_FILTER_KEY, identifier);

        Ok(tree)
    }
}
