//! Request document codec.

use crate::codec::document::parse_tree_for_path;
use crate::codec::{
    as_object_mut, into_object, put_filter_identifier, take_filter_identifier, take_nested,
    JsonCodec, RESPONSES_KEY, RESPONSE_FILTER_KEY,
};
use crate::error::CodecError;
use crate::headers::prepare_headers;
use crate::types::request::{Request, RequestBuilder};
use serde_json::Value;
use tracing::debug;

const DOCUMENT: &str = "request";

impl JsonCodec {
    /// Decode a JSON request document
    pub fn decode_request(&self, text: &str) -> Result<Request, CodecError> {
        let tree: Value = serde_json::from_str(text)?;
        self.request_from_tree(tree)
    }

    /// Decode a request document whose syntax follows the path extension
    pub fn decode_request_document(
        &self,
        content: &str,
        path: &str,
    ) -> Result<Request, CodecError> {
        self.request_from_tree(parse_tree_for_path(content, path)?)
    }

    /// Decode a request from an already parsed tree
    pub fn request_from_tree(&self, tree: Value) -> Result<Request, CodecError> {
        let mut object = prepare_headers(into_object(tree, DOCUMENT)?);
        let filter_identifier = take_filter_identifier(&mut object, RESPONSE_FILTER_KEY)?;
        let responses = take_nested(&mut object, RESPONSES_KEY)?
            .into_iter()
            .map(|response| self.response_from_tree(response))
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder: RequestBuilder = serde_json::from_value(Value::Object(object))?;
        builder = builder.with_responses(responses);

        if let Some(identifier) = filter_identifier {
            let filter = self.registry.resolve_response_filter(&identifier)?;
            builder = builder.with_response_filter(filter);
        }

        let request = builder.build()?;
        debug!(
            method = request.method(),
            url = request.url(),
            responses = request.responses().len(),
            "Decoded request"
        );
        Ok(request)
    }

    /// Encode a request as a JSON document
    pub fn encode_request(&self, request: &Request) -> Result<String, CodecError> {
        self.write_tree(&self.request_to_tree(request)?)
    }

    /// Encode a request into a tree, filter identifier included
    pub fn request_to_tree(&self, request: &Request) -> Result<Value, CodecError> {
        let mut tree = serde_json::to_value(request)?;
        self.write_response_filter(&mut tree, request)?;
        Ok(tree)
    }

    /// Write the response filter identifier of `request` into its encoded tree.
    pub(crate) fn write_response_filter(
        &self,
        tree: &mut Value,
        request: &Request,
    ) -> Result<(), CodecError> {
        let identifier = request
            .response_filter()
            .map(|filter| self.registry.identifier_of_response_filter(filter))
            .transpose()?;
        put_filter_identifier(as_object_mut(tree, DOCUMENT)?, RESPONSE_FILTER_KEY, identifier);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::codec::JsonCodec;
    use crate::error::{BuildError, CodecError};
    use crate::filter::{
        FilterError, FilterKind, FilterRegistry, FirstMatchRequestFilter, FirstResponseFilter,
        ResponseFilter, ResponseFilterRef, SequentialResponseFilter,
    };
    use crate::headers::Headers;
    use crate::types::request::Request;
    use crate::types::response::Response;
    use rstest::rstest;
    use serde_json::json;
    use std::any::type_name;
    use std::sync::Arc;

    #[derive(Default)]
    struct NotFoundResponseFilter;

    impl ResponseFilter for NotFoundResponseFilter {
        fn select<'a>(&self, _: &Request, responses: &'a [Response]) -> Option<&'a Response> {
            responses.iter().find(|response| response.status() == 404)
        }
    }

    fn codec() -> JsonCodec {
        let mut registry = FilterRegistry::with_builtin_filters();
        registry.register_response_filter_as("com.example.NotFoundFilter", || {
            Ok(NotFoundResponseFilter)
        });
        JsonCodec::new(Arc::new(registry))
    }

    #[rstest]
    fn test_decode_request_resolves_response_filter() {
        let text = r#"{
            "method": "POST",
            "url": "/orders",
            "headers": "Content-Type: application/json",
            "responseFilter": "com.example.NotFoundFilter",
            "responses": [
                {"status": 201},
                {"status": 404, "headers": [{"key": "X-Reason", "value": "gone"}]}
            ]
        }"#;

        let request = codec().decode_request(text).expect("Should decode");
        assert_eq!(request.method(), "POST");
        assert_eq!(request.url(), "/orders");
        assert_eq!(request.headers()["Content-Type"], "application/json");
        assert_eq!(request.responses().len(), 2);
        assert_eq!(request.responses()[1].headers()["X-Reason"], "gone");
        assert_eq!(
            request.response_filter(),
            Some(&ResponseFilterRef::new(NotFoundResponseFilter))
        );
        assert_eq!(request.select_response().map(Response::status), Some(404));
    }

    #[rstest]
    fn test_decode_request_unknown_filter_fails() {
        let text = r#"{"url": "/a", "responseFilter": "does.not.Exist"}"#;
        let error = codec().decode_request(text).unwrap_err();
        assert!(matches!(
            error,
            CodecError::Filter(FilterError::UnknownType { ref identifier })
                if identifier == "does.not.Exist"
        ));
    }

    #[rstest]
    fn test_decode_request_request_filter_in_response_slot_fails() {
        let identifier = type_name::<FirstMatchRequestFilter>();
        let text = json!({"url": "/a", "responseFilter": identifier}).to_string();
        let error = codec().decode_request(&text).unwrap_err();
        assert!(matches!(
            error,
            CodecError::Filter(FilterError::CapabilityMismatch {
                expected: FilterKind::Response,
                found: FilterKind::Request,
                ..
            })
        ));
    }

    #[rstest]
    #[case(r#"{"url": "/a", "responseFilter": ""}"#)]
    #[case(r#"{"url": "/a", "responseFilter": null}"#)]
    #[case(r#"{"url": "/a"}"#)]
    fn test_decode_request_without_filter(#[case] text: &str) {
        let request = codec().decode_request(text).expect("Should decode");
        assert!(request.response_filter().is_none());
    }

    #[rstest]
    fn test_decode_request_nested_response_error_aborts() {
        let text = r#"{"url": "/a", "responses": [{"status": 200}, {"status": -1}]}"#;
        let error = codec().decode_request(text).unwrap_err();
        assert!(matches!(error, CodecError::Json(_)));
    }

    #[rstest]
    fn test_decode_request_missing_url() {
        let error = codec().decode_request(r#"{"method": "GET"}"#).unwrap_err();
        assert!(matches!(
            error,
            CodecError::Build(BuildError::MissingField("url"))
        ));
    }

    #[rstest]
    fn test_encode_request_writes_filter_identifier() {
        let request = Request::builder()
            .with_url("/a")
            .with_response(Response::builder().build())
            .with_response_filter(ResponseFilterRef::new(SequentialResponseFilter::default()))
            .build()
            .expect("Should build");

        let tree = codec().request_to_tree(&request).expect("Should encode");
        assert_eq!(
            tree,
            json!({
                "method": "GET",
                "url": "/a",
                "responses": [{"status": 200}],
                "responseFilter": type_name::<SequentialResponseFilter>()
            })
        );
    }

    #[rstest]
    fn test_encode_request_without_filter_omits_key() {
        let request = Request::builder().with_url("/a").build().expect("Should build");
        let text = codec().encode_request(&request).expect("Should encode");
        assert!(!text.contains("responseFilter"));
    }

    #[rstest]
    fn test_encode_request_unregistered_filter_fails() {
        struct LocalFilter;

        impl ResponseFilter for LocalFilter {
            fn select<'a>(&self, _: &Request, _: &'a [Response]) -> Option<&'a Response> {
                None
            }
        }

        let request = Request::builder()
            .with_url("/a")
            .with_response_filter(ResponseFilterRef::new(LocalFilter))
            .build()
            .expect("Should build");
        let error = codec().encode_request(&request).unwrap_err();
        assert!(matches!(
            error,
            CodecError::Filter(FilterError::Unregistered {
                kind: FilterKind::Response,
                ..
            })
        ));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(ResponseFilterRef::new(FirstResponseFilter)))]
    #[case(Some(ResponseFilterRef::new(NotFoundResponseFilter)))]
    fn test_request_round_trip(#[case] filter: Option<ResponseFilterRef>) {
        let codec = codec();
        let mut builder = Request::builder()
            .with_method("PUT")
            .with_url("/users/\\d+")
            .with_header("Authorization", "Bearer token")
            .with_response(Response::builder().with_status(204).build());
        if let Some(filter) = filter {
            builder = builder.with_response_filter(filter);
        }
        let request = builder.build().expect("Should build");

        let text = codec.encode_request(&request).expect("Should encode");
        let decoded = codec.decode_request(&text).expect("Should decode");
        assert_eq!(decoded, request);

        let identifier = |request: &Request| {
            request.response_filter().map(|filter| {
                codec
                    .registry()
                    .identifier_of_response_filter(filter)
                    .map(str::to_string)
            })
        };
        assert_eq!(identifier(&decoded), identifier(&request));
    }

    #[rstest]
    fn test_decode_request_document_jsonc() {
        let content = r#"{
            // matched against the full path
            "url": "/health",
            "headers": ["not a pair", {"key": "Accept", "value": "*/*"}] /* lenient */
        }"#;
        let request = codec()
            .decode_request_document(content, "health.jsonc")
            .expect("Should decode");

        let mut headers = Headers::new();
        headers.insert("accept".to_string(), "*/*".to_string());
        assert!(request.is_match("GET", "/health", &headers));
    }
}
