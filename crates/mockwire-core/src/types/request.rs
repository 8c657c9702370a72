//! Request template types.

use crate::error::BuildError;
use crate::filter::ResponseFilterRef;
use crate::headers::Headers;
use crate::types::response::Response;
use regex::Regex;
use serde::{Deserialize, Serialize};

const DEFAULT_METHOD: &str = "GET";

/// Expected incoming HTTP request and the responses it is answered with
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// HTTP method, compared case-insensitively
    method: String,
    /// URL pattern (regular expression, anchored on both ends)
    url: String,
    /// Headers the incoming request must carry
    #[serde(skip_serializing_if = "Headers::is_empty")]
    headers: Headers,
    /// Candidate responses
    #[serde(skip_serializing_if = "Vec::is_empty")]
    responses: Vec<Response>,
    /// Hook choosing among `responses`, written back as a type identifier
    #[serde(skip_serializing)]
    response_filter: Option<ResponseFilterRef>,
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    pub fn response_filter(&self) -> Option<&ResponseFilterRef> {
        self.response_filter.as_ref()
    }

    /// Check whether an incoming call matches this template.
    ///
    /// The method is compared case-insensitively and the URL against the
    /// anchored pattern. An invalid pattern only matches itself literally.
    /// Every template header must be present with an equal value; header
    /// names are case-insensitive.
    pub fn is_match(&self, method: &str, url: &str, headers: &Headers) -> bool {
        if !self.method.eq_ignore_ascii_case(method) {
            return false;
        }

        let url_matches = match Regex::new(&format!("^(?:{})$", self.url)) {
            Ok(pattern) => pattern.is_match(url),
            Err(_) => self.url == url,
        };
        if !url_matches {
            return false;
        }

        self.headers.iter().all(|(name, value)| {
            headers
                .iter()
                .any(|(k, v)| k.eq_ignore_ascii_case(name) && v == value)
        })
    }

    /// Pick the response to serve, through the response filter if one is set.
    pub fn select_response(&self) -> Option<&Response> {
        match &self.response_filter {
            Some(filter) => filter.get().select(self, &self.responses),
            None => self.responses.first(),
        }
    }
}

/// Staging area for a [`Request`].
///
/// Structural decode fills the plain fields; responses and the response
/// filter are attached by the codec afterwards.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBuilder {
    method: Option<String>,
    url: Option<String>,
    headers: Option<Headers>,
    #[serde(skip)]
    responses: Vec<Response>,
    #[serde(skip)]
    response_filter: Option<ResponseFilterRef>,
}

impl RequestBuilder {
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_responses(mut self, responses: Vec<Response>) -> Self {
        self.responses = responses;
        self
    }

    pub fn with_response(mut self, response: Response) -> Self {
        self.responses.push(response);
        self
    }

    pub fn with_response_filter(mut self, filter: ResponseFilterRef) -> Self {
        self.response_filter = Some(filter);
        self
    }

    pub fn build(self) -> Result<Request, BuildError> {
        let url = self.url.ok_or(BuildError::MissingField("url"))?;

        Ok(Request {
            method: self.method.unwrap_or_else(|| DEFAULT_METHOD.to_string()),
            url,
            headers: self.headers.unwrap_or_default(),
            responses: self.responses,
            response_filter: self.response_filter,
        })
    }
}
