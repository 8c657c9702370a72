//! Top-level mock server configuration.

use crate::filter::{FirstMatchRequestFilter, RequestFilter, RequestFilterRef};
use crate::headers::Headers;
use crate::types::request::Request;
use serde::{Deserialize, Serialize};

/// Bundle of request templates plus global mock server behavior
#[derive(Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Upstream that unmatched requests are forwarded to
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback_base_url: Option<String>,
    /// Request templates in declaration order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    requests: Vec<Request>,
    /// Hook choosing among `requests`, written back as a type identifier
    #[serde(skip_serializing)]
    request_filter: Option<RequestFilterRef>,
}

impl Configuration {
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    pub fn fallback_base_url(&self) -> Option<&str> {
        self.fallback_base_url.as_deref()
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn request_filter(&self) -> Option<&RequestFilterRef> {
        self.request_filter.as_ref()
    }

    /// Find the request template answering an incoming call.
    ///
    /// Without a configured request filter the first matching template wins.
    pub fn find_request(&self, method: &str, url: &str, headers: &Headers) -> Option<&Request> {
        match &self.request_filter {
            Some(filter) => filter.get().select(&self.requests, method, url, headers),
            None => FirstMatchRequestFilter.select(&self.requests, method, url, headers),
        }
    }
}

/// Staging area for a [`Configuration`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationBuilder {
    fallback_base_url: Option<String>,
    #[serde(skip)]
    requests: Vec<Request>,
    #[serde(skip)]
    request_filter: Option<RequestFilterRef>,
}

impl ConfigurationBuilder {
    pub fn with_fallback_base_url(mut self, url: impl Into<String>) -> Self {
        self.fallback_base_url = Some(url.into());
        self
    }

    pub fn with_requests(mut self, requests: Vec<Request>) -> Self {
        self.requests = requests;
        self
    }

    pub fn with_request(mut self, request: Request) -> Self {
        self.requests.push(request);
        self
    }

    pub fn with_request_filter(mut self, filter: RequestFilterRef) -> Self {
        self.request_filter = Some(filter);
        self
    }

    pub fn build(self) -> Configuration {
        Configuration {
            fallback_base_url: self.fallback_base_url,
            requests: self.requests,
            request_filter: self.request_filter,
        }
    }
}
