//! Response template types.

use crate::headers::Headers;
use serde::{Deserialize, Serialize};

const DEFAULT_STATUS: u16 = 200;

/// HTTP response emitted for a matched request
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// HTTP status code
    status: u16,
    /// Response headers in canonical form
    #[serde(skip_serializing_if = "Headers::is_empty")]
    headers: Headers,
    /// Content type of the body
    #[serde(skip_serializing_if = "Option::is_none")]
    mime: Option<String>,
    /// Inline response body
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// Reference to a file holding the response body
    #[serde(skip_serializing_if = "Option::is_none")]
    asset: Option<String>,
    /// Minimum delay in milliseconds before the response is sent
    #[serde(skip_serializing_if = "Option::is_none")]
    delay: Option<u64>,
    /// Upper bound in milliseconds for a randomized delay
    #[serde(skip_serializing_if = "Option::is_none")]
    max_delay: Option<u64>,
}

impl Response {
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::default()
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn mime(&self) -> Option<&str> {
        self.mime.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn asset(&self) -> Option<&str> {
        self.asset.as_deref()
    }

    pub fn delay(&self) -> Option<u64> {
        self.delay
    }

    pub fn max_delay(&self) -> Option<u64> {
        self.max_delay
    }
}

/// Staging area for a [`Response`].
///
/// Populated by structural decode, or field by field through the `with_*`
/// setters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBuilder {
    status: Option<u16>,
    headers: Option<Headers>,
    mime: Option<String>,
    text: Option<String>,
    asset: Option<String>,
    delay: Option<u64>,
    max_delay: Option<u64>,
}

impl ResponseBuilder {
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
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

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_asset(mut self, asset: impl Into<String>) -> Self {
        self.asset = Some(asset.into());
        self
    }

    pub fn with_delay(mut self, delay: u64) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_max_delay(mut self, max_delay: u64) -> Self {
        self.max_delay = Some(max_delay);
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status.unwrap_or(DEFAULT_STATUS),
            headers: self.headers.unwrap_or_default(),
            mime: self.mime,
            text: self.text,
            asset: self.asset,
            delay: self.delay,
            max_delay: self.max_delay,
        }
    }
}
