//! Codec for mock server definitions.
//!
//! Translates between JSON documents describing a mock server configuration,
//! its request templates and their response templates, and the corresponding
//! immutable domain objects. Filters are written as type identifiers and
//! resolved through a [`FilterRegistry`] populated at startup.
//!
//! # Example
//!
//! ```
//! use mockwire_core::{FilterRegistry, JsonCodec};
//! use std::sync::Arc;
//!
//! let codec = JsonCodec::new(Arc::new(FilterRegistry::with_builtin_filters()));
//! let request = codec
//!     .decode_request(r#"{"url": "/ping", "headers": "Accept: text/plain"}"#)
//!     .unwrap();
//! assert_eq!(request.headers()["Accept"], "text/plain");
//!
//! let text = codec.encode_request(&request).unwrap();
//! assert_eq!(text, r#"{"method":"GET","url":"/ping","headers":{"Accept":"text/plain"}}"#);
//! ```

pub mod codec;
pub mod error;
pub mod filter;
pub mod headers;
pub mod types;

pub use codec::document::DocumentFormat;
pub use codec::{CodecOptions, JsonCodec};
pub use error::{BuildError, CodecError};
pub use filter::{
    Filter, FilterError, FilterKind, FilterRegistry, RequestFilter, RequestFilterRef,
    ResponseFilter, ResponseFilterRef,
};
pub use headers::Headers;
pub use types::configuration::{Configuration, ConfigurationBuilder};
pub use types::request::{Request, RequestBuilder};
pub use types::response::{Response, ResponseBuilder};
