//! Pluggable filter hooks.
//!
//! A filter is referenced on the wire by a type identifier and held in memory
//! as a live instance. [`FilterRegistry`] maps between the two.

mod builtin;
mod registry;

pub use builtin::{FirstMatchRequestFilter, FirstResponseFilter, SequentialResponseFilter};
pub use registry::FilterRegistry;

use crate::headers::Headers;
use crate::types::request::Request;
use crate::types::response::Response;
use std::any::{type_name, TypeId};
use std::fmt;

/// Picks the request template that should answer an incoming call.
pub trait RequestFilter: Send + Sync + 'static {
    fn select<'a>(
        &self,
        requests: &'a [Request],
        method: &str,
        url: &str,
        headers: &Headers,
    ) -> Option<&'a Request>;
}

/// Picks which of a request template's responses to serve.
pub trait ResponseFilter: Send + Sync + 'static {
    fn select<'a>(&self, request: &Request, responses: &'a [Response]) -> Option<&'a Response>;
}

/// Capability a filter type provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Request,
    Response,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::Request => f.write_str("request filter"),
            FilterKind::Response => f.write_str("response filter"),
        }
    }
}

/// A resolved filter instance of either capability.
#[derive(Debug, PartialEq)]
pub enum Filter {
    Request(RequestFilterRef),
    Response(ResponseFilterRef),
}

impl Filter {
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::Request(_) => FilterKind::Request,
            Filter::Response(_) => FilterKind::Response,
        }
    }
}

/// Owned request filter instance that remembers its concrete type.
///
/// Two references compare equal when they wrap the same concrete type.
pub struct RequestFilterRef {
    filter: Box<dyn RequestFilter>,
    type_id: TypeId,
    type_name: &'static str,
}

impl RequestFilterRef {
    pub fn new<F: RequestFilter>(filter: F) -> Self {
        Self {
            filter: Box::new(filter),
            type_id: TypeId::of::<F>(),
            type_name: type_name::<F>(),
        }
    }

    pub fn get(&self) -> &dyn RequestFilter {
        self.filter.as_ref()
    }

    pub fn concrete_type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for RequestFilterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RequestFilterRef").field(&self.type_name).finish()
    }
}

impl PartialEq for RequestFilterRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

/// Owned response filter instance that remembers its concrete type.
///
/// Two references compare equal when they wrap the same concrete type.
pub struct ResponseFilterRef {
    filter: Box<dyn ResponseFilter>,
    type_id: TypeId,
    type_name: &'static str,
}

impl ResponseFilterRef {
    pub fn new<F: ResponseFilter>(filter: F) -> Self {
        Self {
            filter: Box::new(filter),
            type_id: TypeId::of::<F>(),
            type_name: type_name::<F>(),
        }
    }

    pub fn get(&self) -> &dyn ResponseFilter {
        self.filter.as_ref()
    }

    pub fn concrete_type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for ResponseFilterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResponseFilterRef").field(&self.type_name).finish()
    }
}

impl PartialEq for ResponseFilterRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

/// Failure to map between a filter identifier and an instance
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// No filter type is registered under the identifier
    #[error("Unknown filter type: {identifier}")]
    UnknownType { identifier: String },
    /// The registered factory refused to build an instance
    #[error("Filter '{identifier}' could not be constructed: {reason}")]
    NotConstructible { identifier: String, reason: String },
    /// The identifier names a filter of the other capability
    #[error("Filter '{identifier}' is a {found}, expected a {expected}")]
    CapabilityMismatch {
        identifier: String,
        expected: FilterKind,
        found: FilterKind,
    },
    /// The instance's concrete type was never registered
    #[error("No identifier registered for {kind} type {type_name}")]
    Unregistered {
        type_name: &'static str,
        kind: FilterKind,
    },
}
