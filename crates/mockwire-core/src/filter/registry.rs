//! Registry mapping filter type identifiers to zero-argument factories.

use crate::filter::{
    Filter, FilterError, FilterKind, FirstMatchRequestFilter, FirstResponseFilter, RequestFilter,
    RequestFilterRef, ResponseFilter, ResponseFilterRef, SequentialResponseFilter,
};
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

type Factory = Box<dyn Fn() -> Result<Filter, String> + Send + Sync>;

struct Registration {
    kind: FilterKind,
    type_id: TypeId,
    factory: Factory,
}

/// Known filter types, keyed by identifier.
///
/// The registry is populated once at startup and then shared read-only
/// between codecs. Every registered type maps to exactly one identifier, so
/// [`FilterRegistry::resolve`] and the `identifier_of_*` lookups are inverses.
#[derive(Default)]
pub struct FilterRegistry {
    /// Map of identifier to registration
    registrations: HashMap<String, Registration>,
    /// Map of (capability, concrete type) to identifier
    identifiers: HashMap<(FilterKind, TypeId), String>,
}

impl FilterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the filters shipped with this crate
    pub fn with_builtin_filters() -> Self {
        let mut registry = Self::new();
        registry
            .register_request_filter::<FirstMatchRequestFilter>()
            .register_response_filter::<FirstResponseFilter>()
            .register_response_filter::<SequentialResponseFilter>();
        registry
    }

    /// Register a request filter under its fully-qualified type name
    pub fn register_request_filter<F>(&mut self) -> &mut Self
    where
        F: RequestFilter + Default,
    {
        self.register_request_filter_as::<F, _>(type_name::<F>(), || Ok(F::default()))
    }

    /// Register a request filter under an explicit identifier
    pub fn register_request_filter_as<F, M>(
        &mut self,
        identifier: impl Into<String>,
        factory: M,
    ) -> &mut Self
    where
        F: RequestFilter,
        M: Fn() -> Result<F, String> + Send + Sync + 'static,
    {
        let factory: Factory = Box::new(move || {
            factory().map(|filter| Filter::Request(RequestFilterRef::new(filter)))
        });
        self.insert(identifier.into(), FilterKind::Request, TypeId::of::<F>(), factory);
        self
    }

    /// Register a response filter under its fully-qualified type name
    pub fn register_response_filter<F>(&mut self) -> &mut Self
    where
        F: ResponseFilter + Default,
    {
        self.register_response_filter_as::<F, _>(type_name::<F>(), || Ok(F::default()))
    }

    /// Register a response filter under an explicit identifier
    pub fn register_response_filter_as<F, M>(
        &mut self,
        identifier: impl Into<String>,
        factory: M,
    ) -> &mut Self
    where
        F: ResponseFilter,
        M: Fn() -> Result<F, String> + Send + Sync + 'static,
    {
        let factory: Factory = Box::new(move || {
            factory().map(|filter| Filter::Response(ResponseFilterRef::new(filter)))
        });
        self.insert(identifier.into(), FilterKind::Response, TypeId::of::<F>(), factory);
        self
    }

    fn insert(&mut self, identifier: String, kind: FilterKind, type_id: TypeId, factory: Factory) {
        // A type keeps a single identifier per capability
        if let Some(previous) = self.identifiers.remove(&(kind, type_id)) {
            self.registrations.remove(&previous);
        }

        let registration = Registration {
            kind,
            type_id,
            factory,
        };
        if let Some(replaced) = self.registrations.insert(identifier.clone(), registration) {
            self.identifiers.remove(&(replaced.kind, replaced.type_id));
        }
        self.identifiers.insert((kind, type_id), identifier);
    }

    /// Whether an identifier is registered for any capability
    pub fn contains(&self, identifier: &str) -> bool {
        self.registrations.contains_key(identifier)
    }

    /// Construct a fresh instance of the filter registered under `identifier`.
    ///
    /// Fails if the identifier is unknown, the factory errors, or the
    /// registered type does not provide the `expected` capability.
    pub fn resolve(&self, identifier: &str, expected: FilterKind) -> Result<Filter, FilterError> {
        let registration =
            self.registrations
                .get(identifier)
                .ok_or_else(|| FilterError::UnknownType {
                    identifier: identifier.to_string(),
                })?;

        if registration.kind != expected {
            return Err(FilterError::CapabilityMismatch {
                identifier: identifier.to_string(),
                expected,
                found: registration.kind,
            });
        }

        let filter =
            (registration.factory)().map_err(|reason| FilterError::NotConstructible {
                identifier: identifier.to_string(),
                reason,
            })?;
        debug!(identifier, kind = %expected, "Resolved filter");
        Ok(filter)
    }

    pub fn resolve_request_filter(
        &self,
        identifier: &str,
    ) -> Result<RequestFilterRef, FilterError> {
        match self.resolve(identifier, FilterKind::Request)? {
            Filter::Request(filter) => Ok(filter),
            other => Err(FilterError::CapabilityMismatch {
                identifier: identifier.to_string(),
                expected: FilterKind::Request,
                found: other.kind(),
            }),
        }
    }

    pub fn resolve_response_filter(
        &self,
        identifier: &str,
    ) -> Result<ResponseFilterRef, FilterError> {
        match self.resolve(identifier, FilterKind::Response)? {
            Filter::Response(filter) => Ok(filter),
            other => Err(FilterError::CapabilityMismatch {
                identifier: identifier.to_string(),
                expected: FilterKind::Response,
                found: other.kind(),
            }),
        }
    }

    /// Identifier that resolves back to the filter's concrete type
    pub fn identifier_of_request_filter(
        &self,
        filter: &RequestFilterRef,
    ) -> Result<&str, FilterError> {
        self.identifier_of(FilterKind::Request, filter.concrete_type_id(), filter.type_name())
    }

    /// Identifier that resolves back to the filter's concrete type
    pub fn identifier_of_response_filter(
        &self,
        filter: &ResponseFilterRef,
    ) -> Result<&str, FilterError> {
        self.identifier_of(FilterKind::Response, filter.concrete_type_id(), filter.type_name())
    }

    fn identifier_of(
        &self,
        kind: FilterKind,
        type_id: TypeId,
        type_name: &'static str,
    ) -> Result<&str, FilterError> {
        self.identifiers
            .get(&(kind, type_id))
            .map(String::as_str)
            .ok_or(FilterError::Unregistered { type_name, kind })
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut identifiers: Vec<&String> = self.registrations.keys().collect();
        identifiers.sort();
        f.debug_struct("FilterRegistry")
            .field("identifiers", &identifiers)
            .finish()
    }
}
