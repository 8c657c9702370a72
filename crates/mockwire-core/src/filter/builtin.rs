//! Filters shipped with the crate.

use crate::filter::{RequestFilter, ResponseFilter};
use crate::headers::Headers;
use crate::types::request::Request;
use crate::types::response::Response;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Selects the first request template matching the incoming call.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstMatchRequestFilter;

impl RequestFilter for FirstMatchRequestFilter {
    fn select<'a>(
        &self,
        requests: &'a [Request],
        method: &str,
        url: &str,
        headers: &Headers,
    ) -> Option<&'a Request> {
        requests
            .iter()
            .find(|request| request.is_match(method, url, headers))
    }
}

/// Always serves the first response.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstResponseFilter;

impl ResponseFilter for FirstResponseFilter {
    fn select<'a>(&self, _request: &Request, responses: &'a [Response]) -> Option<&'a Response> {
        responses.first()
    }
}

/// Serves responses in order, wrapping around after the last one.
#[derive(Debug, Default)]
pub struct SequentialResponseFilter {
    next: AtomicUsize,
}

impl ResponseFilter for SequentialResponseFilter {
    fn select<'a>(&self, _request: &Request, responses: &'a [Response]) -> Option<&'a Response> {
        if responses.is_empty() {
            return None;
        }
        let index = self.next.fetch_add(1, Ordering::Relaxed) % responses.len();
        responses.get(index)
    }
}
