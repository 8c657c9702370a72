//! Domain types for configurations, request templates, and response templates.
//!
//! Each type is immutable once built and is produced through its builder.

pub mod configuration;
pub mod request;
pub mod response;
