//! Server module for building the HTTP server
//!
//! This module provides a `ServerBuilder` that registers:
//! - record routes under `/api/posts`
//! - the `/api/health` route
//! - a JSON 404 fallback

pub mod builder;
pub mod exposure;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
