//! Outbound HTTP: request descriptions and the blocking client
//!
//! `HttpRequestSpec` describes a request, `ApiClient` validates and
//! executes it through a `Transport`.

pub mod client;
pub mod request;

pub use client::{ApiClient, ApiResponse, PreparedRequest, ReqwestTransport, Transport};
pub use request::{HttpMethod, HttpRequestSpec};
