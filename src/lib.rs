//! Request assembly, transport and response rendering for a Postman-like
//! HTTP client.
//!
//! A UI shell collects a [`RequestDescription`], [`request_builder::build`]
//! turns it into a [`WireRequest`], a [`Transport`] executes it, and
//! [`response_formatter::format`] renders what came back. The builder and the
//! formatter are pure; only the transport does I/O.

pub mod auth;
pub mod code_formatter;
pub mod config;
pub mod http_client;
pub mod request_builder;
pub mod response_formatter;
pub mod types;
pub mod url_params;

pub use config::ClientConfig;
pub use http_client::{send_request, transport_failure, HttpClient, RoundTrip, Transport};
pub use types::{Auth, HttpMethod, RequestDescription, Response, WireRequest, WireResponse};
pub use url_params::QueryParam;
