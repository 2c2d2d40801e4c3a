//! Turns a `RequestDescription` into a `WireRequest`.
//!
//! `build` is total: it never fails. A malformed URL passes through untouched
//! and is reported by the transport when the request is executed.

use std::collections::BTreeMap;

use crate::auth::authorization_header;
use crate::types::{
    find_header, BodyPolicy, RequestDescription, WireRequest, AUTHORIZATION,
    DEFAULT_CONTENT_TYPE, CONTENT_TYPE,
};
use crate::url_params::build_url_with_params;

pub fn build(request: &RequestDescription) -> WireRequest {
    let final_url = build_url_with_params(&request.url, &request.query_params);

    let mut headers = merge_headers(&request.headers);
    if let Some(value) = authorization_header(&request.auth) {
        headers.retain(|k, _| !k.eq_ignore_ascii_case(AUTHORIZATION));
        headers.insert(AUTHORIZATION.to_string(), value);
    }

    let body = resolve_body(request);
    // The JSON default only applies when a body is actually sent
    let content_type = find_header(&headers, CONTENT_TYPE)
        .map(|(_, v)| v.clone())
        .or_else(|| request.content_type.clone())
        .or_else(|| body.as_ref().map(|_| DEFAULT_CONTENT_TYPE.to_string()));

    log::debug!(
        "Built {} request to {} ({} headers, body: {})",
        request.method,
        final_url,
        headers.len(),
        body.as_ref().map_or(0, Vec::len)
    );

    WireRequest {
        final_url,
        method: request.method,
        headers,
        body,
        content_type,
    }
}

/// Trim user headers and drop rows with an empty name or value
fn merge_headers(headers: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, v)| !k.is_empty() && !v.is_empty())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn resolve_body(request: &RequestDescription) -> Option<Vec<u8>> {
    match request.method.body_policy() {
        BodyPolicy::Suppressed => None,
        BodyPolicy::Always => Some(request.body.clone().unwrap_or_default().into_bytes()),
        BodyPolicy::IfPresent => request.body.clone().map(String::into_bytes),
    }
}
