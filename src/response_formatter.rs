//! Renders a `WireResponse` into a `Response` plus display text.
//!
//! Transport failures arrive here as status-0 responses and go through the
//! same rendering as real ones.

use std::fmt::Write as _;

use crate::code_formatter::format_json;
use crate::types::{Response, WireResponse};

const JSON_MEDIA_TYPE: &str = "application/json";

pub fn format(wire: &WireResponse) -> (Response, String) {
    let response = Response::from_wire(wire);
    let rendered = render(&response);
    (response, rendered)
}

/// Full text view: status line, elapsed time, headers, then body
pub fn render(response: &Response) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "HTTP {} {}", response.status_code, response.status_message);
    let _ = writeln!(out, "Duration: {}ms", response.elapsed_millis);
    out.push('\n');

    out.push_str("=== Headers ===\n");
    for (name, values) in &response.headers {
        for value in values {
            let _ = writeln!(out, "{}: {}", name, value);
        }
    }
    out.push('\n');

    out.push_str("=== Body ===\n");
    out.push_str(&format_body(response));
    out.push('\n');

    out
}

/// Pretty-print JSON bodies; anything else, or JSON that fails to parse, is
/// returned verbatim.
pub fn format_body(response: &Response) -> String {
    let is_json = response
        .content_type()
        .is_some_and(|ct| ct.to_ascii_lowercase().contains(JSON_MEDIA_TYPE));

    if !is_json {
        return response.body.clone();
    }

    format_json(&response.body).unwrap_or_else(|e| {
        log::debug!("Showing raw body: {}", e);
        response.body.clone()
    })
}

/// One-line summary for a status bar
pub fn status_summary(response: &Response) -> String {
    format!(
        "Status: {} {} | Time: {}ms",
        response.status_code, response.status_message, response.elapsed_millis
    )
}
