//! JSON helpers for request and response bodies.

/// Pretty-print a response body that claims to be JSON.
///
/// Re-serializes with 2-space indentation. Object keys stay in the order the
/// server sent them and numbers keep their type. The `Err` text is only used
/// for logging: callers show the raw body instead.
///
/// ```
/// use amateur_postman::code_formatter::format_json;
///
/// assert_eq!(format_json(r#"{"b":1,"a":2}"#).unwrap(), "{\n  \"b\": 1,\n  \"a\": 2\n}");
/// assert!(format_json("not-json").is_err());
/// ```
pub fn format_json(body: &str) -> Result<String, String> {
    if body.trim().is_empty() {
        return Err("Empty input".to_string());
    }

    let value = serde_json::from_str::<serde_json::Value>(body)
        .map_err(|e| format!("JSON parse error: {}", e))?;
    serde_json::to_string_pretty(&value).map_err(|e| format!("JSON format error: {}", e))
}

/// Check a request body that is about to be sent as JSON.
///
/// A blank body passes: POST/PUT/PATCH send an empty entity when no body was
/// given, and that is not a mistake worth reporting.
pub fn validate_json(body: &str) -> Result<(), String> {
    if body.trim().is_empty() {
        return Ok(());
    }

    match serde_json::from_str::<serde::de::IgnoredAny>(body) {
        Ok(_) => Ok(()),
        Err(e) => Err(format!("Invalid JSON: {}", e)),
    }
}
