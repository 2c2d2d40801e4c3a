use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::url_params::QueryParam;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";

/// Content type assumed for a request body when nothing else names one
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// HTTP methods supported by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    HEAD,
    OPTIONS,
}

/// How a method treats the request body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPolicy {
    /// Never sends a body, whatever the description holds
    Suppressed,
    /// Always sends a body entity, empty when none was given
    Always,
    /// Sends a body only when one was given
    IfPresent,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OPTIONS => "OPTIONS",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            HttpMethod::GET,
            HttpMethod::POST,
            HttpMethod::PUT,
            HttpMethod::DELETE,
            HttpMethod::PATCH,
            HttpMethod::HEAD,
            HttpMethod::OPTIONS,
        ]
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "DELETE" => Some(HttpMethod::DELETE),
            "PATCH" => Some(HttpMethod::PATCH),
            "HEAD" => Some(HttpMethod::HEAD),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            _ => None,
        }
    }

    pub fn body_policy(&self) -> BodyPolicy {
        match self {
            HttpMethod::GET | HttpMethod::HEAD | HttpMethod::OPTIONS => BodyPolicy::Suppressed,
            HttpMethod::POST | HttpMethod::PUT | HttpMethod::PATCH => BodyPolicy::Always,
            HttpMethod::DELETE => BodyPolicy::IfPresent,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Authentication mode selected for a request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Auth {
    #[default]
    None,
    Basic { username: String, password: String },
    Bearer { token: String },
}

/// Declarative request as collected by the UI shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescription {
    pub url: String,
    pub method: HttpMethod,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub query_params: Vec<QueryParam>,
    #[serde(default)]
    pub auth: Auth,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl RequestDescription {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            headers: BTreeMap::new(),
            query_params: vec![],
            auth: Auth::None,
            body: None,
            content_type: None,
        }
    }

    /// Set a header. A later call with the same name replaces the earlier value.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push(QueryParam::new(key, value));
        self
    }

    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Request ready to hand to a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    pub final_url: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
    pub content_type: Option<String>,
}

impl WireRequest {
    /// Look up a header value, matching the name case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name).map(|(_, v)| v.as_str())
    }
}

/// Raw response as produced by a transport.
///
/// A `status_code` of 0 means no response was received at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    pub status_code: u16,
    pub status_message: String,
    pub headers: BTreeMap<String, Vec<String>>,
    pub body: Vec<u8>,
    pub elapsed_millis: u64,
}

/// Response data structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status_code: u16,
    pub status_message: String,
    pub headers: BTreeMap<String, Vec<String>>,
    pub body: String,
    pub elapsed_millis: u64,
    /// Status in 200..=299. Always false for a transport failure.
    pub is_successful: bool,
}

impl Response {
    pub fn from_wire(wire: &WireResponse) -> Self {
        Self {
            status_code: wire.status_code,
            status_message: wire.status_message.clone(),
            headers: wire.headers.clone(),
            body: String::from_utf8_lossy(&wire.body).into_owned(),
            elapsed_millis: wire.elapsed_millis,
            is_successful: (200..300).contains(&wire.status_code),
        }
    }

    pub fn is_transport_failure(&self) -> bool {
        self.status_code == 0
    }

    pub fn is_error(&self) -> bool {
        self.is_transport_failure() || self.status_code >= 400
    }

    /// All values received for a header, in arrival order
    pub fn header_values(&self, name: &str) -> &[String] {
        find_header(&self.headers, name)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// First `Content-Type` value, if the server sent one
    pub fn content_type(&self) -> Option<&str> {
        self.header_values(CONTENT_TYPE).first().map(String::as_str)
    }
}

/// Case-insensitive header lookup. An exact-case match is preferred.
pub(crate) fn find_header<'a, V>(
    headers: &'a BTreeMap<String, V>,
    name: &str,
) -> Option<(&'a String, &'a V)> {
    headers
        .get_key_value(name)
        .or_else(|| headers.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_status(status_code: u16) -> Response {
        Response::from_wire(&WireResponse {
            status_code,
            status_message: String::new(),
            headers: BTreeMap::new(),
            body: vec![],
            elapsed_millis: 0,
        })
    }

    #[test]
    fn test_method_round_trips_through_str() {
        for method in HttpMethod::all() {
            assert_eq!(HttpMethod::from_str(method.as_str()), Some(method));
            assert_eq!(method.to_string(), method.as_str());
        }
        assert_eq!(HttpMethod::all().len(), 7);
    }

    #[test]
    fn test_method_from_str_is_case_insensitive() {
        assert_eq!(HttpMethod::from_str("patch"), Some(HttpMethod::PATCH));
        assert_eq!(HttpMethod::from_str(" Options "), Some(HttpMethod::OPTIONS));
        assert_eq!(HttpMethod::from_str("TRACE"), None);
    }

    #[test]
    fn test_body_policy() {
        assert_eq!(HttpMethod::GET.body_policy(), BodyPolicy::Suppressed);
        assert_eq!(HttpMethod::HEAD.body_policy(), BodyPolicy::Suppressed);
        assert_eq!(HttpMethod::OPTIONS.body_policy(), BodyPolicy::Suppressed);
        assert_eq!(HttpMethod::POST.body_policy(), BodyPolicy::Always);
        assert_eq!(HttpMethod::PUT.body_policy(), BodyPolicy::Always);
        assert_eq!(HttpMethod::PATCH.body_policy(), BodyPolicy::Always);
        assert_eq!(HttpMethod::DELETE.body_policy(), BodyPolicy::IfPresent);
    }

    #[test]
    fn test_is_successful_range() {
        assert!(response_with_status(200).is_successful);
        assert!(response_with_status(204).is_successful);
        assert!(response_with_status(299).is_successful);
        assert!(!response_with_status(199).is_successful);
        assert!(!response_with_status(300).is_successful);
        assert!(!response_with_status(404).is_successful);
        assert!(!response_with_status(500).is_successful);
    }

    #[test]
    fn test_status_zero_is_transport_failure() {
        let response = response_with_status(0);
        assert!(!response.is_successful);
        assert!(response.is_transport_failure());
        assert!(response.is_error());
    }

    #[test]
    fn test_is_successful_is_serialized() {
        let value = serde_json::to_value(response_with_status(201)).unwrap();
        assert_eq!(value["is_successful"], true);

        let value = serde_json::to_value(response_with_status(0)).unwrap();
        assert_eq!(value["is_successful"], false);
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let mut response = response_with_status(200);
        response.headers.insert(
            "content-type".to_string(),
            vec!["application/json".to_string(), "text/plain".to_string()],
        );
        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(response.header_values("Content-Type").len(), 2);
        assert!(response.header_values("X-Missing").is_empty());
    }

    #[test]
    fn test_duplicate_headers_last_write_wins() {
        let request = RequestDescription::new(HttpMethod::GET, "https://x.test")
            .with_header("Accept", "text/plain")
            .with_header("Accept", "application/json");
        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.headers["Accept"], "application/json");
    }

    #[test]
    fn test_description_deserializes_with_defaults() {
        let request: RequestDescription =
            serde_json::from_str(r#"{"url":"https://x.test","method":"GET"}"#).unwrap();
        assert_eq!(request, RequestDescription::new(HttpMethod::GET, "https://x.test"));
    }

    #[test]
    fn test_auth_deserializes_tagged() {
        let auth: Auth =
            serde_json::from_str(r#"{"type":"basic","username":"u","password":"p"}"#).unwrap();
        assert_eq!(
            auth,
            Auth::Basic {
                username: "u".to_string(),
                password: "p".to_string()
            }
        );
        let auth: Auth = serde_json::from_str(r#"{"type":"bearer","token":"t"}"#).unwrap();
        assert_eq!(auth, Auth::Bearer { token: "t".to_string() });
    }

    #[test]
    fn test_from_wire_decodes_lossily() {
        let wire = WireResponse {
            status_code: 200,
            status_message: "OK".to_string(),
            headers: BTreeMap::new(),
            body: vec![b'o', b'k', 0xff],
            elapsed_millis: 12,
        };
        let response = Response::from_wire(&wire);
        assert_eq!(response.body, "ok\u{fffd}");
        assert_eq!(response.elapsed_millis, 12);
    }
}
