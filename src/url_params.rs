//! Pure functions for query parameter handling.
//!
//! Builds the final request URL from a base URL and an ordered list of query
//! parameters. These functions are stateless and side-effect-free.

use serde::{Deserialize, Serialize};

/// A single query parameter row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl QueryParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Encode query parameters as `key=value` pairs joined with `&`.
///
/// Keys and values are trimmed, then percent-encoded independently (space
/// becomes `%20`). Params whose key is empty after trimming are dropped even
/// when they carry a value. An empty value is kept and encodes to `key=`.
///
/// # Examples
/// ```
/// use amateur_postman::url_params::{encode_query, QueryParam};
///
/// let params = vec![QueryParam::new("q", "a b"), QueryParam::new("", "x")];
/// assert_eq!(encode_query(&params), "q=a%20b");
/// ```
pub fn encode_query(params: &[QueryParam]) -> String {
    params
        .iter()
        .filter_map(|p| {
            let key = p.key.trim();
            if key.is_empty() {
                return None;
            }
            Some(format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(p.value.trim())
            ))
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Append query parameters to a URL.
///
/// Uses `?` when the URL has no query string yet, `&` otherwise. When no
/// param survives filtering the URL is returned unchanged.
///
/// # Examples
/// ```
/// use amateur_postman::url_params::{build_url_with_params, QueryParam};
///
/// let params = vec![QueryParam::new("lang", "en")];
/// assert_eq!(
///     build_url_with_params("https://example.com/search?q=x", &params),
///     "https://example.com/search?q=x&lang=en"
/// );
/// ```
pub fn build_url_with_params(url: &str, params: &[QueryParam]) -> String {
    let query = encode_query(params);
    if query.is_empty() {
        return url.to_string();
    }

    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, query)
}
