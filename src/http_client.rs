use anyhow::{Context, Result};
use reqwest::redirect::Policy;
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Instant;
use url::Url;

use crate::config::ClientConfig;
use crate::request_builder;
use crate::response_formatter;
use crate::types::{
    find_header, HttpMethod, RequestDescription, Response, WireRequest, WireResponse, CONTENT_TYPE,
};

/// Executes a `WireRequest` and reports what came back.
///
/// An `Err` means no response was received at all (DNS failure, refused
/// connection, timeout, malformed URL). HTTP error statuses are not errors.
pub trait Transport {
    fn execute(&self, request: &WireRequest) -> impl Future<Output = Result<WireResponse>> + Send;
}

/// HTTP transport backed by reqwest
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let redirect = if config.follow_redirects {
            Policy::limited(config.max_redirects)
        } else {
            Policy::none()
        };

        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .redirect(redirect)
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to initialize HTTP client")?;

        Ok(Self { client })
    }
}

impl Transport for HttpClient {
    async fn execute(&self, request: &WireRequest) -> Result<WireResponse> {
        log::info!("Executing {} request to {}", request.method, request.final_url);

        let url = Url::parse(&request.final_url)
            .with_context(|| format!("Invalid URL: {}", request.final_url))?;

        let mut req = self.client.request(reqwest_method(request.method), url);
        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            if find_header(&request.headers, CONTENT_TYPE).is_none() {
                if let Some(content_type) = &request.content_type {
                    req = req.header(reqwest::header::CONTENT_TYPE, content_type.as_str());
                }
            }
            req = req.body(body.clone());
        }

        let start = Instant::now();
        let response = req.send().await?;

        let status = response.status();
        let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in response.headers() {
            headers
                .entry(name.as_str().to_string())
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }

        let body = response
            .bytes()
            .await
            .context("Failed to read response body")?;
        let elapsed_millis = start.elapsed().as_millis() as u64;

        log::info!(
            "Request completed in {}ms with status {}",
            elapsed_millis,
            status.as_u16()
        );

        Ok(WireResponse {
            status_code: status.as_u16(),
            status_message: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body: body.to_vec(),
            elapsed_millis,
        })
    }
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::DELETE => reqwest::Method::DELETE,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::HEAD => reqwest::Method::HEAD,
        HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
    }
}

/// Status-0 response standing in for a request that never got an answer.
///
/// The body carries the message followed by the full cause chain.
pub fn transport_failure(error: &anyhow::Error, elapsed_millis: u64) -> WireResponse {
    let mut message = format!("{:#}", error);
    if message.trim().is_empty() {
        message = "Request failed".to_string();
    }
    let body = format!("Error: {}\n\n{:?}", message, error);

    WireResponse {
        status_code: 0,
        status_message: message,
        headers: BTreeMap::new(),
        body: body.into_bytes(),
        elapsed_millis,
    }
}

/// Outcome of one request, ready for display
#[derive(Debug, Clone)]
pub struct RoundTrip {
    pub request: WireRequest,
    pub response: Response,
    pub rendered: String,
}

/// Build, execute and format a single request.
///
/// Never fails: a transport error becomes a status-0 response rendered like
/// any other.
pub async fn send_request<T: Transport>(transport: &T, description: &RequestDescription) -> RoundTrip {
    let request = request_builder::build(description);

    let start = Instant::now();
    let wire = match transport.execute(&request).await {
        Ok(wire) => wire,
        Err(e) => {
            let elapsed_millis = start.elapsed().as_millis() as u64;
            log::warn!("Request failed after {}ms: {:#}", elapsed_millis, e);
            transport_failure(&e, elapsed_millis)
        }
    };

    let (response, rendered) = response_formatter::format(&wire);
    RoundTrip {
        request,
        response,
        rendered,
    }
}
