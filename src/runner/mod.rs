mod pool;
mod result;


pub use pool::{RunOptions, run_all};
pub use result::{TestResult, TestSummary};

use std::collections::BTreeMap;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use url::Url;

use crate::args::DEFAULT_USER_AGENT;
use crate::collection::{Collection, Item, Request, resolve_url};
use crate::error::RunnerError;

const RAW_BODY_MODE: &str = "raw";
const JSON_LANGUAGE_HINT: &str = "json";

/// Executes collections against one HTTP client with a fixed per-request
/// timeout.
pub struct Runner {
    client: Client,
}

impl Runner {
    /// Creates a runner whose client applies `timeout` to every request.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, RunnerError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| RunnerError::BuildClient { source: err })?;
        Ok(Self { client })
    }

    /// Runs every leaf request of `collection` sequentially, in document
    /// order, and aggregates the outcomes once traversal completes.
    pub async fn run_collection(&self, collection: &Collection, file_path: &Path) -> TestSummary {
        let start_time = Utc::now();
        let started = Instant::now();

        let mut results = Vec::new();
        for item in leaf_requests(&collection.items) {
            if let Some(request) = item.request.as_ref() {
                results.push(self.execute_request(&item.name, request).await);
            }
        }

        TestSummary::new(
            collection.info.name.clone(),
            file_path,
            results,
            start_time,
            Utc::now(),
            started.elapsed(),
        )
    }

    /// Executes one request. Never fails past this boundary: every
    /// failure mode is captured as an unsuccessful [`TestResult`] with
    /// the elapsed time recorded so far.
    pub async fn execute_request(&self, name: &str, request: &Request) -> TestResult {
        let started = Instant::now();
        let url = resolve_url(request.url.as_ref());
        let mut scope = RequestScope {
            name: name.to_owned(),
            method: request.method.clone(),
            url: url.clone(),
            timestamp: Utc::now(),
            headers_sent: BTreeMap::new(),
        };

        let method = match Method::from_bytes(request.method.as_bytes()) {
            Ok(method) => method,
            Err(err) => {
                let message = format!("Invalid HTTP method '{}': {}", request.method, err);
                return scope.failure(started.elapsed(), message);
            }
        };

        let parsed_url = match Url::parse(&url) {
            Ok(parsed) => parsed,
            Err(err) => {
                let message = format!("Invalid URL '{}': {}", url, err);
                return scope.failure(started.elapsed(), message);
            }
        };

        let mut header_map = HeaderMap::new();
        for header in &request.headers {
            if header.key.is_empty() || header.value.is_empty() {
                continue;
            }
            let header_name = match HeaderName::from_bytes(header.key.as_bytes()) {
                Ok(header_name) => header_name,
                Err(err) => {
                    let message = format!("Invalid header name '{}': {}", header.key, err);
                    return scope.failure(started.elapsed(), message);
                }
            };
            let header_value = match HeaderValue::from_str(&header.value) {
                Ok(header_value) => header_value,
                Err(err) => {
                    let message = format!("Invalid header value for '{}': {}", header.key, err);
                    return scope.failure(started.elapsed(), message);
                }
            };
            header_map.insert(header_name, header_value);
            scope
                .headers_sent
                .insert(header.key.clone(), header.value.clone());
        }

        // The json language hint wins over an explicit Content-Type.
        if let Some(body) = request.body.as_ref() {
            if body.mode == RAW_BODY_MODE && body.language_hint() == Some(JSON_LANGUAGE_HINT) {
                header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
        }

        let mut builder = self.client.request(method, parsed_url).headers(header_map);
        if let Some(body) = request.body.as_ref() {
            if body.mode == RAW_BODY_MODE && !body.raw.is_empty() {
                builder = builder.body(body.raw.clone());
            }
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                return scope.failure(started.elapsed(), format!("Request failed: {}", err));
            }
        };

        let status = response.status();
        let body_text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                let message = format!("Failed to read response body: {}", err);
                return scope.read_failure(status, started.elapsed(), message);
            }
        };

        scope.completed(status, started.elapsed(), body_text)
    }
}

/// Flattens the item tree into its leaf requests, depth-first and in
/// document order. A node with children is a folder even when it also
/// carries a request; the co-located request is dropped.
fn leaf_requests(items: &[Item]) -> Vec<&Item> {
    let mut leaves = Vec::new();
    collect_leaves(items, &mut leaves);
    leaves
}

fn collect_leaves<'tree>(items: &'tree [Item], leaves: &mut Vec<&'tree Item>) {
    for item in items {
        if !item.items.is_empty() {
            collect_leaves(&item.items, leaves);
        } else if item.request.is_some() {
            leaves.push(item);
        }
    }
}

struct RequestScope {
    name: String,
    method: String,
    url: String,
    timestamp: DateTime<Utc>,
    headers_sent: BTreeMap<String, String>,
}

impl RequestScope {
    fn failure(self, response_time: Duration, message: String) -> TestResult {
        TestResult {
            name: self.name,
            method: self.method,
            url: self.url,
            status_code: 0,
            response_time,
            success: false,
            error_message: Some(message),
            response_body: String::new(),
            request_headers: self.headers_sent,
            timestamp: self.timestamp,
        }
    }

    fn read_failure(self, status: StatusCode, response_time: Duration, message: String) -> TestResult {
        TestResult {
            name: self.name,
            method: self.method,
            url: self.url,
            status_code: status.as_u16(),
            response_time,
            success: false,
            error_message: Some(message),
            response_body: String::new(),
            request_headers: self.headers_sent,
            timestamp: self.timestamp,
        }
    }

    fn completed(self, status: StatusCode, response_time: Duration, body: String) -> TestResult {
        let success = status.is_success();
        let error_message =
            (!success).then(|| format!("HTTP {}: {}", status.as_u16(), status));

        TestResult {
            name: self.name,
            method: self.method,
            url: self.url,
            status_code: status.as_u16(),
            response_time,
            success,
            error_message,
            response_body: body,
            request_headers: self.headers_sent,
            timestamp: self.timestamp,
        }
    }
}
