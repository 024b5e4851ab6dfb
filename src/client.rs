use crate::auth::Credentials;
use crate::spinner::{SpinnerSettings, with_spinner};
use anyhow::{Context, Result, anyhow, bail};
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.hibob.com/v1";
pub const BASE_URL_ENV: &str = "HIBOB_BASE_URL";

const USER_AGENT_VALUE: &str = concat!("bob-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response, with the upstream message when one could be found.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("invalid JSON in response (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: Client,
    credentials: Credentials,
    spinner: SpinnerSettings,
}

impl ApiClient {
    pub fn new(base_url: &str, credentials: Credentials, spinner: SpinnerSettings) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let http = Client::builder()
            .user_agent(HeaderValue::from_static(USER_AGENT_VALUE))
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            base_url,
            http,
            credentials,
            spinner,
        })
    }

    /// `segments` are appended to the base path one by one, so an id can never
    /// reach a different endpoint.
    pub fn get(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Value> {
        self.request(Method::GET, segments, query, None)
    }

    pub fn post_json(&self, segments: &[&str], body: Option<&Value>) -> Result<Value> {
        self.request(Method::POST, segments, &[], body)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = build_url(&self.base_url, segments)?;

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .basic_auth(&self.credentials.service_id, Some(&self.credentials.api_token))
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, %url, "sending request");
        let path = format!("/{}", segments.join("/"));
        let label = crate::spinner::label_for(method.as_str(), &path);
        with_spinner(label, self.spinner, || {
            let response = request.send().context("sending request")?;
            read_response(response)
        })
    }
}

fn read_response(response: Response) -> Result<Value> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let text = response.text().context("reading response body")?;
    debug!(status = status.as_u16(), %content_type, bytes = text.len(), "received response");

    if !status.is_success() {
        let parsed = parse_body(status, &content_type, &text).unwrap_or(Value::Null);
        let message = extract_error_message(&parsed).unwrap_or_else(|| status_line(status));
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        }
        .into());
    }

    Ok(parse_body(status, &content_type, &text)?)
}

/// `null` for 204 and empty bodies, parsed JSON for JSON content types, and
/// the raw text as a JSON string for anything else.
fn parse_body(status: StatusCode, content_type: &str, text: &str) -> Result<Value, ApiError> {
    if status == StatusCode::NO_CONTENT {
        return Ok(Value::Null);
    }
    if content_type.contains("application/json") {
        return serde_json::from_str(text).map_err(|source| ApiError::Decode {
            status: status.as_u16(),
            source,
        });
    }
    if text.is_empty() {
        Ok(Value::Null)
    } else {
        Ok(Value::String(text.to_string()))
    }
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Upstream error message from the common envelope shapes: `message`,
/// `error` (string or `{message}`), or the first string in `errors`.
pub fn extract_error_message(body: &Value) -> Option<String> {
    let record = body.as_object()?;
    if let Some(message) = record.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }
    match record.get("error") {
        Some(Value::String(error)) => return Some(error.clone()),
        Some(Value::Object(error)) => {
            if let Some(message) = error.get("message").and_then(Value::as_str) {
                return Some(message.to_string());
            }
        }
        _ => {}
    }
    record
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.iter().find_map(Value::as_str))
        .map(str::to_string)
}

fn normalize_base_url(base_url: &str) -> Result<Url> {
    let mut parsed = Url::parse(base_url).context("parsing base URL")?;
    if !parsed.path().ends_with('/') {
        let path = format!("{}/", parsed.path());
        parsed.set_path(&path);
    }
    Ok(parsed)
}

/// Append `segments` to the base URL, keeping the base path (`/v1`). Each
/// segment is percent-encoded as a whole; `.` and `..` are rejected.
pub fn build_url(base_url: &Url, segments: &[&str]) -> Result<Url> {
    if let Some(segment) = segments.iter().find(|s| matches!(**s, "." | "..")) {
        bail!("invalid path segment `{segment}`");
    }
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| anyhow!("base URL `{base_url}` cannot carry a path"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
