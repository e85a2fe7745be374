//! Request assembly, execution and response decoding shared by all API classes.
//!
//! # Design
//! Every operation goes through the same three steps:
//! 1. `OperationRequest` turns the operation's path, parameters and body plus
//!    the shared `Configuration` into a plain `HttpRequest`. Nothing here
//!    performs I/O, so request shapes are unit-testable.
//! 2. `send` hands that request to the configured transport exactly once.
//! 3. One of the `parse_*` functions checks the status and decodes the body
//!    into the operation's declared shape.
//!
//! The `parse_*` functions are public so a caller that executes requests on
//! its own (`build_*` + custom I/O) can still decode them.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn, Span};
use url::form_urlencoded;

use crate::configuration::Configuration;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

const JSON: &str = "application/json";

/// Builder for one operation's `HttpRequest`.
#[derive(Debug)]
pub(crate) struct OperationRequest<'a> {
    config: &'a Configuration,
    method: HttpMethod,
    path: String,
    query: Vec<(&'static str, String)>,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl<'a> OperationRequest<'a> {
    /// `path` is the operation's path template with parameters already
    /// substituted (see [`path_param`]).
    pub(crate) fn new(config: &'a Configuration, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            config,
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn query(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.query.push((name, value.into()));
        self
    }

    /// Append `name=value` only when a value is present.
    pub(crate) fn optional_query<V: Into<String>>(self, name: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    /// Exploded array parameter: one `name=value` pair per element.
    pub(crate) fn repeated_query<V: AsRef<str>>(mut self, name: &'static str, values: &[V]) -> Self {
        for value in values {
            self.query.push((name, value.as_ref().to_string()));
        }
        self
    }

    pub(crate) fn optional_header(mut self, name: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.headers.push((name.to_ascii_lowercase(), value.to_string()));
        }
        self
    }

    pub(crate) fn json_body<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        self.body = Some(body);
        Ok(self)
    }

    pub(crate) fn build(self) -> HttpRequest {
        let mut url = format!("{}{}", self.config.base_path().trim_end_matches('/'), self.path);
        if !self.query.is_empty() {
            let pairs: Vec<String> = self
                .query
                .iter()
                .map(|(name, value)| format!("{}={}", urlencoding::encode(name), urlencoding::encode(value)))
                .collect();
            url.push('?');
            url.push_str(&pairs.join("&"));
        }

        let mut headers = Vec::new();
        set_header(&mut headers, "accept", JSON);
        for (name, value) in self.config.headers() {
            set_header(&mut headers, name, value);
        }
        if let Some(credentials) = self.config.credentials() {
            let (name, value) = credentials.header();
            set_header(&mut headers, &name, &value);
        }
        for (name, value) in &self.headers {
            set_header(&mut headers, name, value);
        }
        if self.body.is_some() {
            set_header(&mut headers, "content-type", JSON);
        }

        HttpRequest {
            method: self.method,
            url,
            headers,
            body: self.body,
        }
    }
}

/// Insert or replace a header, matching names case-insensitively.
fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    match headers.iter_mut().find(|(key, _)| key.eq_ignore_ascii_case(name)) {
        Some(entry) => entry.1 = value.to_string(),
        None => headers.push((name.to_ascii_lowercase(), value.to_string())),
    }
}

/// Percent-encode a value for use as a single path segment.
pub(crate) fn path_param(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Mask every query value, keeping parameter names, so secrets such as the
/// login password never reach the logs.
fn redacted_url(url: &str) -> String {
    match url.split_once('?') {
        Some((base, query)) => {
            let names: Vec<String> = form_urlencoded::parse(query.as_bytes())
                .map(|(name, _)| format!("{name}=***"))
                .collect();
            format!("{base}?{}", names.join("&"))
        }
        None => url.to_string(),
    }
}

/// Send `request` through the configuration's transport, once.
#[instrument(
    name = "petstore_request",
    skip_all,
    fields(
        http.method = %request.method,
        http.url = %redacted_url(&request.url),
        http.status_code = tracing::field::Empty,
    )
)]
pub(crate) async fn send(config: &Configuration, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    debug!(has_body = request.body.is_some(), "sending request");
    let response = config.transport().send(request).await.map_err(|e| {
        warn!(error = %e, "transport failed");
        ApiError::from(e)
    })?;
    Span::current().record("http.status_code", response.status);
    if response.is_success() {
        debug!(bytes = response.body.len(), "received response");
    } else {
        warn!(status = response.status, "service returned non-success status");
    }
    Ok(response)
}

/// Map non-2xx status codes to `ApiError::HttpStatus`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpStatus {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Decode a JSON body into `T`.
pub fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Accept any 2xx response and discard its body.
pub fn parse_empty(response: HttpResponse) -> Result<(), ApiError> {
    check_status(&response)
}

/// Decode a string result: a JSON string when the response is declared JSON,
/// the raw body otherwise.
pub fn parse_text(response: HttpResponse) -> Result<String, ApiError> {
    check_status(&response)?;
    if response.is_json() {
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    } else {
        Ok(response.body)
    }
}
