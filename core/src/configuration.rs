//! Connection settings shared by every API class.
//!
//! # Design
//! A `Configuration` is validated once, at construction, and is read-only
//! afterwards: there are no setters. API classes hold it behind an `Arc`, so
//! any number of `PetApi`/`StoreApi`/`UserApi` instances (and any number of
//! concurrent calls on them) observe the same base path, headers, credentials
//! and transport without locking.
//!
//! The transport is injected here rather than looked up from ambient state.
//! When none is supplied, a fresh `ReqwestTransport` is used.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderName, HeaderValue};
use url::Url;

use crate::error::ConfigurationError;
use crate::transport::{ReqwestTransport, Transport};

/// Environment variable read by [`Configuration::from_env`] for the base path.
pub const BASE_PATH_ENV: &str = "PETSTORE_BASE_PATH";
/// Environment variable holding an `api_key` credential.
pub const API_KEY_ENV: &str = "PETSTORE_API_KEY";
/// Environment variable holding an OAuth2 access token.
pub const ACCESS_TOKEN_ENV: &str = "PETSTORE_ACCESS_TOKEN";

/// Header carrying the petstore API key.
pub const API_KEY_HEADER: &str = "api_key";

/// Authentication applied to every outgoing request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Sent as the `api_key` header.
    ApiKey(String),
    /// Sent as `authorization: Bearer <token>`.
    BearerToken(String),
    /// Arbitrary header, e.g. a gateway-specific key.
    Header { name: String, value: String },
}

impl Credentials {
    /// The header this credential contributes, name lowercased.
    pub fn header(&self) -> (String, String) {
        match self {
            Credentials::ApiKey(key) => (API_KEY_HEADER.to_string(), key.clone()),
            Credentials::BearerToken(token) => {
                ("authorization".to_string(), format!("Bearer {token}"))
            }
            Credentials::Header { name, value } => (name.to_ascii_lowercase(), value.clone()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(***)"),
            Credentials::BearerToken(_) => f.write_str("BearerToken(***)"),
            Credentials::Header { name, .. } => write!(f, "Header({name}: ***)"),
        }
    }
}

/// Validated, immutable connection settings.
#[derive(Clone)]
pub struct Configuration {
    base_path: String,
    headers: BTreeMap<String, String>,
    credentials: Option<Credentials>,
    transport: Arc<dyn Transport>,
}

impl Configuration {
    /// Configuration with only a base path and the default transport.
    pub fn new(base_path: impl Into<String>) -> Result<Self, ConfigurationError> {
        Self::builder(base_path).build()
    }

    pub fn builder(base_path: impl Into<String>) -> ConfigurationBuilder {
        ConfigurationBuilder {
            base_path: base_path.into(),
            headers: Vec::new(),
            credentials: None,
            transport: None,
        }
    }

    /// Build from `PETSTORE_BASE_PATH`, plus `PETSTORE_ACCESS_TOKEN` or
    /// `PETSTORE_API_KEY` when set (the access token wins if both are).
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Configuration::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_path = lookup(BASE_PATH_ENV).ok_or(ConfigurationError::MissingBasePath(BASE_PATH_ENV))?;
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut builder = Self::builder(base_path);
        if let Some(token) = non_empty(ACCESS_TOKEN_ENV) {
            builder = builder.credentials(Credentials::BearerToken(token));
        } else if let Some(key) = non_empty(API_KEY_ENV) {
            builder = builder.credentials(Credentials::ApiKey(key));
        }
        builder.build()
    }

    /// The base path exactly as supplied.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Default headers, names lowercased.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("base_path", &self.base_path)
            .field("headers", &self.headers)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

/// Collects options for a [`Configuration`]; validation happens in `build`.
pub struct ConfigurationBuilder {
    base_path: String,
    headers: Vec<(String, String)>,
    credentials: Option<Credentials>,
    transport: Option<Arc<dyn Transport>>,
}

impl ConfigurationBuilder {
    /// Add a default header merged into every request. Later values for the
    /// same (case-insensitive) name replace earlier ones.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Replace the default HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<Configuration, ConfigurationError> {
        validate_base_path(&self.base_path)?;

        let mut headers = BTreeMap::new();
        for (name, value) in self.headers {
            validate_header(&name, &value)?;
            headers.insert(name.to_ascii_lowercase(), value);
        }

        if let Some(credentials) = &self.credentials {
            let (name, value) = credentials.header();
            validate_header(&name, &value)?;
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()),
        };

        Ok(Configuration {
            base_path: self.base_path,
            headers,
            credentials: self.credentials,
            transport,
        })
    }
}

fn validate_base_path(base_path: &str) -> Result<(), ConfigurationError> {
    if base_path.trim().is_empty() {
        return Err(ConfigurationError::EmptyBasePath);
    }
    let url = Url::parse(base_path).map_err(|e| ConfigurationError::InvalidBasePath {
        base_path: base_path.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(ConfigurationError::UnsupportedScheme(other.to_string())),
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigurationError::InvalidBasePath {
            base_path: base_path.to_string(),
            reason: "must not contain a query or fragment".to_string(),
        });
    }
    Ok(())
}

fn validate_header(name: &str, value: &str) -> Result<(), ConfigurationError> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|e| ConfigurationError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    HeaderValue::from_str(value).map_err(|e| ConfigurationError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}
