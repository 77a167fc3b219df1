//! Validated client configuration.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use url::Url;

use super::{ClientOptions, Environment, ProcessEnvironment, defaults};
use crate::TRACING_TARGET_CONFIG;
use crate::error::{Error, Result};

/// Immutable configuration shared by every facade of one client.
///
/// Construction is the only place validation happens: a `PineconeConfig`
/// that exists always has a non-empty API key, a positive timeout, an
/// http(s) controller host without trailing slashes, and a header set that
/// can be sent as-is.
#[derive(Clone)]
pub struct PineconeConfig {
    api_key: String,
    controller_host: String,
    timeout_secs: u64,
    additional_headers: Vec<(String, String)>,
    headers: HeaderMap,
}

impl std::fmt::Debug for PineconeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PineconeConfig")
            .field("controller_host", &self.controller_host)
            .field("timeout_secs", &self.timeout_secs)
            .field("additional_headers", &self.additional_headers.len())
            .finish_non_exhaustive()
    }
}

impl PineconeConfig {
    /// Resolves a configuration from an explicit key, options and an
    /// environment.
    ///
    /// The API key is taken from `api_key` when given, otherwise from the
    /// `PINECONE_API_KEY` variable of `env`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the API key is missing or empty, the
    /// timeout is zero, the controller host is not an http(s) URL, or a
    /// header name or value cannot be sent.
    pub fn resolve(
        api_key: Option<String>,
        options: ClientOptions,
        env: impl Environment,
    ) -> Result<Self> {
        let api_key = api_key
            .or_else(|| env.var(defaults::API_KEY_ENV))
            .unwrap_or_default();
        if api_key.is_empty() {
            return Err(Error::validation(format!(
                "API key is required. Set {} environment variable or pass it in configuration.",
                defaults::API_KEY_ENV
            )));
        }

        let timeout_secs = options.timeout.unwrap_or(defaults::TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::validation("Timeout must be a positive integer."));
        }

        let controller_host = options
            .controller_host
            .as_deref()
            .unwrap_or(defaults::CONTROLLER_HOST)
            .trim_end_matches('/')
            .to_owned();
        validate_host(&controller_host)?;

        let headers = build_headers(&api_key, &options.additional_headers)?;

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            controller_host = %controller_host,
            timeout_secs,
            additional_headers = options.additional_headers.len(),
            "Resolved client configuration"
        );

        Ok(Self {
            api_key,
            controller_host,
            timeout_secs,
            additional_headers: options.additional_headers,
            headers,
        })
    }

    /// Resolves a configuration with an explicit API key.
    pub fn new(api_key: impl Into<String>, options: ClientOptions) -> Result<Self> {
        Self::resolve(Some(api_key.into()), options, ProcessEnvironment)
    }

    /// Resolves a configuration reading the API key from the process
    /// environment.
    pub fn from_env(options: ClientOptions) -> Result<Self> {
        Self::resolve(None, options, ProcessEnvironment)
    }

    /// Returns the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the control-plane origin, without trailing slash.
    pub fn controller_host(&self) -> &str {
        &self.controller_host
    }

    /// Returns the request timeout in seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Returns the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the caller-supplied headers in insertion order.
    pub fn additional_headers(&self) -> &[(String, String)] {
        &self.additional_headers
    }

    /// Returns the full header set sent with every request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the client identifier sent as `User-Agent`.
    pub fn user_agent() -> String {
        format!("pinecone-rust-client/{}", env!("CARGO_PKG_VERSION"))
    }
}

fn validate_host(host: &str) -> Result<()> {
    let invalid = || Error::validation("Controller host must be a valid URL with http or https scheme.");
    let url = Url::parse(host).map_err(|_| invalid())?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(invalid()),
    }
}

fn build_headers(api_key: &str, additional: &[(String, String)]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("api-key"),
        header_value(defaults::API_KEY_HEADER, api_key)?,
    );
    headers.insert(
        USER_AGENT,
        header_value("User-Agent", &PineconeConfig::user_agent())?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static("x-pinecone-api-version"),
        HeaderValue::from_static(defaults::API_VERSION),
    );

    for (name, value) in additional {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| Error::validation(format!("Invalid header name `{name}`.")))?;
        headers.insert(header_name, header_value(name, value)?);
    }

    Ok(headers)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(value)
        .map_err(|_| Error::validation(format!("Invalid value for header `{name}`.")))?;
    if name.eq_ignore_ascii_case(defaults::API_KEY_HEADER) {
        value.set_sensitive(true);
    }
    Ok(value)
}
