//! Caller-supplied client options.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Optional overrides applied on top of the built-in defaults.
///
/// Every field left as `None` (or empty) falls back to the default in
/// [`defaults`](super::defaults).
///
/// # Examples
///
/// ```rust
/// use pinecone_client::ClientOptions;
///
/// let options = ClientOptions::default()
///     .with_controller_host("http://localhost:5080/")
///     .with_timeout(60)
///     .with_header("X-Project", "docs");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ClientOptions {
    /// Control-plane origin (scheme and host, no path)
    #[cfg_attr(
        feature = "config",
        arg(long = "controller-host", env = "PINECONE_CONTROLLER_HOST")
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller_host: Option<String>,

    /// HTTP request timeout in seconds
    #[cfg_attr(feature = "config", arg(long = "timeout", env = "PINECONE_TIMEOUT"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Additional request headers as NAME=VALUE, applied over the defaults
    #[cfg_attr(
        feature = "config",
        arg(long = "header", value_name = "NAME=VALUE", value_parser = parse_header)
    )]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_headers: Vec<(String, String)>,
}

impl ClientOptions {
    /// Sets the control-plane origin.
    #[must_use]
    pub fn with_controller_host(mut self, host: impl Into<String>) -> Self {
        self.controller_host = Some(host.into());
        self
    }

    /// Sets the request timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout = Some(timeout_secs);
        self
    }

    /// Appends an additional request header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_headers.push((name.into(), value.into()));
        self
    }
}

#[cfg(feature = "config")]
fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    Ok((name.trim().to_owned(), value.trim().to_owned()))
}
