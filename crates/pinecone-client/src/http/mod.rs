//! HTTP transport shared by every facade.
//!
//! [`HttpClient`] is the resource client: one base URL, the configured
//! header set and timeout, and a single `execute` primitive whose responses
//! always pass through [`classify`].

mod client;
mod response;

use std::borrow::Cow;

pub use client::HttpClient;
pub use reqwest::Method;
pub use response::classify;
pub(crate) use response::take_array;
use url::form_urlencoded;

/// Percent-encodes a single path segment.
pub(crate) fn encode_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}

/// Appends a form-encoded query string to `path`, keeping pair order.
///
/// Repeated keys are emitted once per pair (`ids=a&ids=b`). An empty pair
/// list returns the bare path.
pub(crate) fn with_query<I, K, V>(path: &str, pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut empty = true;
    for (key, value) in pairs {
        serializer.append_pair(key.as_ref(), value.as_ref());
        empty = false;
    }

    if empty {
        path.to_owned()
    } else {
        format!("{path}?{}", serializer.finish())
    }
}

/// Turns a host reported by a describe call into a base URL.
///
/// Bare hosts get an `https://` scheme; hosts that already carry a scheme
/// are kept. Trailing slashes are removed.
pub(crate) fn host_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_owned()
    } else {
        format!("https://{host}")
    }
}
