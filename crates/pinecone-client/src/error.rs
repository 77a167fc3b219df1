//! Error taxonomy shared by every client operation.
//!
//! Every remote-facing call returns exactly one [`Error`] variant on failure.
//! Callers that only care about "did it work" can match on `Err(_)`, while
//! callers that need to react to authentication failures or timeouts can
//! match on the individual variants or use the predicate helpers.

use serde_json::Value;
use strum::{AsRefStr, Display, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fallback message used when an error response carries no usable message.
pub const DEFAULT_ERROR_MESSAGE: &str = "API request failed";

/// Categories of errors, without their payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Non-success response that is neither an auth nor a timeout failure.
    Api,
    /// Authentication or authorization failure (401/403).
    Auth,
    /// Server-side (408/504) or transport-level deadline.
    Timeout,
    /// Local input rejected before any network call.
    Validation,
    /// Connection-level failure (DNS, refused connection, TLS).
    Transport,
    /// Malformed JSON on an otherwise successful response.
    Decode,
}

/// Errors returned by the Pinecone client.
#[derive(Debug, Error)]
pub enum Error {
    /// The service answered with a 4xx/5xx status other than 401/403/408/504.
    #[error("Pinecone API error ({status_code}): {message}")]
    Api {
        /// HTTP status code of the response.
        status_code: u16,
        /// Human-readable message extracted from the response body.
        message: String,
        /// Parsed response body, or an empty object if it was not JSON.
        body: Value,
    },

    /// The API key was rejected.
    #[error("Authentication error ({status_code}): {message}")]
    Auth {
        /// HTTP status code of the response (401 or 403).
        status_code: u16,
        /// Human-readable message extracted from the response body.
        message: String,
    },

    /// The request timed out, either on the server or in the transport.
    #[error("Request timeout: {message}")]
    Timeout {
        /// HTTP status code (408 or 504), `None` for transport deadlines.
        status_code: Option<u16>,
        /// Description of the timeout.
        message: String,
        /// Underlying transport error for transport deadlines.
        #[source]
        source: Option<BoxedError>,
    },

    /// Local input failed validation; no request was sent.
    #[error("Validation error: {message}")]
    Validation {
        /// Reason the input was rejected.
        message: String,
    },

    /// The request never produced an HTTP response.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the failure, prefixed with the attempted operation.
        message: String,
        /// Underlying transport error.
        #[source]
        source: BoxedError,
    },

    /// A successful response could not be decoded.
    #[error("Decode error: {message}")]
    Decode {
        /// Description of the decoding failure.
        message: String,
        /// Underlying JSON error, if any.
        #[source]
        source: Option<serde_json::Error>,
    },
}

impl Error {
    /// Creates a new validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a new decode error without an underlying JSON error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new transport error.
    pub fn transport(message: impl Into<String>, source: impl Into<BoxedError>) -> Self {
        Self::Transport {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api { .. } => ErrorKind::Api,
            Self::Auth { .. } => ErrorKind::Auth,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// Returns the human-readable message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Api { message, .. }
            | Self::Auth { message, .. }
            | Self::Timeout { message, .. }
            | Self::Validation { message }
            | Self::Transport { message, .. }
            | Self::Decode { message, .. } => message,
        }
    }

    /// Returns the HTTP status code if the error came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } | Self::Auth { status_code, .. } => Some(*status_code),
            Self::Timeout { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Returns the parsed response body of an [`Error::Api`].
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns true if this error is an authentication failure.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Returns true if this error is a server or transport timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns true if this error was raised before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns true if the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. }
                | Self::Timeout {
                    status_code: None,
                    ..
                }
        )
    }

    /// Returns true if the service answered with a 404.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Prefixes transport failures with the operation that was attempted.
    ///
    /// Errors classified from an HTTP response keep the server's message
    /// untouched. A prefix ending in `.` is joined with a space, anything
    /// else with `": "`.
    pub fn with_operation(self, operation: &str) -> Self {
        let join = |detail: String| {
            if operation.ends_with('.') {
                format!("{operation} {detail}")
            } else {
                format!("{operation}: {detail}")
            }
        };

        match self {
            Self::Transport { message, source } => Self::Transport {
                message: join(message),
                source,
            },
            Self::Timeout {
                status_code: None,
                message,
                source,
            } => Self::Timeout {
                status_code: None,
                message: join(message),
                source,
            },
            other => other,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                status_code: None,
                message: err.to_string(),
                source: Some(Box::new(err)),
            }
        } else if err.is_connect() {
            Self::transport(format!("Connection failed: {err}"), err)
        } else {
            Self::transport(err.to_string(), err)
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: format!("Failed to decode JSON response: {err}"),
            source: Some(err),
        }
    }
}
