use thiserror::Error;

/// Top-level error type for the `immich-api` crate.
///
/// Every request goes through a single primitive, so the failure modes are
/// few: the server was unreachable, it answered with a non-2xx status, or it
/// answered with a body we could not decode. Host and key problems surface
/// before any I/O happens.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// No HTTP response arrived (DNS, TCP, TLS, timeout).
    #[error("Cannot connect to {url}: {source}")]
    CannotConnect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // ── Server ──────────────────────────────────────────────────────
    /// The server answered with a non-2xx status. `body` is the raw text.
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// A 2xx body that is not valid JSON or lacks a required field.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Setup ───────────────────────────────────────────────────────
    /// The host could not be normalized to an absolute http(s) URL.
    #[error("Invalid host '{host}': {reason}")]
    InvalidHost { host: String, reason: String },

    /// An id that cannot occupy a single URL path segment.
    #[error("Invalid id '{id}'")]
    InvalidId { id: String },

    /// The API key cannot be sent as an HTTP header value.
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Building the HTTP client failed (CA file, TLS backend).
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Coarse classification used by pollers and setup flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Transport-level failure.
    CannotConnect,
    /// Credentials rejected (HTTP 401/403).
    InvalidAuth,
    /// Anything else: non-2xx, malformed body, bad input.
    Api,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CannotConnect { .. } => ErrorKind::CannotConnect,
            Self::Api {
                status: 401 | 403, ..
            }
            | Self::InvalidApiKey => ErrorKind::InvalidAuth,
            _ => ErrorKind::Api,
        }
    }

    /// Returns `true` if the request timed out before a response arrived.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::CannotConnect { source, .. } if source.is_timeout())
    }

    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::CannotConnect => "cannot_connect",
            Self::InvalidAuth => "invalid_auth",
            Self::Api => "api_error",
        })
    }
}
