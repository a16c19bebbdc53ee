// ── Core error types ──
//
// Setup- and poll-facing errors. Consumers never match on raw HTTP
// details: the `From<immich_api::Error>` impl folds transport-layer
// errors into the small taxonomy a setup form or a poller cares about.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input errors (raised before any network call) ────────────────
    #[error("Invalid URL '{host}': {reason}")]
    InvalidUrl { host: String, reason: String },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to {url}: {reason}")]
    CannotConnect { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    InvalidAuth { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code, when the server answered at all.
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Error key for a setup form: `invalid_url`, `cannot_connect`,
    /// `invalid_auth`, or `unknown`.
    pub fn setup_error_key(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "invalid_url",
            Self::CannotConnect { .. } => "cannot_connect",
            Self::InvalidAuth { .. } => "invalid_auth",
            Self::Api { .. } | Self::Config { .. } => "unknown",
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<immich_api::Error> for CoreError {
    fn from(err: immich_api::Error) -> Self {
        match err {
            immich_api::Error::InvalidHost { host, reason } => CoreError::InvalidUrl { host, reason },
            immich_api::Error::CannotConnect { url, source } => CoreError::CannotConnect {
                url,
                reason: if source.is_timeout() {
                    "request timed out".into()
                } else {
                    source.to_string()
                },
            },
            immich_api::Error::InvalidApiKey => CoreError::InvalidAuth {
                message: "API key contains characters that cannot be sent".into(),
            },
            immich_api::Error::Api { status, body } if status == 401 || status == 403 => {
                CoreError::InvalidAuth {
                    message: format!("server rejected the API key (HTTP {status}): {body}"),
                }
            }
            immich_api::Error::Api { status, body } => CoreError::Api {
                message: format!("HTTP {status}: {body}"),
                status: Some(status),
            },
            immich_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("malformed response: {message}"),
                status: None,
            },
            immich_api::Error::InvalidId { id } => CoreError::Api {
                message: format!("invalid id '{id}'"),
                status: None,
            },
            immich_api::Error::Client(message) => CoreError::Config { message },
        }
    }
}
