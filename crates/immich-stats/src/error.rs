//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use immich_config::ConfigError;
use immich_core::{CoreError, ErrorKind};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to Immich at {url}")]
    #[diagnostic(
        code(immich::connection_failed),
        help(
            "Check that the server is running and reachable.\n\
             URL: {url}\n\
             Self-signed certificate? Try --insecure (-k)."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(immich::auth_failed),
        help(
            "Verify the API key under Account Settings > API Keys on your server.\n\
             Pass it with --api-key or IMMICH_API_KEY."
        )
    )]
    AuthFailed { message: String },

    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(immich::no_credentials),
        help(
            "Set IMMICH_API_KEY, pass --api-key, or save one with:\n\
             immich-stats --host <HOST> --api-key <KEY> setup --save {profile}"
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(code(immich::not_found))]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    #[error("Asset '{asset_id}' has no downloadable image")]
    #[diagnostic(
        code(immich::no_image),
        help("Only PNG and JPEG originals can be downloaded.")
    )]
    NoImage { asset_id: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(immich::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(
        code(immich::validation),
        help("Hosts look like photos.local:2283 or https://photos.example.com")
    )]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(immich::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: immich-stats --host <HOST> --api-key <KEY> setup --save {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No server configured")]
    #[diagnostic(
        code(immich::no_config),
        help(
            "Pass --host and --api-key, set IMMICH_HOST and IMMICH_API_KEY,\n\
             or add a profile to: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(immich::config))]
    Config { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to encode output: {0}")]
    #[diagnostic(code(immich::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::NoImage { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ProfileNotFound { .. } | Self::NoConfig { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }

    /// Error for a tick in which no reading could be refreshed.
    pub fn from_reading_failure(kind: ErrorKind, host: &str) -> Self {
        match kind {
            ErrorKind::CannotConnect => Self::ConnectionFailed {
                url: host.into(),
                source: "every reading failed to reach the server".into(),
            },
            ErrorKind::InvalidAuth => Self::AuthFailed {
                message: "the server rejected the API key".into(),
            },
            ErrorKind::Api => Self::ApiError {
                message: "every reading failed; run with -v for details".into(),
            },
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidUrl { host, reason } => CliError::Validation {
                field: "host".into(),
                reason: format!("'{host}': {reason}"),
            },

            CoreError::CannotConnect { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::InvalidAuth { message } => CliError::AuthFailed { message },

            CoreError::Api { message, status: _ } => CliError::ApiError { message },

            CoreError::Config { message } => CliError::Config { message },
        }
    }
}

impl From<immich_api::Error> for CliError {
    fn from(err: immich_api::Error) -> Self {
        CoreError::from(err).into()
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::UnknownProfile { profile } => CliError::ProfileNotFound {
                name: profile,
                available: String::new(),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
