// ── Runtime connection configuration ──
//
// Describes *how* to reach one Immich server. Carries credential data
// and polling cadence, but never touches disk: the CLI (or any other
// host) builds a `ServerConfig` and hands it in.

use std::time::Duration;

use immich_api::{Credentials, DEFAULT_TIMEOUT, ImmichClient, TlsMode, TransportConfig};

use crate::error::CoreError;

/// How often readings are refreshed unless configured otherwise.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(300);

/// Configuration for one server connection.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Normalized host and API key.
    pub credentials: Credentials,
    /// TLS verification strategy.
    pub tls: TlsMode,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Interval between refresh ticks.
    pub scan_interval: Duration,
    /// Album ids an image consumer should display. Not used for readings.
    pub watched_albums: Vec<String>,
}

impl ServerConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            tls: TlsMode::default(),
            timeout: DEFAULT_TIMEOUT,
            scan_interval: DEFAULT_SCAN_INTERVAL,
            watched_albums: Vec::new(),
        }
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig::default()
            .with_tls(self.tls.clone())
            .with_timeout(self.timeout)
    }

    /// Build the client for this connection. No network I/O happens here.
    pub fn connect(&self) -> Result<ImmichClient, CoreError> {
        Ok(ImmichClient::new(&self.credentials, &self.transport())?)
    }
}
