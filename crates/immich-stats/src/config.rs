//! Connection resolution: profile values with CLI flag overrides.
//!
//! Precedence is flag (or `IMMICH_*` env through clap) > profile >
//! `[defaults]`. Works without any config file when `--host` and
//! `--api-key` are given.

use std::time::Duration;

use secrecy::SecretString;

use immich_api::{Credentials, TransportConfig};
use immich_config::Config;
use immich_core::{ServerConfig, TlsMode};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Everything needed to talk to one server, before host normalization.
#[derive(Debug)]
pub struct Target {
    pub profile_name: String,
    /// Host exactly as configured or passed on the command line.
    pub host: String,
    pub api_key: SecretString,
    pub tls: TlsMode,
    pub timeout: Duration,
    pub scan_interval: Duration,
    pub watched_albums: Vec<String>,
}

impl Target {
    pub fn transport(&self) -> TransportConfig {
        TransportConfig::default()
            .with_tls(self.tls.clone())
            .with_timeout(self.timeout)
    }

    /// Normalize the host and build the runtime configuration.
    pub fn server_config(&self) -> Result<ServerConfig, CliError> {
        let credentials =
            Credentials::new(&self.host, self.api_key.clone()).map_err(|e| CliError::Validation {
                field: "host".into(),
                reason: e.to_string(),
            })?;

        let mut server = ServerConfig::new(credentials);
        server.tls = self.tls.clone();
        server.timeout = self.timeout;
        server.scan_interval = self.scan_interval;
        server.watched_albums.clone_from(&self.watched_albums);
        Ok(server)
    }
}

/// Resolve the active connection from the config file and global flags.
pub fn resolve_target(global: &GlobalOpts) -> Result<Target, CliError> {
    let cfg = immich_config::load_config()?;
    resolve_target_from(&cfg, global)
}

fn resolve_target_from(cfg: &Config, global: &GlobalOpts) -> Result<Target, CliError> {
    let profile_name = cfg.profile_name(global.profile.as_deref());
    let profile = cfg.profiles.get(&profile_name);

    // An explicitly requested profile must exist
    if global.profile.is_some() && profile.is_none() {
        let mut available: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
        available.sort_unstable();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: if available.is_empty() {
                "(none)".into()
            } else {
                available.join(", ")
            },
        });
    }

    let host = global
        .host
        .clone()
        .or_else(|| profile.map(|p| p.host.clone()))
        .ok_or_else(|| CliError::NoConfig {
            path: immich_config::config_path().display().to_string(),
        })?;

    let api_key = match (&global.api_key, profile) {
        (Some(key), _) => SecretString::from(key.clone()),
        (None, Some(p)) => immich_config::resolve_api_key(p, &profile_name)?,
        (None, None) => {
            return Err(CliError::NoCredentials {
                profile: profile_name,
            });
        }
    };

    let tls = if global.insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(p) = profile {
        p.tls_mode(&cfg.defaults)
    } else if cfg.defaults.insecure {
        TlsMode::DangerAcceptInvalid
    } else {
        TlsMode::System
    };

    let timeout = global
        .timeout
        .or_else(|| profile.and_then(|p| p.timeout))
        .unwrap_or(cfg.defaults.timeout);
    let scan_interval = profile
        .and_then(|p| p.scan_interval)
        .unwrap_or(cfg.defaults.scan_interval);

    Ok(Target {
        profile_name,
        host,
        api_key,
        tls,
        timeout: Duration::from_secs(timeout),
        scan_interval: Duration::from_secs(scan_interval),
        watched_albums: profile.map(|p| p.watched_albums.clone()).unwrap_or_default(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;
    use immich_config::Profile;
    use secrecy::ExposeSecret;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["immich-stats"];
        argv.extend_from_slice(args);
        argv.push("readings");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with_home() -> Config {
        let mut cfg = Config::default();
        cfg.default_profile = Some("home".into());
        cfg.profiles.insert(
            "home".into(),
            Profile {
                host: "photos.local:2283".into(),
                api_key: Some("profile-key".into()),
                timeout: Some(12),
                scan_interval: Some(60),
                watched_albums: vec!["a1".into()],
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn profile_values_apply_without_flags() {
        let target = resolve_target_from(&config_with_home(), &global(&[])).unwrap();
        assert_eq!(target.profile_name, "home");
        assert_eq!(target.host, "photos.local:2283");
        assert_eq!(target.api_key.expose_secret(), "profile-key");
        assert_eq!(target.timeout, Duration::from_secs(12));
        assert_eq!(target.scan_interval, Duration::from_secs(60));
        assert_eq!(target.tls, TlsMode::System);

        let server = target.server_config().unwrap();
        assert_eq!(server.credentials.host().as_str(), "https://photos.local:2283/");
        assert_eq!(server.watched_albums, vec!["a1".to_string()]);
    }

    #[test]
    fn flags_override_profile() {
        let target = resolve_target_from(
            &config_with_home(),
            &global(&[
                "--host",
                "http://10.0.0.5:2283",
                "--api-key",
                "flag-key",
                "--timeout",
                "3",
                "-k",
            ]),
        )
        .unwrap();
        assert_eq!(target.host, "http://10.0.0.5:2283");
        assert_eq!(target.api_key.expose_secret(), "flag-key");
        assert_eq!(target.timeout, Duration::from_secs(3));
        assert_eq!(target.tls, TlsMode::DangerAcceptInvalid);
    }

    #[test]
    fn flags_alone_are_enough() {
        let target = resolve_target_from(
            &Config::default(),
            &global(&["--host", "photos.local", "--api-key", "k"]),
        )
        .unwrap();
        assert_eq!(target.timeout, Duration::from_secs(30));
        assert_eq!(target.scan_interval, Duration::from_secs(300));
        assert!(target.watched_albums.is_empty());
    }

    #[test]
    fn missing_host_is_no_config() {
        let err = resolve_target_from(&Config::default(), &global(&[])).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn missing_key_is_no_credentials() {
        let err =
            resolve_target_from(&Config::default(), &global(&["--host", "photos.local"])).unwrap_err();
        assert!(matches!(err, CliError::NoCredentials { .. }));
    }

    #[test]
    fn unknown_profile_lists_available() {
        let err = resolve_target_from(&config_with_home(), &global(&["-p", "work"])).unwrap_err();
        match err {
            CliError::ProfileNotFound { name, available } => {
                assert_eq!(name, "work");
                assert_eq!(available, "home");
            }
            other => panic!("expected ProfileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn bad_host_fails_server_config() {
        let target = resolve_target_from(
            &Config::default(),
            &global(&["--host", "ftp://photos.local", "--api-key", "k"]),
        )
        .unwrap();
        let err = target.server_config().unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
    }
}
