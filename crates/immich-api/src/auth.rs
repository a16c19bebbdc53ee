use secrecy::SecretString;
use url::Url;

use crate::error::Error;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Credentials for one Immich server connection.
///
/// The host is normalized once at construction and never changes for the
/// lifetime of the client built from it.
#[derive(Debug, Clone)]
pub struct Credentials {
    host: Url,
    api_key: SecretString,
}

impl Credentials {
    /// Normalize `host` and pair it with `api_key`.
    ///
    /// Fails with [`Error::InvalidHost`] without touching the network.
    pub fn new(host: &str, api_key: SecretString) -> Result<Self, Error> {
        Ok(Self {
            host: normalize_host(host)?,
            api_key,
        })
    }

    /// The normalized base URL, always ending in `/`.
    pub fn host(&self) -> &Url {
        &self.host
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }
}

/// Turn user input like `photos.local:2283` into `https://photos.local:2283/`.
///
/// A missing scheme defaults to `https`. Only `http` and `https` are
/// accepted, and the result must carry a host. Any path prefix is kept so
/// servers behind a sub-path reverse proxy still work.
pub fn normalize_host(raw: &str) -> Result<Url, Error> {
    let invalid = |reason: &str| Error::InvalidHost {
        host: raw.to_owned(),
        reason: reason.to_owned(),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid("host is empty"));
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };

    let mut url = Url::parse(&with_scheme).map_err(|e| invalid(&e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing network location"));
    }

    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn adds_https_when_scheme_missing() {
        let url = normalize_host("photos.example.com").unwrap();
        assert_eq!(url.as_str(), "https://photos.example.com/");
    }

    #[test]
    fn keeps_explicit_http_and_port() {
        let url = normalize_host("http://192.168.1.20:2283").unwrap();
        assert_eq!(url.as_str(), "http://192.168.1.20:2283/");
    }

    #[test]
    fn keeps_path_prefix_with_trailing_slash() {
        let url = normalize_host("https://home.example.com/immich").unwrap();
        assert_eq!(url.as_str(), "https://home.example.com/immich/");
    }

    #[test]
    fn lowercases_host_and_trims_input() {
        let url = normalize_host("  HTTPS://Photos.Example.COM/  ").unwrap();
        assert_eq!(url.host_str(), Some("photos.example.com"));
    }

    #[test]
    fn rejects_inputs_without_scheme_or_network_location() {
        for raw in ["", "   ", "http://", "ftp://photos.local", "file:///tmp/x"] {
            let result = normalize_host(raw);
            assert!(
                matches!(result, Err(Error::InvalidHost { .. })),
                "expected InvalidHost for {raw:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn credentials_expose_normalized_host() {
        let creds = Credentials::new("photos.local", SecretString::from("key")).unwrap();
        assert_eq!(creds.host().as_str(), "https://photos.local/");
    }
}
