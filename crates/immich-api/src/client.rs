// Immich HTTP client
//
// Wraps `reqwest::Client` with URL construction, credential headers, and
// response classification. Endpoint methods live in sibling modules as
// inherent impls so this file stays focused on transport mechanics.

use std::time::Instant;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, Response};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{API_KEY_HEADER, Credentials};
use crate::error::Error;
use crate::transport::TransportConfig;

/// Async client for one Immich server.
///
/// Every request carries `x-api-key` and `Accept: application/json`.
/// Requests are independent of each other: there is no session state.
#[derive(Debug, Clone)]
pub struct ImmichClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ImmichClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client from credentials and transport settings.
    pub fn new(credentials: &Credentials, transport: &TransportConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value = HeaderValue::from_str(credentials.api_key().expose_secret())
            .map_err(|_| Error::InvalidApiKey)?;
        key_value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = transport.build_client_with_headers(headers)?;
        debug!(host = %credentials.host(), "immich client initialized");

        Ok(Self {
            http,
            base_url: credentials.host().clone(),
        })
    }

    /// The normalized server URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments (e.g. `["api", "people"]`) to the base URL.
    ///
    /// Each segment is percent-encoded on its own, so an id containing `/`,
    /// `?` or `#` cannot leave its slot. Empty, `.` and `..` segments are
    /// rejected.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(Error::InvalidId {
                id: (*bad).to_owned(),
            });
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidHost {
                host: self.base_url.to_string(),
                reason: "URL cannot carry a path".into(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Request primitive ────────────────────────────────────────────

    /// Issue `method` against the URL built from `segments` and return the raw response, classifying
    /// transport failures and non-2xx statuses.
    pub(crate) async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Response, Error> {
        let url = self.url(segments)?;
        debug!("{method} {url}");

        let mut builder = self.http.request(method.clone(), url.clone());
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let started = Instant::now();
        let resp = builder.send().await.map_err(|source| {
            warn!(url = %url, error = %source, "connection error");
            Error::CannotConnect {
                url: url.to_string(),
                source,
            }
        })?;

        let status = resp.status();
        debug!(
            status = status.as_u16(),
            elapsed = ?started.elapsed(),
            "response received"
        );

        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), body = %body, "{method} {url} failed");
        Err(Error::Api {
            status: status.as_u16(),
            body,
        })
    }

    /// Issue a request and decode the JSON body into `T`.
    pub(crate) async fn request_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T, Error> {
        let resp = self.send(method, segments, query, body).await?;
        let url = resp.url().to_string();
        let text = resp.text().await.map_err(|source| Error::CannotConnect {
            url: url.clone(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|e| {
            let preview = text
                .char_indices()
                .nth(200)
                .map_or(text.as_str(), |(i, _)| &text[..i]);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: text.clone(),
            }
        })
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, Error> {
        self.request_json::<T, ()>(Method::GET, segments, &[], None)
            .await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&str, &str)],
    ) -> Result<T, Error> {
        self.request_json::<T, ()>(Method::GET, segments, params, None)
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<T, Error> {
        self.request_json(Method::POST, segments, &[], body).await
    }
}
