// Asset endpoints
//
// Statistics, single-asset lookups, favorite search, and original-file
// download. Download is the one call that degrades softly: a missing or
// non-image asset yields `None` instead of an error.

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde_json::json;
use tracing::{debug, warn};

use crate::client::ImmichClient;
use crate::error::Error;
use crate::models::{AssetInfo, AssetStatistics, SearchResponse};

/// Content types `download_asset` will hand back.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/png", "image/jpeg"];

impl ImmichClient {
    /// Library-wide asset counters.
    ///
    /// `GET /api/assets/statistics`
    pub async fn get_asset_statistics(&self) -> Result<AssetStatistics, Error> {
        let stats: AssetStatistics = self.get(&["api", "assets", "statistics"]).await?;
        debug!(
            images = stats.images,
            videos = stats.videos,
            total = stats.total,
            "asset statistics"
        );
        Ok(stats)
    }

    /// Counters restricted to favorites.
    ///
    /// `GET /api/assets/statistics?isFavorite=true`
    pub async fn get_favorite_statistics(&self) -> Result<AssetStatistics, Error> {
        let stats: AssetStatistics = self
            .get_with_params(&["api", "assets", "statistics"], &[("isFavorite", "true")])
            .await?;
        debug!(total = stats.total, "favorite statistics");
        Ok(stats)
    }

    /// Metadata for one asset.
    ///
    /// `GET /api/assets/{id}`
    pub async fn get_asset_info(&self, asset_id: &str) -> Result<AssetInfo, Error> {
        debug!(asset_id, "fetching asset info");
        self.get(&["api", "assets", asset_id]).await
    }

    /// Every favorite asset of image type.
    ///
    /// `POST /api/search/metadata` with `{"isFavorite": "true"}`
    pub async fn list_favorite_images(&self) -> Result<Vec<AssetInfo>, Error> {
        let body = json!({ "isFavorite": "true" });
        let resp: SearchResponse = self.post(&["api", "search", "metadata"], Some(&body)).await?;
        let images: Vec<AssetInfo> = resp
            .assets
            .items
            .into_iter()
            .filter(AssetInfo::is_image)
            .collect();
        debug!(count = images.len(), "favorite images");
        Ok(images)
    }

    /// Download an asset's original bytes.
    ///
    /// `GET /api/assets/{id}/original`
    ///
    /// Returns `Ok(None)` on a non-2xx status or when the content type is
    /// not in [`ALLOWED_IMAGE_TYPES`]. Only transport failures are errors.
    pub async fn download_asset(&self, asset_id: &str) -> Result<Option<Bytes>, Error> {
        debug!(asset_id, "downloading asset");
        let segments = ["api", "assets", asset_id, "original"];

        let resp = match self.send::<()>(Method::GET, &segments, &[], None).await {
            Ok(resp) => resp,
            Err(Error::Api { status, .. }) => {
                warn!(asset_id, status, "download failed");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if resp.status() != StatusCode::OK {
            warn!(asset_id, status = resp.status().as_u16(), "unexpected download status");
            return Ok(None);
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or_default().trim().to_ascii_lowercase())
            .unwrap_or_default();

        if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
            warn!(asset_id, content_type = %content_type, "unsupported MIME type");
            return Ok(None);
        }

        let url = resp.url().to_string();
        let data = resp
            .bytes()
            .await
            .map_err(|source| Error::CannotConnect { url, source })?;
        debug!(asset_id, bytes = data.len(), "asset downloaded");
        Ok(Some(data))
    }
}
