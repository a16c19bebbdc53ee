// Album endpoints

use tracing::debug;

use crate::client::ImmichClient;
use crate::error::Error;
use crate::models::{AlbumContents, AlbumSummary, AssetInfo};

impl ImmichClient {
    /// All albums visible to the API key.
    ///
    /// `GET /api/albums`
    pub async fn list_albums(&self) -> Result<Vec<AlbumSummary>, Error> {
        let albums: Vec<AlbumSummary> = self.get(&["api", "albums"]).await?;
        debug!(count = albums.len(), "listed albums");
        Ok(albums)
    }

    /// One album with its asset list.
    ///
    /// `GET /api/albums/{id}`
    pub async fn get_album(&self, album_id: &str) -> Result<AlbumContents, Error> {
        debug!(album_id, "fetching album");
        self.get(&["api", "albums", album_id]).await
    }

    /// The image assets of one album, in server order.
    pub async fn list_album_images(&self, album_id: &str) -> Result<Vec<AssetInfo>, Error> {
        let album = self.get_album(album_id).await?;
        let images: Vec<AssetInfo> = album.assets.into_iter().filter(AssetInfo::is_image).collect();
        debug!(album_id, count = images.len(), "album images");
        Ok(images)
    }
}
