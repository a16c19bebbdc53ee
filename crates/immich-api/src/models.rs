// Immich API response types
//
// Only the fields the readings and album consumers need are modeled
// explicitly. Everything else lands in `extra` and is forwarded untouched.
// Counters use `#[serde(default)]` so a missing field reads as 0.

use serde::{Deserialize, Serialize};

// ── Auth / users ─────────────────────────────────────────────────────

/// Body of `POST /api/auth/validateToken`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTokenResponse {
    #[serde(default)]
    pub auth_status: bool,
}

/// The authenticated user from `GET /api/users/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Assets ───────────────────────────────────────────────────────────

/// Asset kind as reported in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetType {
    Image,
    Video,
    Audio,
    #[serde(other)]
    Other,
}

/// One asset as it appears in album listings, searches, and `GET /api/assets/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetInfo {
    pub id: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AssetInfo {
    pub fn is_image(&self) -> bool {
        self.asset_type == AssetType::Image
    }
}

/// Counters from `GET /api/assets/statistics`.
///
/// `total` is whatever the server reports; it need not equal
/// `images + videos`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetStatistics {
    #[serde(default)]
    pub images: u64,
    #[serde(default)]
    pub videos: u64,
    #[serde(default)]
    pub total: u64,
}

/// `POST /api/search/metadata` response. `assets.items` is required.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub assets: SearchAssets,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchAssets {
    pub items: Vec<AssetInfo>,
}

// ── Albums ───────────────────────────────────────────────────────────

/// Album entry from `GET /api/albums`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSummary {
    pub id: String,
    #[serde(default, alias = "name")]
    pub album_name: String,
    #[serde(default)]
    pub asset_count: u64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Full album from `GET /api/albums/{id}`. The asset list is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumContents {
    pub id: String,
    #[serde(default, alias = "name")]
    pub album_name: String,
    pub assets: Vec<AssetInfo>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── People ───────────────────────────────────────────────────────────

/// A recognized person. Unnamed clusters come back with an empty name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `GET /api/people`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeopleSnapshot {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub hidden: u64,
}

impl PeopleSnapshot {
    /// Find a person by display name.
    ///
    /// An exact match wins; otherwise the first case-insensitive match.
    pub fn find_by_name(&self, name: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.name == name).or_else(|| {
            let wanted = name.to_lowercase();
            self.people.iter().find(|p| p.name.to_lowercase() == wanted)
        })
    }
}

/// `GET /api/people/{id}/statistics`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonStatistics {
    #[serde(default)]
    pub assets: u64,
}
