// ── Connection setup ──
//
// Validates user input before a connection is stored: host format first
// (no I/O), then token validation, then the user lookup that titles the
// connection. Also lists album choices for the watched-album picker.

use std::collections::HashSet;

use secrecy::SecretString;
use tracing::debug;

use immich_api::{Credentials, ImmichClient, TransportConfig, UserInfo};

use crate::error::CoreError;

const FALLBACK_USER_NAME: &str = "Immich User";

/// Result of a successful validation.
#[derive(Debug, Clone)]
pub struct SetupInfo {
    /// `"<user name> @ <hostname>"`.
    pub title: String,
    pub credentials: Credentials,
    pub user: UserInfo,
}

/// Check that `host` and `api_key` reach a server that accepts the key.
pub async fn validate_setup(
    host: &str,
    api_key: SecretString,
    transport: &TransportConfig,
) -> Result<SetupInfo, CoreError> {
    let credentials = Credentials::new(host, api_key)?;
    let client = ImmichClient::new(&credentials, transport)?;

    if !client.authenticate().await? {
        return Err(CoreError::InvalidAuth {
            message: "server reported the API key as invalid".into(),
        });
    }

    let user = client.get_my_user().await?;
    let title = setup_title(&user, &credentials);
    debug!(title = %title, "setup validated");

    Ok(SetupInfo {
        title,
        credentials,
        user,
    })
}

fn setup_title(user: &UserInfo, credentials: &Credentials) -> String {
    let name = if user.name.is_empty() {
        FALLBACK_USER_NAME
    } else {
        user.name.as_str()
    };
    let hostname = credentials.host().host_str().unwrap_or_default();
    format!("{name} @ {hostname}")
}

// ── Album options ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumChoice {
    pub id: String,
    pub name: String,
}

/// Albums available for watching, plus the previously watched ids that
/// still exist on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumOptions {
    pub choices: Vec<AlbumChoice>,
    pub retained: Vec<String>,
}

pub async fn album_options(
    client: &ImmichClient,
    watched: &[String],
) -> Result<AlbumOptions, CoreError> {
    let choices: Vec<AlbumChoice> = client
        .list_albums()
        .await?
        .into_iter()
        .map(|a| AlbumChoice {
            id: a.id,
            name: a.album_name,
        })
        .collect();

    let known: HashSet<&str> = choices.iter().map(|c| c.id.as_str()).collect();
    let retained = watched
        .iter()
        .filter(|id| known.contains(id.as_str()))
        .cloned()
        .collect();

    Ok(AlbumOptions { choices, retained })
}
