//! Asset command handlers: image listings, asset detail, download.

use std::fmt::Write as _;

use tabled::Tabled;
use tracing::debug;

use immich_api::AssetInfo;
use immich_core::ServerConfig;

use crate::cli::{AssetArgs, DownloadArgs, GlobalOpts, ImagesArgs};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AssetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "File")]
    file: String,
}

impl From<&AssetInfo> for AssetRow {
    fn from(a: &AssetInfo) -> Self {
        Self {
            id: a.id.clone(),
            kind: format!("{:?}", a.asset_type),
            file: extra_str(a, "originalFileName").unwrap_or_default().to_owned(),
        }
    }
}

fn extra_str<'a>(asset: &'a AssetInfo, field: &str) -> Option<&'a str> {
    asset.extra.get(field).and_then(serde_json::Value::as_str)
}

fn asset_detail(a: &AssetInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:       {}", a.id);
    let _ = writeln!(out, "Type:     {:?}", a.asset_type);
    for (label, field) in [
        ("File:     ", "originalFileName"),
        ("MIME:     ", "originalMimeType"),
        ("Created:  ", "fileCreatedAt"),
    ] {
        if let Some(value) = extra_str(a, field) {
            let _ = writeln!(out, "{label}{value}");
        }
    }
    if let Some(favorite) = a.extra.get("isFavorite").and_then(serde_json::Value::as_bool) {
        let _ = writeln!(out, "Favorite: {}", if favorite { "yes" } else { "no" });
    }
    out.trim_end().to_owned()
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list_images(
    server: &ServerConfig,
    args: ImagesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let client = server.connect()?;
    let images = match args.album {
        Some(ref album_id) => client.list_album_images(album_id).await?,
        None => client.list_favorite_images().await?,
    };

    let out = output::render_list(
        &global.output,
        &images,
        |a| AssetRow::from(a),
        |a| a.id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn show(
    server: &ServerConfig,
    args: AssetArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let client = server.connect()?;
    let asset = client.get_asset_info(&args.asset_id).await.map_err(|e| {
        if e.status() == Some(404) {
            CliError::NotFound {
                resource_type: "asset".into(),
                identifier: args.asset_id.clone(),
            }
        } else {
            e.into()
        }
    })?;

    let out = output::render_single(&global.output, &asset, asset_detail, |a| a.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn download(
    server: &ServerConfig,
    args: DownloadArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let client = server.connect()?;
    let Some(bytes) = client.download_asset(&args.asset_id).await? else {
        return Err(CliError::NoImage {
            asset_id: args.asset_id,
        });
    };

    tokio::fs::write(&args.path, &bytes).await?;
    debug!(asset_id = %args.asset_id, bytes = bytes.len(), "asset written");
    if !global.quiet {
        eprintln!("Saved {} bytes to {}", bytes.len(), args.path.display());
    }
    Ok(())
}
