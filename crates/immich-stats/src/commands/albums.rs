//! Album command handler.

use serde::Serialize;
use tabled::Tabled;

use immich_core::{ServerConfig, album_options};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct AlbumView {
    id: String,
    name: String,
    watched: bool,
}

#[derive(Tabled)]
struct AlbumRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Watched")]
    watched: &'static str,
}

impl From<&AlbumView> for AlbumRow {
    fn from(a: &AlbumView) -> Self {
        Self {
            id: a.id.clone(),
            name: a.name.clone(),
            watched: if a.watched { "yes" } else { "" },
        }
    }
}

pub async fn handle(server: &ServerConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let client = server.connect()?;
    let options = album_options(&client, &server.watched_albums).await?;

    let stale = server
        .watched_albums
        .len()
        .saturating_sub(options.retained.len());
    if stale > 0 && !global.quiet {
        eprintln!("{stale} watched album(s) no longer exist on the server");
    }

    let albums: Vec<AlbumView> = options
        .choices
        .into_iter()
        .map(|c| AlbumView {
            watched: options.retained.contains(&c.id),
            id: c.id,
            name: c.name,
        })
        .collect();

    let out = output::render_list(
        &global.output,
        &albums,
        |a| AlbumRow::from(a),
        |a| a.id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
