//! Command handlers. Each takes the resolved `ServerConfig` and global flags.

pub mod albums;
pub mod assets;
pub mod readings;
pub mod setup;

use immich_core::ServerConfig;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a connected command to its handler.
pub async fn dispatch(
    cmd: Command,
    server: &ServerConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Albums => albums::handle(server, global).await,
        Command::Images(args) => assets::list_images(server, args, global).await,
        Command::Asset(args) => assets::show(server, args, global).await,
        Command::Download(args) => assets::download(server, args, global).await,
        Command::Readings => readings::handle(server, global).await,
        Command::Watch(args) => readings::watch(server, args, global).await,

        // Handled in main before a connection is resolved
        Command::Setup(_) | Command::Completions(_) => Ok(()),
    }
}
