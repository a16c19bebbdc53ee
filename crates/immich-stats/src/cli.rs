//! Clap derive structures for the `immich-stats` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// immich-stats -- library statistics for an Immich server
#[derive(Debug, Parser)]
#[command(
    name = "immich-stats",
    version,
    about = "Poll library statistics from an Immich photo server",
    long_about = "Reads library counters (images, videos, favorites, people) and\n\
        per-person asset counts from an Immich server using an API key.\n\n\
        Connection settings come from a profile in the config file,\n\
        IMMICH_* environment variables, or the flags below.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server profile to use
    #[arg(long, short = 'p', env = "IMMICH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Server URL; https is assumed when the scheme is missing
    #[arg(long, short = 'H', env = "IMMICH_HOST", global = true)]
    pub host: Option<String>,

    /// Immich API key
    #[arg(long, env = "IMMICH_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "IMMICH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "IMMICH_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "IMMICH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate the host and API key, optionally saving them as a profile
    Setup(SetupArgs),

    /// List albums, marking the watched ones
    Albums,

    /// List favorite images, or the images of one album
    Images(ImagesArgs),

    /// Show one asset
    Asset(AssetArgs),

    /// Discover readings and refresh them once
    #[command(alias = "r")]
    Readings,

    /// Refresh readings on an interval until interrupted
    Watch(WatchArgs),

    /// Download an asset's original image
    #[command(alias = "dl")]
    Download(DownloadArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct SetupArgs {
    /// Save the validated connection under this profile name
    #[arg(long, value_name = "PROFILE")]
    pub save: Option<String>,

    /// Store the API key in the system keyring instead of the config file
    #[arg(long, requires = "save")]
    pub keyring: bool,
}

#[derive(Debug, Args)]
pub struct ImagesArgs {
    /// Album ID (favorites when omitted)
    #[arg(long, short = 'a')]
    pub album: Option<String>,
}

#[derive(Debug, Args)]
pub struct AssetArgs {
    /// Asset ID
    pub asset_id: String,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Seconds between refreshes (overrides the profile's scan interval)
    #[arg(long, short = 'i', value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,
}

#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Asset ID
    pub asset_id: String,

    /// Destination file
    pub path: PathBuf,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
